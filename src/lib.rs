//! Runners: release automation for resource-carrying libraries
//!
//! This crate provides the main Runners library, re-exporting core
//! functionality from `runners-core` and organizing the collaborators the
//! release coordinator drives.

pub use runners_core::{format_error_with_help, ErrorHelp, RunnersError, RunnersResult};

/// Core module re-exported from runners-core.
pub mod core {
    pub use runners_core::core::*;
    pub use runners_core::*;
}

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// Local file system operations.
pub mod files;

/// Git clone, commit and push.
pub mod git;

/// GitHub releases.
pub mod github;

/// Content hashing and change detection.
pub mod hashing;

/// Package build, pack and registry push.
pub mod package;

/// External process helpers.
pub mod process;

/// Release coordination.
pub mod runner;

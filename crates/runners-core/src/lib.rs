//! Core utilities for Runners
//!
//! Errors, strict environment access and path helpers shared between the
//! `runners` library and binary.

pub mod core;

pub use crate::core::{format_error_with_help, ErrorHelp, RunnersError, RunnersResult};

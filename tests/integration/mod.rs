//! Integration tests module
//!
//! Drives the `runners` binary and the production git backend against local
//! bare repositories.

pub mod add_file;
pub mod cli;
pub mod common;
pub mod git;
pub mod manager_sequence;

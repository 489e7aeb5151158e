//! Core types shared by the Runners binary and library

pub mod env;
pub mod error;
pub mod error_help;
pub mod path;

pub use error::{RunnersError, RunnersResult};
pub use error_help::{format_error_with_help, ErrorHelp};

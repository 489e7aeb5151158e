use std::path::PathBuf;
use thiserror::Error;

pub type RunnersResult<T> = Result<T, RunnersError>;

#[derive(Error, Debug)]
pub enum RunnersError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A required environment variable is unset or empty.
    #[error("Required environment variable `{0}` is not set")]
    MissingEnvironment(String),

    /// An external executable (git, dotnet) could not be located on PATH.
    #[error("Required tool `{0}` was not found on PATH")]
    ToolNotFound(String),

    /// An external command ran but exited unsuccessfully.
    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The GitHub API answered with a non-success status.
    #[error("GitHub API error (HTTP {status}): {message}")]
    GitHub { status: u16, message: String },

    #[error("Hash error for {path}: {message}")]
    Hash { path: PathBuf, message: String },

    /// The operation was cancelled before it completed.
    #[error("Operation cancelled")]
    Cancelled,
}

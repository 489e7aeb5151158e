//! Running external tools (git, dotnet) with cancellation

use crate::core::{RunnersError, RunnersResult};
use std::path::PathBuf;
use std::process::Output;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Locate an executable on PATH
pub fn find_tool(name: &str) -> RunnersResult<PathBuf> {
    which::which(name).map_err(|_| RunnersError::ToolNotFound(name.to_string()))
}

/// Run a command to completion and return its output.
///
/// `description` is what appears in errors and logs; it must not contain
/// secrets. A non-zero exit maps to `CommandFailed`. If `cancel` fires first
/// the child is killed and `Cancelled` is returned.
pub async fn run_command(
    mut command: Command,
    description: &str,
    cancel: &CancellationToken,
) -> RunnersResult<Output> {
    debug!(command = description, "running");

    command.kill_on_drop(true);

    let output = tokio::select! {
        output = command.output() => output?,
        _ = cancel.cancelled() => return Err(RunnersError::Cancelled),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(RunnersError::CommandFailed {
            command: description.to_string(),
            status: output.status.to_string(),
            stderr,
        });
    }

    Ok(output)
}

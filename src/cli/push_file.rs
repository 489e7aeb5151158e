use runners::core::{RunnersError, RunnersResult};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

pub struct PushFileOptions {
    pub file: PathBuf,
    pub name: Option<String>,
    pub library: String,
    pub repo: String,
}

pub async fn run(
    options: PushFileOptions,
    config_path: Option<&Path>,
    cancel: &CancellationToken,
) -> RunnersResult<()> {
    let manager = super::build_manager(config_path)?;
    let file_name = resolve_file_name(&options.file, options.name)?;

    manager
        .push_if_changes_needed(
            &options.file,
            &file_name,
            &options.library,
            &options.repo,
            cancel,
        )
        .await
}

/// Name the file takes inside the resources directory; defaults to the
/// source file's own name
pub fn resolve_file_name(file: &Path, name: Option<String>) -> RunnersResult<String> {
    if let Some(name) = name {
        return Ok(name);
    }
    file.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| RunnersError::Path(format!("Cannot derive a file name from {}", file.display())))
}

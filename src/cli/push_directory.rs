use runners::core::path::validate_relative;
use runners::core::{RunnersError, RunnersResult};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

pub struct PushDirectoryOptions {
    pub resources_dir: String,
    pub source: PathBuf,
    pub library: String,
    pub repo: String,
}

pub async fn run(
    options: PushDirectoryOptions,
    config_path: Option<&Path>,
    cancel: &CancellationToken,
) -> RunnersResult<()> {
    validate_relative(&options.resources_dir).map_err(|_| {
        RunnersError::Path(format!(
            "--resources-dir must be relative to the resources directory, without `..`: {}",
            options.resources_dir
        ))
    })?;

    let manager = super::build_manager(config_path)?;

    manager
        .push_if_changes_needed_for_directory(
            &options.resources_dir,
            &options.source,
            &options.library,
            &options.repo,
            cancel,
        )
        .await
}

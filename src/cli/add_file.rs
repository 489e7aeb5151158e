use runners::core::RunnersResult;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

pub struct AddFileOptions {
    pub file: PathBuf,
    pub name: Option<String>,
    pub library: String,
    pub repo: String,
}

pub async fn run(
    options: AddFileOptions,
    config_path: Option<&Path>,
    cancel: &CancellationToken,
) -> RunnersResult<()> {
    let manager = super::build_manager(config_path)?;
    let file_name = super::push_file::resolve_file_name(&options.file, options.name)?;

    manager
        .add_file_at_path_to_repo_if_needed(
            &options.file,
            &file_name,
            &options.library,
            &options.repo,
            cancel,
        )
        .await
}

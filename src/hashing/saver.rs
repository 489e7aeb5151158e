use crate::core::path::{ensure_within, resource_target};
use crate::core::RunnersResult;
use crate::di::traits::{GitProvider, HashSaver};
use crate::git::PushCredentials;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Writes the hash file into a clone and pushes it
pub struct GitHashSaver {
    git: Arc<dyn GitProvider>,
    resources_dir: String,
    commit_message: String,
}

impl GitHashSaver {
    pub fn new(git: Arc<dyn GitProvider>, resources_dir: &str, commit_message: &str) -> Self {
        Self {
            git,
            resources_dir: resources_dir.to_string(),
            commit_message: commit_message.to_string(),
        }
    }

    async fn write_and_push(
        &self,
        clone_dir: &Path,
        hash: &str,
        hash_filename: &str,
        credentials: &PushCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        let hash_path = clone_dir.join(hash_filename);
        tokio::fs::write(&hash_path, hash).await?;
        info!("Wrote {} to {}", hash, hash_path.display());

        self.git
            .commit_and_push(clone_dir, &self.commit_message, credentials, cancel)
            .await
    }
}

async fn remove_file_if_exists(path: &Path) -> RunnersResult<()> {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

async fn remove_dir_if_exists(path: &Path) -> RunnersResult<()> {
    match tokio::fs::remove_dir_all(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

#[async_trait]
impl HashSaver for GitHashSaver {
    async fn save_without_clearing_resources(
        &self,
        clone_dir: &Path,
        hash: &str,
        hash_filename: &str,
        credentials: &PushCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        self.write_and_push(clone_dir, hash, hash_filename, credentials, cancel)
            .await
    }

    async fn save_as_file(
        &self,
        clone_dir: &Path,
        hash: &str,
        file_name: &str,
        hash_filename: &str,
        credentials: &PushCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        let resource = resource_target(clone_dir, &self.resources_dir, file_name)?;
        remove_file_if_exists(&resource).await?;

        self.write_and_push(clone_dir, hash, hash_filename, credentials, cancel)
            .await
    }

    async fn save_as_directory(
        &self,
        clone_dir: &Path,
        hash: &str,
        target_dir: &Path,
        hash_filename: &str,
        credentials: &PushCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        ensure_within(clone_dir, target_dir)?;
        remove_dir_if_exists(target_dir).await?;

        self.write_and_push(clone_dir, hash, hash_filename, credentials, cancel)
            .await
    }
}

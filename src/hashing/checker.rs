use crate::core::{RunnersError, RunnersResult};
use crate::di::traits::HashChecker;
use crate::hashing::checksum::{hash_directory, hash_file};
use crate::hashing::{HashAlgorithm, HashCheck};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Compares artifacts on disk with the hash file in a clone
#[derive(Debug, Clone, Copy, Default)]
pub struct FileHashChecker {
    algorithm: HashAlgorithm,
}

impl FileHashChecker {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Read the recorded hash; a missing file means nothing was published yet
    async fn recorded_hash(clone_dir: &Path, hash_filename: &str) -> RunnersResult<Option<String>> {
        let path = clone_dir.join(hash_filename);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let trimmed = content.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn compare<F>(
        &self,
        clone_dir: &Path,
        artifact: &Path,
        hash_filename: &str,
        cancel: &CancellationToken,
        hash_fn: F,
    ) -> RunnersResult<HashCheck>
    where
        F: FnOnce(&Path, HashAlgorithm) -> RunnersResult<String> + Send + 'static,
    {
        let algorithm = self.algorithm;
        let owned: PathBuf = artifact.to_path_buf();
        let hashing = tokio::task::spawn_blocking(move || hash_fn(&owned, algorithm));

        let new_hash = tokio::select! {
            joined = hashing => joined.map_err(|e| RunnersError::Hash {
                path: artifact.to_path_buf(),
                message: e.to_string(),
            })??,
            _ = cancel.cancelled() => return Err(RunnersError::Cancelled),
        };

        let previous = Self::recorded_hash(clone_dir, hash_filename).await?;
        debug!(
            artifact = %artifact.display(),
            previous = previous.as_deref().unwrap_or("<none>"),
            current = %new_hash,
            "compared hashes"
        );

        if previous.as_deref() == Some(new_hash.as_str()) {
            info!("No changes detected for {}", artifact.display());
            return Ok(HashCheck::Unchanged);
        }

        info!("Changes detected for {}", artifact.display());
        Ok(HashCheck::Changed { new_hash })
    }
}

#[async_trait]
impl HashChecker for FileHashChecker {
    async fn check_file(
        &self,
        clone_dir: &Path,
        file_path: &Path,
        hash_filename: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<HashCheck> {
        self.compare(clone_dir, file_path, hash_filename, cancel, hash_file)
            .await
    }

    async fn check_directory(
        &self,
        clone_dir: &Path,
        source_dir: &Path,
        hash_filename: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<HashCheck> {
        self.compare(clone_dir, source_dir, hash_filename, cancel, hash_directory)
            .await
    }
}

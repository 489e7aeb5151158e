//! Local file system operations used while staging artifacts

use crate::core::path::ensure_dir;
use crate::core::{RunnersError, RunnersResult};
use crate::di::traits::FileSystem;
use async_trait::async_trait;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use walkdir::WalkDir;

/// `FileSystem` backed by the real disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn copy(
        &self,
        from: &Path,
        to: &Path,
        overwrite: bool,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        if cancel.is_cancelled() {
            return Err(RunnersError::Cancelled);
        }
        if !from.is_file() {
            return Err(RunnersError::Path(format!(
                "Source file not found: {}",
                from.display()
            )));
        }
        if to.exists() && !overwrite {
            return Err(RunnersError::Path(format!(
                "Destination already exists: {}",
                to.display()
            )));
        }
        if let Some(parent) = to.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::copy(from, to).await?;
        debug!("Copied {} to {}", from.display(), to.display());
        Ok(())
    }

    fn create_dir_if_missing(&self, dir: &Path) -> RunnersResult<()> {
        ensure_dir(dir)
    }
}

/// Copy every file under `source` into `target`, preserving layout.
/// Existing files in `target` are overwritten; extra ones are left alone.
pub fn copy_dir_recursive(source: &Path, target: &Path) -> RunnersResult<u64> {
    if !source.is_dir() {
        return Err(RunnersError::Path(format!(
            "Source directory not found: {}",
            source.display()
        )));
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| RunnersError::Path(e.to_string()))?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&destination)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = destination.parent() {
                ensure_dir(parent)?;
            }
            std::fs::copy(entry.path(), &destination)?;
            copied += 1;
        }
    }

    Ok(copied)
}

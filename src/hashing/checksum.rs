use crate::core::{RunnersError, RunnersResult};
use crate::hashing::HashAlgorithm;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

enum Hasher {
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl Hasher {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => Hasher::Sha256(Sha256::new()),
            HashAlgorithm::Blake3 => Hasher::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Sha256(h) => h.update(data),
            Hasher::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finish(self) -> String {
        match self {
            Hasher::Sha256(h) => format!("sha256:{}", hex::encode(h.finalize())),
            Hasher::Blake3(h) => format!("blake3:{}", h.finalize().to_hex()),
        }
    }
}

/// Hash a single file's contents
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> RunnersResult<String> {
    if !path.is_file() {
        return Err(RunnersError::Path(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let data = fs::read(path)?;
    let mut hasher = Hasher::new(algorithm);
    hasher.update(&data);
    Ok(hasher.finish())
}

/// Hash every file under `dir`
///
/// Files are visited in sorted order and each contributes its relative path
/// (with `/` separators) followed by its contents, so renames change the hash
/// as well as edits. Directories themselves contribute nothing.
pub fn hash_directory(dir: &Path, algorithm: HashAlgorithm) -> RunnersResult<String> {
    if !dir.is_dir() {
        return Err(RunnersError::Path(format!(
            "Directory not found: {}",
            dir.display()
        )));
    }

    let mut hasher = Hasher::new(algorithm);

    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| RunnersError::Hash {
                path: entry.path().to_path_buf(),
                message: e.to_string(),
            })?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        hasher.update(relative.as_bytes());
        hasher.update(&[0]);
        hasher.update(&fs::read(entry.path())?);
        hasher.update(&[0]);
    }

    Ok(hasher.finish())
}

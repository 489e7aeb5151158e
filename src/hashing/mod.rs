//! Content hashing and change detection
//!
//! Artifacts are hashed and compared with the hash recorded in the release
//! repository. A new hash is written back only after a successful publish.

pub mod checker;
pub mod checksum;
pub mod saver;

pub use checker::FileHashChecker;
pub use checksum::{hash_directory, hash_file};
pub use saver::GitHashSaver;

use serde::{Deserialize, Serialize};

/// Hash algorithm for content-change detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256
    Sha256,
    /// BLAKE3 (default)
    #[default]
    Blake3,
}

impl HashAlgorithm {
    /// Prefix used in rendered hashes, e.g. `blake3:`
    pub fn prefix(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Outcome of comparing an artifact with the recorded hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashCheck {
    /// Content matches the recorded hash; nothing to publish
    Unchanged,
    /// Content differs (or no hash was recorded yet)
    Changed { new_hash: String },
}

impl HashCheck {
    pub fn is_changed(&self) -> bool {
        matches!(self, HashCheck::Changed { .. })
    }

    pub fn new_hash(&self) -> Option<&str> {
        match self {
            HashCheck::Changed { new_hash } => Some(new_hash),
            HashCheck::Unchanged => None,
        }
    }
}

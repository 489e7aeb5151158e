//! Trait definitions for dependency injection

use crate::core::env;
use crate::core::{RunnersError, RunnersResult};
use crate::git::PushCredentials;
use crate::github::types::{GitHubRelease, ReleaseRequest};
use crate::hashing::{HashAlgorithm, HashCheck};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
pub trait ConfigProvider: Send + Sync {
    /// Name of the hash file at the clone root
    fn hash_filename(&self) -> &str;

    /// Resources directory, relative to the clone root
    fn resources_dir(&self) -> &str;

    /// Algorithm used to hash artifacts
    fn hash_algorithm(&self) -> HashAlgorithm;

    /// Depth passed to `git clone`
    fn clone_depth(&self) -> u32;

    /// Commit message for hash-saving commits
    fn commit_message(&self) -> &str;

    /// Body text for created releases
    fn release_body(&self) -> &str;

    /// Package file extension (e.g. "nupkg")
    fn package_extension(&self) -> &str;

    /// Primary package registry source
    fn package_source(&self) -> &str;

    /// Secondary registry for the given owner
    fn registry_url(&self, owner: &str) -> String;

    /// GitHub REST API base URL
    fn github_api_url(&self) -> &str;
}

/// Trait for environment variable access
pub trait EnvProvider: Send + Sync {
    /// Read a variable; unset and empty are both `None`
    fn var(&self, name: &str) -> Option<String>;

    /// Read a variable that must be present
    fn require(&self, name: &str) -> RunnersResult<String> {
        self.var(name)
            .ok_or_else(|| RunnersError::MissingEnvironment(name.to_string()))
    }
}

/// Reads from the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name)
    }
}

/// Trait for git repository operations
#[async_trait]
pub trait GitProvider: Send + Sync {
    /// Clone `uri` into a fresh temporary directory and return its path.
    /// The directory outlives the call.
    async fn clone_to_temp_dir(
        &self,
        uri: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<PathBuf>;

    /// Stage everything, commit as `identity`, and push to `origin`.
    /// A clean working tree is not an error.
    async fn commit_and_push(
        &self,
        repo_dir: &Path,
        message: &str,
        credentials: &PushCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()>;
}

/// Trait for comparing an artifact against the hash recorded in a clone
#[async_trait]
pub trait HashChecker: Send + Sync {
    /// Compare a single file against `<clone_dir>/<hash_filename>`
    async fn check_file(
        &self,
        clone_dir: &Path,
        file_path: &Path,
        hash_filename: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<HashCheck>;

    /// Compare a whole directory tree against `<clone_dir>/<hash_filename>`
    async fn check_directory(
        &self,
        clone_dir: &Path,
        source_dir: &Path,
        hash_filename: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<HashCheck>;
}

/// Trait for persisting a new hash back into the clone
#[async_trait]
pub trait HashSaver: Send + Sync {
    /// Write the hash file and push; leave resources in place
    async fn save_without_clearing_resources(
        &self,
        clone_dir: &Path,
        hash: &str,
        hash_filename: &str,
        credentials: &PushCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()>;

    /// Remove the packed resource file, write the hash file and push
    async fn save_as_file(
        &self,
        clone_dir: &Path,
        hash: &str,
        file_name: &str,
        hash_filename: &str,
        credentials: &PushCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()>;

    /// Remove the packed resource directory, write the hash file and push
    async fn save_as_directory(
        &self,
        clone_dir: &Path,
        hash: &str,
        target_dir: &Path,
        hash_filename: &str,
        credentials: &PushCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()>;
}

/// Details shared by both build/pack/push flavours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest<'a> {
    pub clone_dir: &'a Path,
    pub library_name: &'a str,
    pub version: &'a str,
    pub api_key: &'a str,
}

/// Trait for building, packing and pushing a package
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Copy `source_file` to `target_file`, then build, pack and push
    async fn build_pack_and_push_file(
        &self,
        request: &PackageRequest<'_>,
        target_file: &Path,
        source_file: &Path,
        cancel: &CancellationToken,
    ) -> RunnersResult<()>;

    /// Copy `source_dir` into `target_dir`, then build, pack and push
    async fn build_pack_and_push_directory(
        &self,
        request: &PackageRequest<'_>,
        target_dir: &Path,
        source_dir: &Path,
        cancel: &CancellationToken,
    ) -> RunnersResult<()>;
}

/// Trait for cutting releases
#[async_trait]
pub trait ReleasesProvider: Send + Sync {
    /// Create a release (and upload its asset, if any)
    async fn create(
        &self,
        request: &ReleaseRequest,
        token: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<GitHubRelease>;
}

/// Trait for pushing an already-built package to a registry
#[async_trait]
pub trait RegistryPusher: Send + Sync {
    async fn push(
        &self,
        package_path: &Path,
        source: &str,
        api_key: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<()>;
}

/// Trait for local file system operations
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Copy a file, creating the destination's parent directories
    async fn copy(
        &self,
        from: &Path,
        to: &Path,
        overwrite: bool,
        cancel: &CancellationToken,
    ) -> RunnersResult<()>;

    /// Create a directory (and parents) if it does not exist
    fn create_dir_if_missing(&self, dir: &Path) -> RunnersResult<()>;
}


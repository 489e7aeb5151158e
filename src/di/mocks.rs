//! Recording mock implementations of service traits for testing
//!
//! Every mock appends to a shared [`CallLog`], so a test can assert which
//! collaborators were called, in which order, and with which arguments.

use super::container::ServiceContainer;
use super::traits::{
    EnvProvider, FileSystem, GitProvider, HashChecker, HashSaver, PackageManager, PackageRequest,
    RegistryPusher, ReleasesProvider,
};
use crate::config::Config;
use crate::core::env::{BUILD_VERSION, GH_TOKEN, GH_USERNAME, GIT_EMAIL, GIT_NAME, NUGET_TOKEN};
use crate::core::{RunnersError, RunnersResult};
use crate::git::{GitIdentity, PushCredentials};
use crate::github::types::{GitHubRelease, ReleaseRequest};
use crate::hashing::HashCheck;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

/// One recorded collaborator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// `<collaborator>.<method>`, e.g. `git.clone_to_temp_dir`
    pub operation: String,
    pub args: Vec<String>,
    /// State of the cancellation token the call received; `None` for calls
    /// that take no token
    pub cancelled: Option<bool>,
}

/// Shared, ordered record of calls across all mocks
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Call>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, operation: &str, args: Vec<String>) {
        self.entries().push(Call {
            operation: operation.to_string(),
            args,
            cancelled: None,
        });
    }

    /// Record a call together with the state of the token it was handed
    pub fn record_cancellable(
        &self,
        cancel: &CancellationToken,
        operation: &str,
        args: Vec<String>,
    ) {
        self.entries().push(Call {
            operation: operation.to_string(),
            args,
            cancelled: Some(cancel.is_cancelled()),
        });
    }

    /// All calls in order
    pub fn calls(&self) -> Vec<Call> {
        self.entries().clone()
    }

    /// Operation names in order
    pub fn operations(&self) -> Vec<String> {
        self.entries().iter().map(|c| c.operation.clone()).collect()
    }

    /// Arguments of the first call to `operation`
    pub fn args_of(&self, operation: &str) -> Option<Vec<String>> {
        self.entries()
            .iter()
            .find(|c| c.operation == operation)
            .map(|c| c.args.clone())
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn injected(operation: &str, message: &str) -> RunnersError {
    RunnersError::CommandFailed {
        command: operation.to_string(),
        status: "exit status: 1".to_string(),
        stderr: message.to_string(),
    }
}

/// Credentials used across tests
pub fn sample_credentials() -> PushCredentials {
    PushCredentials {
        identity: GitIdentity {
            name: "Release Bot".to_string(),
            email: "bot@example.com".to_string(),
        },
        username: Some("octocat".to_string()),
        token: "gh-token".to_string(),
    }
}

/// Mock git provider; "clones" to a fixed directory without touching disk
#[derive(Clone)]
pub struct MockGitProvider {
    log: CallLog,
    clone_dir: PathBuf,
    error: Option<String>,
}

impl MockGitProvider {
    pub fn new(log: CallLog, clone_dir: PathBuf) -> Self {
        Self {
            log,
            clone_dir,
            error: None,
        }
    }

    /// Make `clone_to_temp_dir` fail with `message`
    pub fn failing_clone(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }
}

#[async_trait]
impl GitProvider for MockGitProvider {
    async fn clone_to_temp_dir(
        &self,
        uri: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<PathBuf> {
        self.log
            .record_cancellable(cancel, "git.clone_to_temp_dir", vec![uri.to_string()]);
        match &self.error {
            Some(message) => Err(injected("git clone", message)),
            None => Ok(self.clone_dir.clone()),
        }
    }

    async fn commit_and_push(
        &self,
        repo_dir: &Path,
        message: &str,
        credentials: &PushCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        self.log.record_cancellable(
            cancel,
            "git.commit_and_push",
            vec![
                display(repo_dir),
                message.to_string(),
                credentials.identity.name.clone(),
                credentials.identity.email.clone(),
            ],
        );
        Ok(())
    }
}

/// Mock hash checker returning a preset result
#[derive(Clone)]
pub struct MockHashChecker {
    log: CallLog,
    result: HashCheck,
}

impl MockHashChecker {
    pub fn new(log: CallLog, result: HashCheck) -> Self {
        Self { log, result }
    }
}

#[async_trait]
impl HashChecker for MockHashChecker {
    async fn check_file(
        &self,
        clone_dir: &Path,
        file_path: &Path,
        hash_filename: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<HashCheck> {
        self.log.record_cancellable(
            cancel,
            "hash.check_file",
            vec![
                display(clone_dir),
                display(file_path),
                hash_filename.to_string(),
            ],
        );
        Ok(self.result.clone())
    }

    async fn check_directory(
        &self,
        clone_dir: &Path,
        source_dir: &Path,
        hash_filename: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<HashCheck> {
        self.log.record_cancellable(
            cancel,
            "hash.check_directory",
            vec![
                display(clone_dir),
                display(source_dir),
                hash_filename.to_string(),
            ],
        );
        Ok(self.result.clone())
    }
}

/// Mock hash saver
#[derive(Clone)]
pub struct MockHashSaver {
    log: CallLog,
    error: Option<String>,
}

impl MockHashSaver {
    pub fn new(log: CallLog) -> Self {
        Self { log, error: None }
    }

    /// Make every save fail with `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }

    fn finish(&self, operation: &str) -> RunnersResult<()> {
        match &self.error {
            Some(message) => Err(injected(operation, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HashSaver for MockHashSaver {
    async fn save_without_clearing_resources(
        &self,
        clone_dir: &Path,
        hash: &str,
        hash_filename: &str,
        credentials: &PushCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        self.log.record_cancellable(
            cancel,
            "hash.save_without_clearing_resources",
            vec![
                display(clone_dir),
                hash.to_string(),
                hash_filename.to_string(),
                credentials.identity.name.clone(),
                credentials.identity.email.clone(),
                credentials.username.clone().unwrap_or_default(),
                credentials.token.clone(),
            ],
        );
        self.finish("hash.save_without_clearing_resources")
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
        self.log.record_cancellable(
            cancel,
            "hash.save_as_file",
            vec![
                display(clone_dir),
                hash.to_string(),
                file_name.to_string(),
                hash_filename.to_string(),
                credentials.identity.name.clone(),
                credentials.identity.email.clone(),
                credentials.username.clone().unwrap_or_default(),
                credentials.token.clone(),
            ],
        );
        self.finish("hash.save_as_file")
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
        self.log.record_cancellable(
            cancel,
            "hash.save_as_directory",
            vec![
                display(clone_dir),
                hash.to_string(),
                display(target_dir),
                hash_filename.to_string(),
                credentials.identity.name.clone(),
                credentials.identity.email.clone(),
                credentials.username.clone().unwrap_or_default(),
                credentials.token.clone(),
            ],
        );
        self.finish("hash.save_as_directory")
    }
}

/// Mock package manager
#[derive(Clone)]
pub struct MockPackageManager {
    log: CallLog,
    error: Option<String>,
}

impl MockPackageManager {
    pub fn new(log: CallLog) -> Self {
        Self { log, error: None }
    }

    /// Make every build fail with `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }

    fn finish(&self, operation: &str) -> RunnersResult<()> {
        match &self.error {
            Some(message) => Err(injected(operation, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PackageManager for MockPackageManager {
    async fn build_pack_and_push_file(
        &self,
        request: &PackageRequest<'_>,
        target_file: &Path,
        source_file: &Path,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        self.log.record_cancellable(
            cancel,
            "package.build_pack_and_push_file",
            vec![
                display(request.clone_dir),
                request.library_name.to_string(),
                display(target_file),
                display(source_file),
                request.version.to_string(),
                request.api_key.to_string(),
            ],
        );
        self.finish("package.build_pack_and_push_file")
    }

    async fn build_pack_and_push_directory(
        &self,
        request: &PackageRequest<'_>,
        target_dir: &Path,
        source_dir: &Path,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        self.log.record_cancellable(
            cancel,
            "package.build_pack_and_push_directory",
            vec![
                display(request.clone_dir),
                request.library_name.to_string(),
                display(target_dir),
                display(source_dir),
                request.version.to_string(),
                request.api_key.to_string(),
            ],
        );
        self.finish("package.build_pack_and_push_directory")
    }
}

/// Mock releases provider
#[derive(Clone)]
pub struct MockReleasesProvider {
    log: CallLog,
    error: Option<(u16, String)>,
}

impl MockReleasesProvider {
    pub fn new(log: CallLog) -> Self {
        Self { log, error: None }
    }

    /// Make `create` fail as the API would with `status`
    pub fn failing(mut self, status: u16, message: &str) -> Self {
        self.error = Some((status, message.to_string()));
        self
    }
}

#[async_trait]
impl ReleasesProvider for MockReleasesProvider {
    async fn create(
        &self,
        request: &ReleaseRequest,
        token: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<GitHubRelease> {
        self.log.record_cancellable(
            cancel,
            "releases.create",
            vec![
                request.owner.clone(),
                request.repo.clone(),
                request.tag.clone(),
                request.name.clone(),
                request.body.clone(),
                request
                    .asset_path
                    .as_deref()
                    .map(display)
                    .unwrap_or_default(),
                request.draft.to_string(),
                request.prerelease.to_string(),
                token.to_string(),
            ],
        );
        if let Some((status, message)) = &self.error {
            return Err(RunnersError::GitHub {
                status: *status,
                message: message.clone(),
            });
        }
        Ok(GitHubRelease {
            id: 1,
            tag_name: request.tag.clone(),
            name: Some(request.name.clone()),
            draft: request.draft,
            prerelease: request.prerelease,
            html_url: String::new(),
            upload_url: String::new(),
            assets: Vec::new(),
        })
    }
}

/// Mock registry pusher
#[derive(Clone)]
pub struct MockRegistryPusher {
    log: CallLog,
}

impl MockRegistryPusher {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl RegistryPusher for MockRegistryPusher {
    async fn push(
        &self,
        package_path: &Path,
        source: &str,
        api_key: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        self.log.record_cancellable(
            cancel,
            "registry.push",
            vec![
                display(package_path),
                source.to_string(),
                api_key.to_string(),
            ],
        );
        Ok(())
    }
}

/// Mock file system; records instead of touching disk
#[derive(Clone)]
pub struct MockFileSystem {
    log: CallLog,
    error: Option<String>,
}

impl MockFileSystem {
    pub fn new(log: CallLog) -> Self {
        Self { log, error: None }
    }

    /// Make `copy` fail with a missing-source error naming `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn copy(
        &self,
        from: &Path,
        to: &Path,
        overwrite: bool,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        self.log.record_cancellable(
            cancel,
            "fs.copy",
            vec![display(from), display(to), overwrite.to_string()],
        );
        match &self.error {
            Some(message) => Err(RunnersError::Path(message.clone())),
            None => Ok(()),
        }
    }

    fn create_dir_if_missing(&self, dir: &Path) -> RunnersResult<()> {
        self.log
            .record("fs.create_dir_if_missing", vec![display(dir)]);
        Ok(())
    }
}

/// Mock environment backed by a map
///
/// # Example
///
/// ```
/// use runners::di::mocks::MockEnvProvider;
/// use runners::di::EnvProvider;
///
/// let env = MockEnvProvider::with_all_credentials().without("NUGET__TOKEN");
/// assert!(env.require("NUGET__TOKEN").is_err());
/// assert_eq!(env.require("GIT__NAME").unwrap(), "Release Bot");
/// ```
#[derive(Clone, Default)]
pub struct MockEnvProvider {
    vars: HashMap<String, String>,
}

impl MockEnvProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every variable the runner may require
    pub fn with_all_credentials() -> Self {
        Self::new()
            .with(GIT_NAME, "Release Bot")
            .with(GIT_EMAIL, "bot@example.com")
            .with(GH_USERNAME, "octocat")
            .with(GH_TOKEN, "gh-token")
            .with(NUGET_TOKEN, "nuget-token")
            .with(BUILD_VERSION, "1.2.3")
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.vars.remove(name);
        self
    }
}

impl EnvProvider for MockEnvProvider {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

/// A container wired entirely with mocks sharing `log`
pub fn mock_container(
    log: &CallLog,
    clone_dir: &Path,
    hash_check: HashCheck,
    env: MockEnvProvider,
) -> ServiceContainer {
    ServiceContainer::with_providers(
        Arc::new(Config::default()),
        Arc::new(env),
        Arc::new(MockGitProvider::new(log.clone(), clone_dir.to_path_buf())),
        Arc::new(MockHashChecker::new(log.clone(), hash_check)),
        Arc::new(MockHashSaver::new(log.clone())),
        Arc::new(MockPackageManager::new(log.clone())),
        Arc::new(MockReleasesProvider::new(log.clone())),
        Arc::new(MockRegistryPusher::new(log.clone())),
        Arc::new(MockFileSystem::new(log.clone())),
    )
}

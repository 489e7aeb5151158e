//! Service container for dependency injection

use super::traits::{
    ConfigProvider, EnvProvider, FileSystem, GitProvider, HashChecker, HashSaver, PackageManager,
    ProcessEnv, RegistryPusher, ReleasesProvider,
};
use crate::config::Config;
use crate::core::RunnersResult;
use crate::files::LocalFileSystem;
use crate::git::SystemGit;
use crate::github::GitHubClient;
use crate::hashing::{FileHashChecker, GitHashSaver};
use crate::package::{DotnetPackageManager, DotnetRegistryPusher};
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds every collaborator the runner needs as `Arc<dyn Trait>`, so tests
/// can swap any of them for a mock.
///
/// # Example (Production)
///
/// ```no_run
/// use runners::config::Config;
/// use runners::di::{ConfigProvider, ServiceContainer};
///
/// # fn example() -> runners::core::RunnersResult<()> {
/// let container = ServiceContainer::new(Config::load()?)?;
/// println!("Hash file: {}", container.config().hash_filename());
/// # Ok(())
/// # }
/// ```
///
/// # Example (Testing)
///
/// ```
/// use runners::di::mocks::{mock_container, CallLog, MockEnvProvider};
/// use runners::di::ConfigProvider;
/// use runners::hashing::HashCheck;
/// use std::path::Path;
///
/// let log = CallLog::new();
/// let container = mock_container(
///     &log,
///     Path::new("/tmp/clone"),
///     HashCheck::Unchanged,
///     MockEnvProvider::with_all_credentials(),
/// );
/// assert_eq!(container.config().hash_filename(), "hash.txt");
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub env: Arc<dyn EnvProvider>,
    pub git: Arc<dyn GitProvider>,
    pub hash_checker: Arc<dyn HashChecker>,
    pub hash_saver: Arc<dyn HashSaver>,
    pub package_manager: Arc<dyn PackageManager>,
    pub releases: Arc<dyn ReleasesProvider>,
    pub registry: Arc<dyn RegistryPusher>,
    pub files: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with production implementations
    ///
    /// - git and packaging shell out to `git` / `dotnet`
    /// - releases go to the configured GitHub API
    /// - environment variables come from the process
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> RunnersResult<Self> {
        let config: Arc<dyn ConfigProvider> = Arc::new(config);
        let files: Arc<dyn FileSystem> = Arc::new(LocalFileSystem);
        let git: Arc<dyn GitProvider> = Arc::new(SystemGit::new(config.clone_depth()));
        let registry: Arc<dyn RegistryPusher> = Arc::new(DotnetRegistryPusher);
        let releases = GitHubClient::new(config.github_api_url())?;

        Ok(Self {
            env: Arc::new(ProcessEnv),
            hash_checker: Arc::new(FileHashChecker::new(config.hash_algorithm())),
            hash_saver: Arc::new(GitHashSaver::new(
                git.clone(),
                config.resources_dir(),
                config.commit_message(),
            )),
            package_manager: Arc::new(DotnetPackageManager::new(
                files.clone(),
                registry.clone(),
                config.package_source(),
                config.package_extension(),
            )),
            releases: Arc::new(releases),
            files,
            git,
            registry,
            config,
        })
    }

    /// Create a service container with custom provider implementations
    ///
    /// This is primarily useful for testing, where you can inject mock
    /// implementations of each service.
    #[allow(clippy::too_many_arguments)]
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        env: Arc<dyn EnvProvider>,
        git: Arc<dyn GitProvider>,
        hash_checker: Arc<dyn HashChecker>,
        hash_saver: Arc<dyn HashSaver>,
        package_manager: Arc<dyn PackageManager>,
        releases: Arc<dyn ReleasesProvider>,
        registry: Arc<dyn RegistryPusher>,
        files: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            config,
            env,
            git,
            hash_checker,
            hash_saver,
            package_manager,
            releases,
            registry,
            files,
        }
    }

    /// Get the configuration provider
    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Get the environment provider
    pub fn env(&self) -> &dyn EnvProvider {
        self.env.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_config() {
        let config = Config {
            hash_filename: "content.hash".to_string(),
            ..Default::default()
        };
        let container = ServiceContainer::new(config).unwrap();
        assert_eq!(container.config().hash_filename(), "content.hash");
    }
}

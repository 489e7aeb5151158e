use crate::core::env::{BUILD_VERSION, GH_TOKEN, GH_USERNAME, GIT_EMAIL, GIT_NAME, NUGET_TOKEN};
use crate::core::path::resource_target;
use crate::core::RunnersResult;
use crate::di::traits::{EnvProvider, PackageRequest};
use crate::di::ServiceContainer;
use crate::git::{GitIdentity, PushCredentials};
use crate::github::types::ReleaseRequest;
use crate::hashing::HashCheck;
use crate::package::package_path;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Values read from the environment once a change has been detected
#[derive(Debug, Clone)]
struct PublishCredentials {
    push: PushCredentials,
    username: String,
    nuget_token: String,
    version: String,
}

impl PublishCredentials {
    /// Reads `GIT__NAME`, `GIT__EMAIL`, `GH__USERNAME`, `NUGET__TOKEN`,
    /// `BUILD_VERSION`, `GH__TOKEN` in that order, failing on the first missing one
    fn from_env(env: &dyn EnvProvider) -> RunnersResult<Self> {
        let name = env.require(GIT_NAME)?;
        let email = env.require(GIT_EMAIL)?;
        let username = env.require(GH_USERNAME)?;
        let nuget_token = env.require(NUGET_TOKEN)?;
        let version = env.require(BUILD_VERSION)?;
        let token = env.require(GH_TOKEN)?;

        Ok(Self {
            push: PushCredentials {
                identity: GitIdentity { name, email },
                username: Some(username.clone()),
                token,
            },
            username,
            nuget_token,
            version,
        })
    }
}

/// Drives clone → compare → publish → record for one artifact per call
///
/// Every side effect goes through the collaborators in the
/// [`ServiceContainer`]; errors from them are returned unchanged.
pub struct RunnersManager {
    services: ServiceContainer,
}

impl RunnersManager {
    pub fn new(services: ServiceContainer) -> Self {
        Self { services }
    }

    /// Copy `file_path` into the repository's resources and record its hash,
    /// without building or publishing a package.
    ///
    /// Returns early, after the hash check, when the file is unchanged.
    pub async fn add_file_at_path_to_repo_if_needed(
        &self,
        file_path: &Path,
        file_name: &str,
        library_name: &str,
        git_repo_uri: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        info!(
            "Adding file to repo if changes are needed for {} in {} from {}...",
            file_name,
            library_name,
            crate::git::redact_url(git_repo_uri)
        );

        let config = self.services.config();
        let clone_dir = self
            .services
            .git
            .clone_to_temp_dir(git_repo_uri, cancel)
            .await?;
        let target_file = resource_target(&clone_dir, config.resources_dir(), file_name)?;

        let check = self
            .services
            .hash_checker
            .check_file(&clone_dir, file_path, config.hash_filename(), cancel)
            .await?;
        let new_hash = match check {
            HashCheck::Unchanged => return Ok(()),
            HashCheck::Changed { new_hash } => new_hash,
        };

        let env = self.services.env();
        let name = env.require(GIT_NAME)?;
        let email = env.require(GIT_EMAIL)?;
        // Required even though this flow does not use it
        env.require(GH_USERNAME)?;
        let token = env.require(GH_TOKEN)?;
        let credentials = PushCredentials {
            identity: GitIdentity { name, email },
            username: None,
            token,
        };

        self.services
            .files
            .copy(file_path, &target_file, true, cancel)
            .await?;

        self.services
            .hash_saver
            .save_without_clearing_resources(
                &clone_dir,
                &new_hash,
                config.hash_filename(),
                &credentials,
                cancel,
            )
            .await
    }

    /// Build and push a package containing `file_path`, record the new hash,
    /// cut a release with the file attached, and push to the secondary registry.
    ///
    /// Returns early, after the hash check, when the file is unchanged.
    pub async fn push_if_changes_needed(
        &self,
        file_path: &Path,
        file_name: &str,
        library_name: &str,
        git_repo_uri: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        info!(
            "Pushing if changes are needed for {} in {} from {}...",
            file_name,
            library_name,
            crate::git::redact_url(git_repo_uri)
        );

        let config = self.services.config();
        let clone_dir = self
            .services
            .git
            .clone_to_temp_dir(git_repo_uri, cancel)
            .await?;
        let target_file = resource_target(&clone_dir, config.resources_dir(), file_name)?;

        let check = self
            .services
            .hash_checker
            .check_file(&clone_dir, file_path, config.hash_filename(), cancel)
            .await?;
        let new_hash = match check {
            HashCheck::Unchanged => return Ok(()),
            HashCheck::Changed { new_hash } => new_hash,
        };

        let credentials = PublishCredentials::from_env(self.services.env())?;

        let request = PackageRequest {
            clone_dir: &clone_dir,
            library_name,
            version: &credentials.version,
            api_key: &credentials.nuget_token,
        };
        self.services
            .package_manager
            .build_pack_and_push_file(&request, &target_file, file_path, cancel)
            .await?;

        self.services
            .hash_saver
            .save_as_file(
                &clone_dir,
                &new_hash,
                file_name,
                config.hash_filename(),
                &credentials.push,
                cancel,
            )
            .await?;

        self.create_release(file_path, library_name, &credentials, cancel)
            .await?;

        self.publish_to_registry(&clone_dir, library_name, &credentials, cancel)
            .await
    }

    /// Directory flavour of [`push_if_changes_needed`](Self::push_if_changes_needed).
    ///
    /// The target directory is created before the hash check. No release is cut.
    pub async fn push_if_changes_needed_for_directory(
        &self,
        resources_relative_dir: &str,
        source_dir: &Path,
        library_name: &str,
        git_repo_uri: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        info!(
            "Pushing if changes are needed for {} in {} from {}...",
            resources_relative_dir,
            library_name,
            crate::git::redact_url(git_repo_uri)
        );

        let config = self.services.config();
        let clone_dir = self
            .services
            .git
            .clone_to_temp_dir(git_repo_uri, cancel)
            .await?;
        let target_dir =
            resource_target(&clone_dir, config.resources_dir(), resources_relative_dir)?;

        self.services.files.create_dir_if_missing(&target_dir)?;

        let check = self
            .services
            .hash_checker
            .check_directory(&clone_dir, source_dir, config.hash_filename(), cancel)
            .await?;
        let new_hash = match check {
            HashCheck::Unchanged => return Ok(()),
            HashCheck::Changed { new_hash } => new_hash,
        };

        let credentials = PublishCredentials::from_env(self.services.env())?;

        let request = PackageRequest {
            clone_dir: &clone_dir,
            library_name,
            version: &credentials.version,
            api_key: &credentials.nuget_token,
        };
        self.services
            .package_manager
            .build_pack_and_push_directory(&request, &target_dir, source_dir, cancel)
            .await?;

        self.services
            .hash_saver
            .save_as_directory(
                &clone_dir,
                &new_hash,
                &target_dir,
                config.hash_filename(),
                &credentials.push,
                cancel,
            )
            .await?;

        self.publish_to_registry(&clone_dir, library_name, &credentials, cancel)
            .await
    }

    async fn create_release(
        &self,
        file_path: &Path,
        library_name: &str,
        credentials: &PublishCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        let request = ReleaseRequest {
            owner: credentials.username.clone(),
            repo: library_name.to_lowercase(),
            tag: credentials.version.clone(),
            name: credentials.version.clone(),
            body: self.services.config().release_body().to_string(),
            asset_path: Some(file_path.to_path_buf()),
            draft: false,
            prerelease: false,
        };

        self.services
            .releases
            .create(&request, &credentials.push.token, cancel)
            .await?;
        Ok(())
    }

    async fn publish_to_registry(
        &self,
        clone_dir: &Path,
        library_name: &str,
        credentials: &PublishCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        let config = self.services.config();
        let package = package_path(
            clone_dir,
            library_name,
            &credentials.version,
            config.package_extension(),
        );
        let source = config.registry_url(&credentials.username);

        self.services
            .registry
            .push(&package, &source, &credentials.push.token, cancel)
            .await
    }
}

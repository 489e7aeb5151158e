use crate::core::path::{config_file, ensure_dir, validate_relative};
use crate::core::{RunnersError, RunnersResult};
use crate::di::ConfigProvider;
use crate::hashing::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name of the file at the clone root that records the last published hash
    #[serde(default = "default_hash_filename")]
    pub hash_filename: String,

    /// Directory inside the clone where artifacts are placed
    #[serde(default = "default_resources_dir")]
    pub resources_dir: String,

    /// Hash algorithm for content-change detection
    /// - "blake3": BLAKE3 (default)
    /// - "sha256": SHA-256
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,

    /// `git clone --depth` value (0 clones full history)
    #[serde(default = "default_clone_depth")]
    pub clone_depth: u32,

    /// Commit message used when saving a new hash
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Body of the release cut for a new version
    #[serde(default = "default_release_body")]
    pub release_body: String,

    /// Extension of the package file produced by `dotnet pack`
    #[serde(default = "default_package_extension")]
    pub package_extension: String,

    /// Registry the freshly built package is pushed to first
    #[serde(default = "default_package_source")]
    pub package_source: String,

    /// Secondary registry (GitHub Packages)
    ///
    /// Defaults to the feed of the publishing account,
    /// `https://nuget.pkg.github.com/<GH__USERNAME>/index.json`. Set this to
    /// push to a fixed organisation feed instead, whatever `GH__USERNAME` is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,

    /// GitHub REST API base URL
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,
}

fn default_hash_filename() -> String {
    "hash.txt".to_string()
}

fn default_resources_dir() -> String {
    "src/Resources".to_string()
}

fn default_clone_depth() -> u32 {
    1
}

fn default_commit_message() -> String {
    "Automated update".to_string()
}

fn default_release_body() -> String {
    "Automated release update".to_string()
}

fn default_package_extension() -> String {
    "nupkg".to_string()
}

fn default_package_source() -> String {
    "https://api.nuget.org/v3/index.json".to_string()
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hash_filename: default_hash_filename(),
            resources_dir: default_resources_dir(),
            hash_algorithm: HashAlgorithm::default(),
            clone_depth: default_clone_depth(),
            commit_message: default_commit_message(),
            release_body: default_release_body(),
            package_extension: default_package_extension(),
            package_source: default_package_source(),
            registry_url: None,
            github_api_url: default_github_api_url(),
        }
    }
}

impl Config {
    /// Load config from the platform-specific config directory, creating a default if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\runners\config.yaml
    /// - Linux: ~/.config/runners/config.yaml
    /// - macOS: ~/Library/Application Support/runners/config.yaml
    pub fn load() -> RunnersResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> RunnersResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            RunnersError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| RunnersError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given path, creating parent directories
    pub fn save_to(&self, path: &Path) -> RunnersResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| RunnersError::Path("Invalid config path".to_string()))?;

        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| RunnersError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> RunnersResult<()> {
        if self.hash_filename.trim().is_empty() {
            return Err(RunnersError::Config(
                "hash_filename must not be empty".to_string(),
            ));
        }
        validate_relative(&self.resources_dir).map_err(|_| {
            RunnersError::Config(format!(
                "resources_dir must be a relative path inside the clone without `..`, got {}",
                self.resources_dir
            ))
        })?;
        Ok(())
    }
}

impl ConfigProvider for Config {
    fn hash_filename(&self) -> &str {
        &self.hash_filename
    }

    fn resources_dir(&self) -> &str {
        &self.resources_dir
    }

    fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    fn clone_depth(&self) -> u32 {
        self.clone_depth
    }

    fn commit_message(&self) -> &str {
        &self.commit_message
    }

    fn release_body(&self) -> &str {
        &self.release_body
    }

    fn package_extension(&self) -> &str {
        &self.package_extension
    }

    fn package_source(&self) -> &str {
        &self.package_source
    }

    fn registry_url(&self, owner: &str) -> String {
        match &self.registry_url {
            Some(url) => url.clone(),
            None => format!(
                "https://nuget.pkg.github.com/{}/index.json",
                urlencoding::encode(owner)
            ),
        }
    }

    fn github_api_url(&self) -> &str {
        &self.github_api_url
    }
}

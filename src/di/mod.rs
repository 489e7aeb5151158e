//! Dependency injection infrastructure for Runners
//!
//! Every collaborator the runner drives (git, hashing, packaging, releases,
//! registry, file system, environment) sits behind a trait so it can be
//! replaced in tests.
//!
//! # Example (Production)
//! ```no_run
//! use runners::config::Config;
//! use runners::di::ServiceContainer;
//!
//! # fn example() -> runners::core::RunnersResult<()> {
//! let container = ServiceContainer::new(Config::default())?;
//! # Ok(())
//! # }
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{
    ConfigProvider, EnvProvider, FileSystem, GitProvider, HashChecker, HashSaver, PackageManager,
    PackageRequest, ProcessEnv, RegistryPusher, ReleasesProvider,
};

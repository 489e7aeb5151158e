//! GitHub integration for cutting releases
//!
//! Releases are created through the REST API and the published artifact is
//! attached as a release asset.

pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::{GitHubRelease, ReleaseAsset, ReleaseRequest};

//! Building, packing and pushing packages

pub mod dotnet;
pub mod registry;

pub use dotnet::DotnetPackageManager;
pub use registry::DotnetRegistryPusher;

use std::path::{Path, PathBuf};

/// Where `dotnet pack -o <clone_dir>` leaves the package: `<library>.<version>.<extension>`
pub fn package_path(clone_dir: &Path, library_name: &str, version: &str, extension: &str) -> PathBuf {
    clone_dir.join(format!("{}.{}.{}", library_name, version, extension))
}

use crate::core::{RunnersError, RunnersResult};
use crate::di::traits::{FileSystem, PackageManager, PackageRequest, RegistryPusher};
use crate::files::copy_dir_recursive;
use crate::package::package_path;
use crate::process::{find_tool, run_command};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Builds and packs with the `dotnet` CLI, then pushes through a `RegistryPusher`
pub struct DotnetPackageManager {
    files: Arc<dyn FileSystem>,
    registry: Arc<dyn RegistryPusher>,
    package_source: String,
    package_extension: String,
}

impl DotnetPackageManager {
    pub fn new(
        files: Arc<dyn FileSystem>,
        registry: Arc<dyn RegistryPusher>,
        package_source: &str,
        package_extension: &str,
    ) -> Self {
        Self {
            files,
            registry,
            package_source: package_source.to_string(),
            package_extension: package_extension.to_string(),
        }
    }

    /// Project file for a library: `<clone>/src/<library>.csproj`
    pub fn project_path(clone_dir: &Path, library_name: &str) -> PathBuf {
        clone_dir
            .join("src")
            .join(format!("{}.csproj", library_name))
    }

    async fn build_pack_and_push(
        &self,
        request: &PackageRequest<'_>,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        let project = Self::project_path(request.clone_dir, request.library_name);
        if !project.is_file() {
            return Err(RunnersError::Path(format!(
                "Project file not found: {}",
                project.display()
            )));
        }
        let dotnet = find_tool("dotnet")?;

        let mut build = Command::new(&dotnet);
        build
            .arg("build")
            .arg(&project)
            .args(["--configuration", "Release"])
            .arg(format!("-p:Version={}", request.version));
        run_command(build, "dotnet build", cancel).await?;

        let mut pack = Command::new(&dotnet);
        pack.arg("pack")
            .arg(&project)
            .args(["--configuration", "Release", "--no-build"])
            .arg(format!("-p:PackageVersion={}", request.version))
            .arg("--output")
            .arg(request.clone_dir);
        run_command(pack, "dotnet pack", cancel).await?;

        let package = package_path(
            request.clone_dir,
            request.library_name,
            request.version,
            &self.package_extension,
        );
        info!("Packed {}", package.display());

        self.registry
            .push(&package, &self.package_source, request.api_key, cancel)
            .await
    }
}

#[async_trait]
impl PackageManager for DotnetPackageManager {
    async fn build_pack_and_push_file(
        &self,
        request: &PackageRequest<'_>,
        target_file: &Path,
        source_file: &Path,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        self.files
            .copy(source_file, target_file, true, cancel)
            .await?;

        self.build_pack_and_push(request, cancel).await
    }

    async fn build_pack_and_push_directory(
        &self,
        request: &PackageRequest<'_>,
        target_dir: &Path,
        source_dir: &Path,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        let source = source_dir.to_path_buf();
        let target = target_dir.to_path_buf();
        let copied = tokio::task::spawn_blocking(move || copy_dir_recursive(&source, &target))
            .await
            .map_err(|e| RunnersError::Path(format!("Copy task failed: {}", e)))??;
        info!("Staged {} files into {}", copied, target_dir.display());

        self.build_pack_and_push(request, cancel).await
    }
}

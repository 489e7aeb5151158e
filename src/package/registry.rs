use crate::core::{RunnersError, RunnersResult};
use crate::di::traits::RegistryPusher;
use crate::process::{find_tool, run_command};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Pushes packages with `dotnet nuget push`
#[derive(Debug, Clone, Copy, Default)]
pub struct DotnetRegistryPusher;

#[async_trait]
impl RegistryPusher for DotnetRegistryPusher {
    async fn push(
        &self,
        package_path: &Path,
        source: &str,
        api_key: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        if !package_path.is_file() {
            return Err(RunnersError::Path(format!(
                "Package not found: {}",
                package_path.display()
            )));
        }

        let mut cmd = Command::new(find_tool("dotnet")?);
        cmd.args(["nuget", "push"])
            .arg(package_path)
            .arg("--source")
            .arg(source)
            .arg("--api-key")
            .arg(api_key)
            .arg("--skip-duplicate");

        // The API key stays out of the description
        let description = format!(
            "dotnet nuget push {} --source {}",
            package_path.display(),
            source
        );
        run_command(cmd, &description, cancel).await?;

        info!("Pushed {} to {}", package_path.display(), source);
        Ok(())
    }
}

//! System git backend

use crate::core::RunnersResult;
use crate::di::traits::GitProvider;
use crate::git::{redact_url, PushCredentials};
use crate::process::{find_tool, run_command};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Git backend using the system `git` binary
#[derive(Debug, Clone)]
pub struct SystemGit {
    clone_depth: u32,
}

impl SystemGit {
    /// Create a backend that clones with `--depth clone_depth` (0 = full history)
    pub fn new(clone_depth: u32) -> Self {
        Self { clone_depth }
    }

    /// Create a git command with an isolated environment
    ///
    /// - Clears environment variables except PATH and HOME
    /// - Disables interactive credential prompts
    /// - Overrides user config that would change commit behaviour
    fn git_cmd(&self, repo: Option<&Path>) -> RunnersResult<Command> {
        let git = find_tool("git")?;
        let mut cmd = Command::new(git);

        cmd.env_clear();
        for key in ["PATH", "HOME", "USERPROFILE", "SYSTEMROOT", "TMPDIR", "TEMP"] {
            if let Ok(value) = std::env::var(key) {
                cmd.env(key, value);
            }
        }
        cmd.env("GIT_TERMINAL_PROMPT", "0");

        if let Some(repo) = repo {
            cmd.arg("-C").arg(repo);
        }

        cmd.arg("-c").arg("advice.detachedHead=false");
        cmd.arg("-c").arg("commit.gpgsign=false");

        Ok(cmd)
    }

    async fn has_changes(&self, repo_dir: &Path, cancel: &CancellationToken) -> RunnersResult<bool> {
        let mut cmd = self.git_cmd(Some(repo_dir))?;
        cmd.args(["status", "--porcelain"]);
        let output = run_command(cmd, "git status --porcelain", cancel).await?;
        Ok(!output.stdout.iter().all(u8::is_ascii_whitespace))
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new(1)
    }
}

#[async_trait]
impl GitProvider for SystemGit {
    async fn clone_to_temp_dir(
        &self,
        uri: &str,
        cancel: &CancellationToken,
    ) -> RunnersResult<PathBuf> {
        let dir = tempfile::Builder::new()
            .prefix("runners-")
            .tempdir()?
            .keep();

        let mut cmd = self.git_cmd(None)?;
        cmd.arg("clone");
        if self.clone_depth > 0 {
            cmd.arg("--depth").arg(self.clone_depth.to_string());
        }
        cmd.arg("--").arg(uri).arg(&dir);

        let description = format!("git clone {}", redact_url(uri));
        if let Err(e) = run_command(cmd, &description, cancel).await {
            let _ = std::fs::remove_dir_all(&dir);
            return Err(e);
        }

        info!("Cloned {} into {}", redact_url(uri), dir.display());
        Ok(dir)
    }

    async fn commit_and_push(
        &self,
        repo_dir: &Path,
        message: &str,
        credentials: &PushCredentials,
        cancel: &CancellationToken,
    ) -> RunnersResult<()> {
        let mut add = self.git_cmd(Some(repo_dir))?;
        add.args(["add", "-A"]);
        run_command(add, "git add -A", cancel).await?;

        if !self.has_changes(repo_dir, cancel).await? {
            info!("Nothing to commit in {}", repo_dir.display());
            return Ok(());
        }

        let mut commit = self.git_cmd(Some(repo_dir))?;
        commit
            .arg("-c")
            .arg(format!("user.name={}", credentials.identity.name))
            .arg("-c")
            .arg(format!("user.email={}", credentials.identity.email))
            .args(["commit", "-m", message]);
        run_command(commit, "git commit", cancel).await?;

        let mut push = self.git_cmd(Some(repo_dir))?;
        push.arg("-c")
            .arg(format!("http.extraheader={}", credentials.auth_header()))
            .args(["push", "origin", "HEAD"]);
        run_command(push, "git push origin HEAD", cancel).await?;

        info!("Pushed {} to origin", repo_dir.display());
        Ok(())
    }
}

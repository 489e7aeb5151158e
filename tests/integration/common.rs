//! Common utilities for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub fn runners_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_runners"))
}

/// Every variable the runner may require, with test values
pub const CREDENTIALS: [(&str, &str); 6] = [
    ("GIT__NAME", "Release Bot"),
    ("GIT__EMAIL", "bot@example.com"),
    ("GH__USERNAME", "octocat"),
    ("GH__TOKEN", "gh-token"),
    ("NUGET__TOKEN", "nuget-token"),
    ("BUILD_VERSION", "1.2.3"),
];

/// Whether a usable `git` is on PATH; git-backed tests return early without it
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["-c", "user.name=Seed", "-c", "user.email=seed@example.com"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A bare repository seeded with one commit, living in a temp directory
pub struct TestRepo {
    _temp: TempDir,
    pub bare: PathBuf,
    pub root: PathBuf,
}

impl TestRepo {
    /// Create a bare repo whose `main` branch contains `files`
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let bare = root.join("origin.git");
        let seed = root.join("seed");

        fs::create_dir_all(&bare).unwrap();
        git(&bare, &["init", "--bare", "--initial-branch=main"]);

        fs::create_dir_all(&seed).unwrap();
        git(&seed, &["init", "--initial-branch=main"]);
        for (path, content) in files {
            let file = seed.join(path);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, content).unwrap();
        }
        git(&seed, &["add", "-A"]);
        git(&seed, &["commit", "-m", "Initial commit"]);
        git(&seed, &["remote", "add", "origin", bare.to_str().unwrap()]);
        git(&seed, &["push", "origin", "main"]);

        Self {
            _temp: temp,
            bare,
            root,
        }
    }

    pub fn uri(&self) -> String {
        self.bare.display().to_string()
    }

    /// Content of `path` at the tip of `main`, if it exists there
    pub fn read(&self, path: &str) -> Option<String> {
        let output = Command::new("git")
            .arg("--git-dir")
            .arg(&self.bare)
            .args(["show", &format!("main:{}", path)])
            .output()
            .unwrap();
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).to_string())
    }

    pub fn commit_count(&self) -> usize {
        git(&self.bare, &["rev-list", "--count", "main"])
            .parse()
            .unwrap()
    }

    pub fn last_author(&self) -> String {
        git(&self.bare, &["log", "-1", "--format=%an <%ae>", "main"])
    }
}

/// Write a config file into `dir` and return its path
pub fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, format!("hash_filename: hash.txt\n{}", extra)).unwrap();
    path
}

//! Tests for argument handling and error reporting of the `runners` binary

use super::common::{git_available, runners_command, write_config, TestRepo, CREDENTIALS};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_help_lists_commands() {
    let output = runners_command().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("add-file"));
    assert!(stdout.contains("push-file"));
    assert!(stdout.contains("push-directory"));
}

#[test]
fn test_missing_required_argument() {
    let output = runners_command()
        .args(["push-file", "--file", "data.json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--library") || stderr.contains("--repo"));
}

#[test]
fn test_unreadable_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("missing.yaml");

    let output = runners_command()
        .arg("--config")
        .arg(&config)
        .args(["add-file", "--file", "data.json"])
        .args(["--library", "My.Lib", "--repo", "/nonexistent"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.to_lowercase().contains("config"), "stderr: {}", stderr);
}

#[test]
fn test_absolute_resources_dir_rejected() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");

    let output = runners_command()
        .arg("--config")
        .arg(&config)
        .args(["push-directory", "--resources-dir", "/abs"])
        .args(["--source", temp.path().to_str().unwrap()])
        .args(["--library", "My.Lib", "--repo", "/nonexistent"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_parent_segments_in_resources_dir_rejected() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");

    let output = runners_command()
        .arg("--config")
        .arg(&config)
        .args(["push-directory", "--resources-dir", "icons/../../.."])
        .args(["--source", temp.path().to_str().unwrap()])
        .args(["--library", "My.Lib", "--repo", "/nonexistent"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--resources-dir"), "stderr: {}", stderr);
}

#[test]
fn test_clone_failure_reports_error() {
    if !git_available() {
        return;
    }
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let file = temp.path().join("data.json");
    fs::write(&file, "{}").unwrap();

    let output = runners_command()
        .arg("--config")
        .arg(&config)
        .args(["add-file", "--file", file.to_str().unwrap()])
        .args(["--library", "My.Lib"])
        .arg("--repo")
        .arg(temp.path().join("no-such-repo.git"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("git clone"), "stderr: {}", stderr);
}

#[test]
fn test_missing_env_fails_after_change_detected() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::with_files(&[("README.md", "library\n")]);
    let config = write_config(&repo.root, "");
    let file = repo.root.join("data.json");
    fs::write(&file, "{\"a\":1}").unwrap();

    let mut cmd = runners_command();
    cmd.arg("--config")
        .arg(&config)
        .args(["add-file", "--file", file.to_str().unwrap()])
        .args(["--library", "My.Lib", "--repo", &repo.uri()]);
    for (name, value) in CREDENTIALS {
        cmd.env(name, value);
    }
    cmd.env_remove("GIT__EMAIL");
    let output = cmd.output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GIT__EMAIL"), "stderr: {}", stderr);
    assert_eq!(repo.commit_count(), 1);
}

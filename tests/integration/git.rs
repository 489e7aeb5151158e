//! Tests for the system git backend against a local bare repository

use super::common::{git_available, TestRepo};
use runners::di::GitProvider;
use runners::git::{GitIdentity, PushCredentials, SystemGit};
use std::fs;
use tokio_util::sync::CancellationToken;

fn credentials() -> PushCredentials {
    PushCredentials {
        identity: GitIdentity {
            name: "Release Bot".to_string(),
            email: "bot@example.com".to_string(),
        },
        username: Some("octocat".to_string()),
        token: "gh-token".to_string(),
    }
}

#[tokio::test]
async fn test_clone_to_temp_dir_checks_out_files() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::with_files(&[("hash.txt", "blake3:abc")]);

    let dir = SystemGit::default()
        .clone_to_temp_dir(&repo.uri(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(fs::read_to_string(dir.join("hash.txt")).unwrap(), "blake3:abc");
    fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn test_commit_and_push_publishes_changes() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::with_files(&[("README.md", "library\n")]);
    let git = SystemGit::new(0);
    let cancel = CancellationToken::new();

    let dir = git.clone_to_temp_dir(&repo.uri(), &cancel).await.unwrap();
    fs::write(dir.join("hash.txt"), "blake3:def").unwrap();
    git.commit_and_push(&dir, "Automated update", &credentials(), &cancel)
        .await
        .unwrap();

    assert_eq!(repo.commit_count(), 2);
    assert_eq!(repo.read("hash.txt").as_deref(), Some("blake3:def"));
    assert_eq!(repo.last_author(), "Release Bot <bot@example.com>");
    fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn test_commit_and_push_clean_tree_is_noop() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::with_files(&[("README.md", "library\n")]);
    let git = SystemGit::default();
    let cancel = CancellationToken::new();

    let dir = git.clone_to_temp_dir(&repo.uri(), &cancel).await.unwrap();
    git.commit_and_push(&dir, "Automated update", &credentials(), &cancel)
        .await
        .unwrap();

    assert_eq!(repo.commit_count(), 1);
    fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn test_clone_missing_repo_fails() {
    if !git_available() {
        return;
    }
    let temp = tempfile::TempDir::new().unwrap();
    let uri = temp.path().join("missing.git");

    let result = SystemGit::default()
        .clone_to_temp_dir(uri.to_str().unwrap(), &CancellationToken::new())
        .await;

    assert!(result.is_err());
}

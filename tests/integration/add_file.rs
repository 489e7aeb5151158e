//! End-to-end tests for `runners add-file` against a local bare repository

use super::common::{git_available, runners_command, write_config, TestRepo, CREDENTIALS};
use std::fs;
use std::path::Path;
use std::process::Output;

fn add_file(repo: &TestRepo, config: &Path, file: &Path, name: &str) -> Output {
    let mut cmd = runners_command();
    cmd.arg("--config")
        .arg(config)
        .args(["add-file", "--file", file.to_str().unwrap(), "--name", name])
        .args(["--library", "My.Lib", "--repo", &repo.uri()]);
    for (key, value) in CREDENTIALS {
        cmd.env(key, value);
    }
    cmd.output().unwrap()
}

#[test]
fn test_add_file_commits_resource_and_hash() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::with_files(&[("README.md", "library\n")]);
    let config = write_config(&repo.root, "");
    let file = repo.root.join("data.json");
    fs::write(&file, "{\"icons\":[]}").unwrap();

    let output = add_file(&repo, &config, &file, "icons.json");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(repo.commit_count(), 2);
    assert_eq!(
        repo.read("src/Resources/icons.json").as_deref(),
        Some("{\"icons\":[]}")
    );
    let hash = repo.read("hash.txt").unwrap();
    assert!(hash.starts_with("blake3:"), "hash: {}", hash);
    assert_eq!(repo.last_author(), "Release Bot <bot@example.com>");
}

#[test]
fn test_add_file_second_run_is_unchanged() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::with_files(&[("README.md", "library\n")]);
    let config = write_config(&repo.root, "");
    let file = repo.root.join("data.json");
    fs::write(&file, "{\"icons\":[]}").unwrap();

    assert!(add_file(&repo, &config, &file, "icons.json").status.success());
    assert_eq!(repo.commit_count(), 2);

    let output = add_file(&repo, &config, &file, "icons.json");

    assert!(output.status.success());
    assert_eq!(repo.commit_count(), 2);
}

#[test]
fn test_add_file_changed_content_records_new_hash() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::with_files(&[("README.md", "library\n")]);
    let config = write_config(&repo.root, "");
    let file = repo.root.join("data.json");

    fs::write(&file, "v1").unwrap();
    assert!(add_file(&repo, &config, &file, "data.json").status.success());
    let first = repo.read("hash.txt").unwrap();

    fs::write(&file, "v2").unwrap();
    assert!(add_file(&repo, &config, &file, "data.json").status.success());
    let second = repo.read("hash.txt").unwrap();

    assert_ne!(first, second);
    assert_eq!(repo.commit_count(), 3);
    assert_eq!(repo.read("src/Resources/data.json").as_deref(), Some("v2"));
}

#[test]
fn test_add_file_honours_sha256_config() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::with_files(&[("README.md", "library\n")]);
    let config = write_config(&repo.root, "hash_algorithm: sha256\nresources_dir: assets\n");
    let file = repo.root.join("data.json");
    fs::write(&file, "{}").unwrap();

    let output = add_file(&repo, &config, &file, "data.json");

    assert!(output.status.success());
    assert!(repo.read("hash.txt").unwrap().starts_with("sha256:"));
    assert_eq!(repo.read("assets/data.json").as_deref(), Some("{}"));
}

//! Ordering tests for `RunnersManager` using `mockall` expectations

use mockall::{mock, Sequence};
use runners::config::Config;
use runners::core::{RunnersError, RunnersResult};
use runners::di::mocks::{
    CallLog, MockEnvProvider, MockFileSystem, MockHashSaver, MockPackageManager,
    MockRegistryPusher, MockReleasesProvider,
};
use runners::di::{GitProvider, HashChecker, ServiceContainer};
use runners::git::PushCredentials;
use runners::hashing::HashCheck;
use runners::runner::RunnersManager;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

mock! {
    pub Git {}

    #[async_trait::async_trait]
    impl GitProvider for Git {
        async fn clone_to_temp_dir(
            &self,
            uri: &str,
            cancel: &CancellationToken,
        ) -> RunnersResult<PathBuf>;

        async fn commit_and_push(
            &self,
            repo_dir: &Path,
            message: &str,
            credentials: &PushCredentials,
            cancel: &CancellationToken,
        ) -> RunnersResult<()>;
    }
}

mock! {
    pub Checker {}

    #[async_trait::async_trait]
    impl HashChecker for Checker {
        async fn check_file(
            &self,
            clone_dir: &Path,
            file_path: &Path,
            hash_filename: &str,
            cancel: &CancellationToken,
        ) -> RunnersResult<HashCheck>;

        async fn check_directory(
            &self,
            clone_dir: &Path,
            source_dir: &Path,
            hash_filename: &str,
            cancel: &CancellationToken,
        ) -> RunnersResult<HashCheck>;
    }
}

const REPO: &str = "https://github.com/octocat/My.Lib.git";

fn container(log: &CallLog, git: MockGit, checker: MockChecker) -> ServiceContainer {
    ServiceContainer::with_providers(
        Arc::new(Config::default()),
        Arc::new(MockEnvProvider::with_all_credentials()),
        Arc::new(git),
        Arc::new(checker),
        Arc::new(MockHashSaver::new(log.clone())),
        Arc::new(MockPackageManager::new(log.clone())),
        Arc::new(MockReleasesProvider::new(log.clone())),
        Arc::new(MockRegistryPusher::new(log.clone())),
        Arc::new(MockFileSystem::new(log.clone())),
    )
}

#[tokio::test]
async fn test_clone_precedes_file_check() {
    let mut seq = Sequence::new();
    let mut git = MockGit::new();
    let mut checker = MockChecker::new();

    git.expect_clone_to_temp_dir()
        .withf(|uri, _| uri == REPO)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(PathBuf::from("/tmp/clone")));
    checker
        .expect_check_file()
        .withf(|clone, file, hash_filename, _| {
            clone == Path::new("/tmp/clone")
                && file == Path::new("/data/icons.json")
                && hash_filename == "hash.txt"
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _| Ok(HashCheck::Unchanged));
    checker.expect_check_directory().never();
    git.expect_commit_and_push().never();

    let log = CallLog::new();
    RunnersManager::new(container(&log, git, checker))
        .push_if_changes_needed(
            Path::new("/data/icons.json"),
            "icons.json",
            "My.Lib",
            REPO,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(log.operations().is_empty());
}

#[tokio::test]
async fn test_check_error_propagates_unchanged() {
    let mut git = MockGit::new();
    let mut checker = MockChecker::new();

    git.expect_clone_to_temp_dir()
        .returning(|_, _| Ok(PathBuf::from("/tmp/clone")));
    checker.expect_check_directory().times(1).returning(|_, _, _, _| {
        Err(RunnersError::Hash {
            path: PathBuf::from("/data/icons"),
            message: "unreadable".to_string(),
        })
    });

    let log = CallLog::new();
    let result = RunnersManager::new(container(&log, git, checker))
        .push_if_changes_needed_for_directory(
            "icons",
            Path::new("/data/icons"),
            "My.Lib",
            REPO,
            &CancellationToken::new(),
        )
        .await;

    match result {
        Err(RunnersError::Hash { message, .. }) => assert_eq!(message, "unreadable"),
        other => panic!("expected hash error, got {:?}", other),
    }
    assert_eq!(log.operations(), vec!["fs.create_dir_if_missing"]);
}

#[tokio::test]
async fn test_changed_file_reaches_publish_steps() {
    let mut seq = Sequence::new();
    let mut git = MockGit::new();
    let mut checker = MockChecker::new();

    git.expect_clone_to_temp_dir()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(PathBuf::from("/tmp/clone")));
    checker
        .expect_check_file()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _, _| {
            Ok(HashCheck::Changed {
                new_hash: "sha256:00ff".to_string(),
            })
        });

    let log = CallLog::new();
    RunnersManager::new(container(&log, git, checker))
        .push_if_changes_needed(
            Path::new("/data/icons.json"),
            "icons.json",
            "My.Lib",
            REPO,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        log.operations(),
        vec![
            "package.build_pack_and_push_file",
            "hash.save_as_file",
            "releases.create",
            "registry.push",
        ]
    );
    assert_eq!(log.args_of("hash.save_as_file").unwrap()[1], "sha256:00ff");
}

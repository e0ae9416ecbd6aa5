//! Git operation tests against real repositories

mod support;

use std::fs;
use support::{Remote, git};
use tempfile::TempDir;
use tsc_publish::config::CommitAuthor;
use tsc_publish::git::{CommitOutcome, Git, clone_repository};
use tsc_publish::runner::CommandRunner;

#[tokio::test]
async fn test_clone_identity_and_orphan_commit() {
    let remote = Remote::new();
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("branch-dist");
    let runner = CommandRunner::quiet();

    clone_repository(&runner, remote.bare.to_str().unwrap(), &target, &[])
        .await
        .unwrap();

    let repo = Git::new(&runner, &target);
    let author = CommitAuthor {
        name: "Release Bot".to_string(),
        email: "bot@example.com".to_string(),
    };
    repo.configure_identity(&author).await.unwrap();
    assert_eq!(git(&target, &["config", "--local", "user.name"]).trim(), "Release Bot");

    repo.checkout_orphan("dist").await.unwrap();
    assert_eq!(repo.head_sha().await.unwrap(), None);

    fs::remove_file(target.join("README.md")).unwrap();
    fs::write(target.join("index.js"), "x").unwrap();
    repo.add_all().await.unwrap();
    assert!(repo.has_changes().await.unwrap());
    assert_eq!(repo.commit("Build").await.unwrap(), CommitOutcome::Committed);
    assert_eq!(repo.tracked_files().await.unwrap(), vec!["index.js"]);

    assert!(repo.head_sha().await.unwrap().is_some());
    assert_eq!(repo.commit("Again").await.unwrap(), CommitOutcome::NothingToCommit);

    repo.push_force("dist").await.unwrap();
    assert_eq!(remote.files_on("dist"), vec!["index.js"]);
    assert_eq!(remote.author("dist"), "Release Bot <bot@example.com>");
}

#[tokio::test]
async fn test_clone_failure_message() {
    let temp_dir = TempDir::new().unwrap();
    let runner = CommandRunner::quiet();

    let err = clone_repository(
        &runner,
        temp_dir.path().join("missing.git").to_str().unwrap(),
        &temp_dir.path().join("clone"),
        &[],
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Something went wrong while cloning the repository."
    );
}

#[tokio::test]
async fn test_checkout_missing_branch_fails() {
    let remote = Remote::new();
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("clone");
    let runner = CommandRunner::quiet();
    clone_repository(&runner, remote.bare.to_str().unwrap(), &target, &[])
        .await
        .unwrap();

    let err = Git::new(&runner, &target)
        .checkout_existing("does-not-exist")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("'does-not-exist'"));
}

#[tokio::test]
async fn test_remove_paths_drops_index_and_disk() {
    let remote = Remote::new();
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("clone");
    let runner = CommandRunner::quiet();
    clone_repository(&runner, remote.bare.to_str().unwrap(), &target, &[])
        .await
        .unwrap();

    let repo = Git::new(&runner, &target);
    fs::write(target.join("a.ts"), "").unwrap();
    repo.add_all().await.unwrap();
    repo.remove_paths(&["a.ts".to_string(), "never-tracked.ts".to_string()])
        .await
        .unwrap();

    assert!(!target.join("a.ts").exists());
    assert_eq!(repo.tracked_files().await.unwrap(), vec!["README.md"]);
    assert!(!repo.has_changes().await.unwrap());
}

#[tokio::test]
async fn test_push_rejected_is_fatal() {
    let remote = Remote::new();
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("clone");
    let runner = CommandRunner::quiet();
    clone_repository(&runner, remote.bare.to_str().unwrap(), &target, &[])
        .await
        .unwrap();

    fs::remove_dir_all(&remote.bare).unwrap();

    let err = Git::new(&runner, &target).push_force("main").await.unwrap_err();
    assert!(err.to_string().contains("pushing to branch 'main'"));
}

#[tokio::test]
async fn test_push_failure_masks_secrets() {
    let remote = Remote::new();
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("clone");
    let runner = CommandRunner::quiet();
    let url = remote.bare.to_str().unwrap().to_string();
    clone_repository(&runner, &url, &target, &[]).await.unwrap();

    fs::remove_dir_all(&remote.bare).unwrap();

    let secrets = vec![url.clone()];
    let err = Git::new(&runner, &target)
        .with_secrets(&secrets)
        .push_force("main")
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("pushing to branch 'main'"));
    assert!(message.contains("***"));
    assert!(!message.contains(&url));
}

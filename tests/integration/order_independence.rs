//! Completion order must never leak into the digest

use super::test_utils::{make_nested_tree, sha256, DelayedFs};
use merklehash::{compute, DirectoryHasher, HashOptions};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reverse_completion_order_gives_same_digest() {
    let temp_dir = TempDir::new().unwrap();
    let names: Vec<String> = (0..8).map(|i| format!("file{i}.txt")).collect();
    for (i, name) in names.iter().enumerate() {
        fs::write(temp_dir.path().join(name), format!("content {i}")).unwrap();
    }

    // Earlier names finish last
    let delays = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), Duration::from_millis(10 * (8 - i as u64))));

    let cancel = CancellationToken::new();
    let expected = DirectoryHasher::new(sha256())
        .compute_serial(temp_dir.path(), &cancel)
        .unwrap();
    let delayed = DirectoryHasher::new(sha256())
        .with_filesystem(Arc::new(DelayedFs::new(delays)))
        .with_options(HashOptions {
            max_open_files: 0,
            ..HashOptions::default()
        })
        .compute(temp_dir.path(), &cancel)
        .await
        .unwrap();

    assert_eq!(expected, delayed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_slow_subdirectory_keeps_its_slot() {
    let temp_dir = TempDir::new().unwrap();
    make_nested_tree(temp_dir.path());

    let cancel = CancellationToken::new();
    let expected = compute(temp_dir.path(), sha256(), &cancel).await.unwrap();

    // "three.txt" sits deep under "alpha", which sorts first at the root
    let delayed = DirectoryHasher::new(sha256())
        .with_filesystem(Arc::new(DelayedFs::new([(
            "three.txt",
            Duration::from_millis(100),
        )])))
        .compute(temp_dir.path(), &cancel)
        .await
        .unwrap();

    assert_eq!(expected, delayed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_renaming_without_reordering_keeps_digest() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "first").unwrap();
    fs::write(temp_dir.path().join("m.txt"), "second").unwrap();

    let cancel = CancellationToken::new();
    let before = compute(temp_dir.path(), sha256(), &cancel).await.unwrap();

    fs::rename(temp_dir.path().join("a.txt"), temp_dir.path().join("b.txt")).unwrap();
    let after = compute(temp_dir.path(), sha256(), &cancel).await.unwrap();

    assert_eq!(before, after);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reordering_children_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "first").unwrap();
    fs::write(temp_dir.path().join("m.txt"), "second").unwrap();

    let cancel = CancellationToken::new();
    let before = compute(temp_dir.path(), sha256(), &cancel).await.unwrap();

    // Moves "first" after "second" in name order
    fs::rename(temp_dir.path().join("a.txt"), temp_dir.path().join("z.txt")).unwrap();
    let after = compute(temp_dir.path(), sha256(), &cancel).await.unwrap();

    assert_ne!(before, after);
}

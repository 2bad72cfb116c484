//! Pinned digests and repeatability

use super::test_utils::{make_nested_tree, make_test_1, make_test_2, sha256};
use merklehash::algorithm::Algorithm;
use merklehash::tree::hasher;
use merklehash::{compute, compute_serial, DirectoryHasher};
use std::fs;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

const TEST_1_SHA256: &str = "61f417374f4400b47dcae1a8f402d4f4dacf455a0442a06aa455a447b0d4e170";

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_file_directory_pinned() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_test_1(temp_dir.path());

    let digest = compute(&root, sha256(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(digest.to_hex(), TEST_1_SHA256);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_file_digest_is_plain_content_digest() {
    let digest = hasher::digest_bytes(sha256().as_ref(), b"Hello World!");
    assert_eq!(
        digest.to_hex(),
        "7f83b1657ff1fc53b92dc18148a1d65dfc2d4b1fa3d677284addd200126d9069"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_nested_directory_pinned() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_test_2(temp_dir.path());

    let digest = compute(&root, sha256(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(
        digest.to_hex(),
        "374ae4a092911e60121d2a3f6f55dd051df9837104344b518f9b470524e090f0"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_directory_and_file_siblings_pinned() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("mixed");
    fs::create_dir(&root).unwrap();
    make_test_1(&root);
    fs::write(root.join("z.txt"), "Hello World?").unwrap();

    let digest = compute(&root, sha256(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(
        digest.to_hex(),
        "3e0cf5a538abef244c4f7842bcceda4d80e4c02bddd3b141ecbad4bfb1fc70f1"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_byte_change_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_test_1(temp_dir.path());
    fs::write(root.join("a.txt"), "Hello World?").unwrap();

    let digest = compute(&root, sha256(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(
        digest.to_hex(),
        "5cf31f58045c9e6e07f956966b6821e613df29ea342e4af5615f22b00f32eebf"
    );
    assert_ne!(digest.to_hex(), TEST_1_SHA256);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sha1_pinned() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_test_1(temp_dir.path());

    let digest = compute(&root, Algorithm::Sha1.factory(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(digest.to_hex(), "665fe44c931737ea9e97e1cb5ba62cdcd6390a1f");
}

#[test]
fn test_serial_pinned_without_runtime() {
    let temp_dir = TempDir::new().unwrap();
    let root = make_test_1(temp_dir.path());

    let digest = compute_serial(&root, sha256(), &CancellationToken::new()).unwrap();
    assert_eq!(digest.to_hex(), TEST_1_SHA256);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_repeated_computations_agree() {
    let temp_dir = TempDir::new().unwrap();
    make_nested_tree(temp_dir.path());

    let hasher = DirectoryHasher::new(sha256());
    let cancel = CancellationToken::new();

    let first = hasher.compute(temp_dir.path(), &cancel).await.unwrap();
    for _ in 0..5 {
        let again = hasher.compute(temp_dir.path(), &cancel).await.unwrap();
        assert_eq!(first, again);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_simultaneous_computations_share_hasher() {
    let temp_dir = TempDir::new().unwrap();
    make_nested_tree(temp_dir.path());

    let hasher = DirectoryHasher::new(sha256());
    let cancel = CancellationToken::new();

    let (a, b, c) = tokio::join!(
        hasher.compute(temp_dir.path(), &cancel),
        hasher.compute(temp_dir.path(), &cancel),
        hasher.compute(temp_dir.path(), &cancel),
    );

    let a = a.unwrap();
    assert_eq!(a, b.unwrap());
    assert_eq!(a, c.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_file_addition_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    make_nested_tree(temp_dir.path());
    let cancel = CancellationToken::new();

    let before = compute(temp_dir.path(), sha256(), &cancel).await.unwrap();
    fs::write(temp_dir.path().join("empty").join("new.txt"), "").unwrap();
    let after = compute(temp_dir.path(), sha256(), &cancel).await.unwrap();

    assert_ne!(before, after);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_empty_file_and_empty_directory_are_indistinguishable() {
    let with_file = TempDir::new().unwrap();
    fs::write(with_file.path().join("x"), "").unwrap();

    let with_dir = TempDir::new().unwrap();
    fs::create_dir(with_dir.path().join("x")).unwrap();

    let cancel = CancellationToken::new();
    let a = compute(with_file.path(), sha256(), &cancel).await.unwrap();
    let b = compute(with_dir.path(), sha256(), &cancel).await.unwrap();

    // Kinds are not encoded, only content digests
    assert_eq!(a, b);
}

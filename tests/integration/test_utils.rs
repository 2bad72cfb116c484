//! Shared fixtures and filesystem wrappers for integration tests

use merklehash::tree::hasher::{self, RustCrypto};
use merklehash::tree::{DigestFactory, FileSystem, OsFileSystem};
use merklehash::types::DirectoryEntry;
use sha2::Sha256;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn sha256() -> Arc<dyn DigestFactory> {
    hasher::factory::<RustCrypto<Sha256>>()
}

/// `<parent>/test-1` holding `a.txt` = "Hello World!"
pub fn make_test_1(parent: &Path) -> PathBuf {
    let root = parent.join("test-1");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.txt"), "Hello World!").unwrap();
    root
}

/// `<parent>/test-2` holding only a `test-1` subdirectory
pub fn make_test_2(parent: &Path) -> PathBuf {
    let root = parent.join("test-2");
    fs::create_dir_all(&root).unwrap();
    make_test_1(&root);
    root
}

/// A few levels of nested directories with files and an empty directory
pub fn make_nested_tree(root: &Path) {
    fs::create_dir_all(root.join("alpha").join("beta").join("gamma")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::create_dir_all(root.join("zeta")).unwrap();
    fs::write(root.join("top.txt"), "top level").unwrap();
    fs::write(root.join("alpha").join("one.txt"), "one").unwrap();
    fs::write(root.join("alpha").join("beta").join("two.bin"), [0u8, 1, 2, 3, 255]).unwrap();
    fs::write(
        root.join("alpha").join("beta").join("gamma").join("three.txt"),
        "three".repeat(1000),
    )
    .unwrap();
    fs::write(root.join("zeta").join("last.txt"), "").unwrap();
}

fn file_name(path: &Path) -> OsString {
    path.file_name().map(OsString::from).unwrap_or_default()
}

/// Filesystem where opening a named file first sleeps for a set time
pub struct DelayedFs {
    inner: Box<dyn FileSystem>,
    delays: HashMap<OsString, Duration>,
}

impl DelayedFs {
    /// Delays over the real filesystem
    pub fn new<I, S>(delays: I) -> Self
    where
        I: IntoIterator<Item = (S, Duration)>,
        S: Into<OsString>,
    {
        Self::over(OsFileSystem, delays)
    }

    /// Delays layered over another test filesystem
    pub fn over<F, I, S>(inner: F, delays: I) -> Self
    where
        F: FileSystem + 'static,
        I: IntoIterator<Item = (S, Duration)>,
        S: Into<OsString>,
    {
        Self {
            inner: Box::new(inner),
            delays: delays.into_iter().map(|(name, d)| (name.into(), d)).collect(),
        }
    }
}

impl FileSystem for DelayedFs {
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
        self.inner.list_children(path)
    }

    fn open_for_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        if let Some(delay) = self.delays.get(&file_name(path)) {
            std::thread::sleep(*delay);
        }
        self.inner.open_for_read(path)
    }

    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        self.inner.is_directory(path)
    }
}

/// Real filesystem that refuses to open or list entries with given names
#[derive(Default)]
pub struct FailingFs {
    pub fail_open: Option<OsString>,
    pub fail_list: Option<OsString>,
}

impl FailingFs {
    pub fn failing_open(name: &str) -> Self {
        Self {
            fail_open: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn failing_list(name: &str) -> Self {
        Self {
            fail_list: Some(name.into()),
            ..Self::default()
        }
    }
}

impl FileSystem for FailingFs {
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
        if self.fail_list.as_ref() == Some(&file_name(path)) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "listing refused"));
        }
        OsFileSystem.list_children(path)
    }

    fn open_for_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        if self.fail_open.as_ref() == Some(&file_name(path)) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "open refused"));
        }
        OsFileSystem.open_for_read(path)
    }

    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        OsFileSystem.is_directory(path)
    }
}

/// Real filesystem that counts every call made through it
#[derive(Default)]
pub struct CountingFs {
    pub listings: AtomicUsize,
    pub opens: AtomicUsize,
    pub stats: AtomicUsize,
}

impl CountingFs {
    pub fn total(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
            + self.opens.load(Ordering::SeqCst)
            + self.stats.load(Ordering::SeqCst)
    }
}

impl FileSystem for CountingFs {
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        OsFileSystem.list_children(path)
    }

    fn open_for_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        OsFileSystem.open_for_read(path)
    }

    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        self.stats.fetch_add(1, Ordering::SeqCst);
        OsFileSystem.is_directory(path)
    }
}

//! Path normalization for digest roots

use std::path::{Component, Path, PathBuf};

/// Make `path` absolute and lexically normalized without touching symlinks.
///
/// This:
/// 1. Joins relative paths onto the current directory
/// 2. Drops `.` components and folds `..` into its parent
/// 3. Strips Windows verbatim prefixes where a plain form exists
///
/// `..` is folded lexically, so `link/..` is its textual parent even when `link` is a
/// symlink. Symlinks themselves are never resolved.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    Ok(dunce::simplified(&normalize_lexically(&absolute)).to_path_buf())
}

/// Remove `.` and resolve `..` against preceding components, purely textually.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `/..` is `/`, matching how the OS treats it
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

//! Single-level directory listing and file preview helpers for the browser.

use crate::fs::aggregate::{dedup_by_name, entry_size};
use crate::fs::entry::{EntryDescriptor, SizeCache};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Descriptors for the direct children of `dir`, one per unique name, sized
/// with [`entry_size`] so directories carry their recursive file totals.
/// Order is whatever the OS returns; callers sort for display.
pub fn first_level(dir: &Path, cache: &SizeCache) -> Vec<EntryDescriptor> {
    child_paths(dir)
        .into_iter()
        .filter_map(|path| describe(&path, cache))
        .collect()
}

/// The unique direct children of `dir`, in OS order.
pub fn child_paths(dir: &Path) -> Vec<PathBuf> {
    let children = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect(),
        Err(err) => {
            warn!(path = %dir.display(), %err, "cannot list directory");
            Vec::new()
        }
    };
    dedup_by_name(children)
}

/// A display descriptor for one path: recursive totals for a directory, own
/// length for a file. `None` if the path cannot be stat'ed.
pub fn describe(path: &PathBuf, cache: &SizeCache) -> Option<EntryDescriptor> {
    let meta = fs::metadata(path).ok()?;
    let size = entry_size(path, &meta, cache);
    let count = if meta.is_dir() {
        count_children(path)
    } else {
        0
    };
    Some(EntryDescriptor::new(path.clone(), &meta, size, count))
}

/// Number of direct entries in a directory. Not recursive; the browser shows
/// this next to each folder as a quick density hint.
pub fn count_children(dir: &Path) -> u64 {
    match fs::read_dir(dir) {
        Ok(entries) => entries.filter(|e| e.is_ok()).count() as u64,
        Err(_) => 0,
    }
}

/// Reads at most `limit` bytes from the head of a file, lossily decoded.
/// The browser caps the preview at roughly one screenful.
pub fn read_preview(path: &Path, limit: usize) -> anyhow::Result<String> {
    let file = fs::File::open(path)?;
    let mut buf = Vec::with_capacity(limit);
    file.take(limit as u64).read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_level_sizes_dirs_recursively() {
        let tmp = TempDir::new().expect("tempdir");
        fs::write(tmp.path().join("top.txt"), "12345").expect("write");
        fs::create_dir(tmp.path().join("sub")).expect("mkdir");
        fs::write(tmp.path().join("sub/inner.txt"), "1234567").expect("write");

        let cache = SizeCache::new();
        let entries = first_level(tmp.path(), &cache);
        assert_eq!(entries.len(), 2);

        let sub = entries.iter().find(|e| e.name() == "sub").expect("sub");
        assert!(sub.is_dir);
        assert_eq!(sub.size, 7);
        assert_eq!(sub.count, 1);

        let top = entries.iter().find(|e| e.name() == "top.txt").expect("top");
        assert!(!top.is_dir);
        assert_eq!(top.size, 5);
    }

    #[test]
    fn count_children_is_not_recursive() {
        let tmp = TempDir::new().expect("tempdir");
        fs::create_dir(tmp.path().join("a")).expect("mkdir");
        fs::write(tmp.path().join("a/deep.txt"), "x").expect("write");
        fs::write(tmp.path().join("b.txt"), "x").expect("write");

        assert_eq!(count_children(tmp.path()), 2);
    }

    #[test]
    fn preview_is_truncated_at_limit() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("big.txt");
        fs::write(&file, "a".repeat(100)).expect("write");

        let contents = read_preview(&file, 10).expect("preview");
        assert_eq!(contents.len(), 10);
    }
}

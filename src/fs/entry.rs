//! Core data structures for representing visited filesystem nodes.

use chrono::{DateTime, Local};
use dashmap::DashMap;
use serde::Serialize;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// An immutable snapshot of one filesystem node.
///
/// For a file, `size` is its own length and `count` is 0. For a directory,
/// `size` is the sum of all descendant file sizes and `count` the number of
/// descendant files (directories are never counted, and contribute 0 bytes
/// of their own). `modified` is captured at descriptor-creation time.
#[derive(Debug, Clone, Serialize)]
pub struct EntryDescriptor {
    pub path: PathBuf,
    pub size: u64,
    pub count: u64,
    pub is_dir: bool,
    pub modified: Option<DateTime<Local>>,
}

impl EntryDescriptor {
    pub fn new(path: PathBuf, meta: &Metadata, size: u64, count: u64) -> Self {
        Self {
            path,
            size,
            count,
            is_dir: meta.is_dir(),
            modified: meta.modified().ok().map(DateTime::from),
        }
    }

    /// Leaf-name convenience for display code.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Process-lifetime memoization map from path to [`EntryDescriptor`].
///
/// Shared across all concurrent aggregation branches of a traversal, so the
/// map must be concurrency-safe. Inserts are first-writer-wins: descriptors
/// are pure functions of path + metadata snapshot, so losing a racing insert
/// only wastes the recomputation. No eviction, no TTL, no persistence;
/// absence is an ordinary miss.
#[derive(Debug, Default)]
pub struct SizeCache {
    map: DashMap<PathBuf, EntryDescriptor>,
}

impl SizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<EntryDescriptor> {
        self.map.get(path).map(|entry| entry.value().clone())
    }

    /// Inserts the descriptor unless one already exists for its path.
    pub fn insert(&self, descriptor: EntryDescriptor) {
        self.map
            .entry(descriptor.path.clone())
            .or_insert(descriptor);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn descriptor(path: &Path, size: u64) -> EntryDescriptor {
        let meta = fs::metadata(path).expect("stat");
        EntryDescriptor::new(path.to_path_buf(), &meta, size, 0)
    }

    #[test]
    fn miss_then_hit() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("a.txt");
        fs::write(&file, "hello").expect("write");

        let cache = SizeCache::new();
        assert!(cache.get(&file).is_none());

        cache.insert(descriptor(&file, 5));
        assert_eq!(cache.get(&file).map(|d| d.size), Some(5));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_is_first_writer_wins() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("a.txt");
        fs::write(&file, "hello").expect("write");

        let cache = SizeCache::new();
        cache.insert(descriptor(&file, 5));
        cache.insert(descriptor(&file, 999));

        assert_eq!(cache.get(&file).map(|d| d.size), Some(5));
        assert_eq!(cache.len(), 1);
    }
}

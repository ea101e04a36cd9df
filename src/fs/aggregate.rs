//! Concurrent recursive directory-size aggregation.
//!
//! [`aggregate`] walks a subtree and produces one [`EntryDescriptor`] per
//! node, flattened into a single list with the root's descriptor last. All
//! filesystem work runs on a dedicated rayon pool of `2 × CPU` threads, the
//! global bound on in-flight branches; within one directory every child is
//! joined before the directory's own aggregate is emitted, so a parent never
//! reports before its subtree is complete.
//!
//! Failure policy: stat and read-dir errors are absorbed as zero-size/empty
//! at the node where they occur and never abort sibling or ancestor work.

use crate::fs::entry::{EntryDescriptor, SizeCache};
use dashmap::DashSet;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::collections::HashSet;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};
use walkdir::WalkDir;

static SCAN_POOL: Lazy<ThreadPool> = Lazy::new(|| {
    ThreadPoolBuilder::new()
        .num_threads(num_cpus::get() * 2)
        .thread_name(|i| format!("dirscope-scan-{i}"))
        .build()
        .expect("failed to build scan thread pool")
});

static ACTIVE_SCANS: AtomicUsize = AtomicUsize::new(0);
static MAX_ACTIVE_SCANS: AtomicUsize = AtomicUsize::new(0);

/// The shared pool all aggregation branches run on.
pub fn scan_pool() -> &'static ThreadPool {
    &SCAN_POOL
}

/// Number of branches currently doing filesystem work.
pub fn active_scans() -> usize {
    ACTIVE_SCANS.load(Ordering::SeqCst)
}

/// High-water mark of simultaneously active branches.
pub fn max_active_scans() -> usize {
    MAX_ACTIVE_SCANS.load(Ordering::SeqCst)
}

struct ScanGuard;

impl ScanGuard {
    fn enter() -> Self {
        let active = ACTIVE_SCANS.fetch_add(1, Ordering::SeqCst) + 1;
        MAX_ACTIVE_SCANS.fetch_max(active, Ordering::SeqCst);
        ScanGuard
    }
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        ACTIVE_SCANS.fetch_sub(1, Ordering::SeqCst);
    }
}

/// One child's contribution to its parent directory.
struct Branch {
    size: u64,
    count: u64,
    descriptors: Vec<EntryDescriptor>,
}

impl Branch {
    fn empty() -> Self {
        Branch {
            size: 0,
            count: 0,
            descriptors: Vec::new(),
        }
    }
}

/// Recursively aggregates `root`, producing descriptors for it and every
/// descendant. Recursive sub-calls reuse `cache`, so repeat visits
/// short-circuit; the cache never changes the root's totals, only the work
/// done to compute them.
///
/// A missing or unreadable root yields an empty result. A plain-file root
/// yields a single descriptor with `count = 0`.
pub fn aggregate(root: &Path, cache: &SizeCache) -> Vec<EntryDescriptor> {
    let meta = match fs::metadata(root) {
        Ok(meta) => meta,
        Err(err) => {
            warn!(path = %root.display(), %err, "cannot stat aggregation root");
            return Vec::new();
        }
    };

    if !meta.is_dir() {
        let size = meta.len();
        let descriptor = EntryDescriptor::new(root.to_path_buf(), &meta, size, 0);
        cache.insert(descriptor.clone());
        return vec![descriptor];
    }

    // Visited canonical directories, shared across the whole traversal so a
    // symlink cycle terminates instead of recursing forever.
    let visited: DashSet<PathBuf> = DashSet::new();
    if let Ok(canonical) = fs::canonicalize(root) {
        visited.insert(canonical);
    }

    scan_pool().install(|| aggregate_dir(root, &meta, cache, &visited))
}

fn aggregate_dir(
    dir: &Path,
    meta: &Metadata,
    cache: &SizeCache,
    visited: &DashSet<PathBuf>,
) -> Vec<EntryDescriptor> {
    let children = dedup_by_name(list_dir(dir));

    // Fork: one branch per child. Join: the collect blocks until every
    // branch (transitively) finishes, which is the barrier that makes the
    // parent descriptor causally follow all of its descendants.
    let branches: Vec<Branch> = children
        .par_iter()
        .map(|child| child_branch(child, cache, visited))
        .collect();

    let mut total_size: u64 = 0;
    let mut total_count: u64 = 0;
    let mut descriptors = Vec::new();
    for branch in branches {
        total_size += branch.size;
        total_count += branch.count;
        descriptors.extend(branch.descriptors);
    }

    let own = EntryDescriptor::new(dir.to_path_buf(), meta, total_size, total_count);
    cache.insert(own.clone());
    descriptors.push(own);
    descriptors
}

fn child_branch(path: &Path, cache: &SizeCache, visited: &DashSet<PathBuf>) -> Branch {
    let stat = {
        let _guard = ScanGuard::enter();
        fs::metadata(path)
    };
    let meta = match stat {
        Ok(meta) => meta,
        Err(err) => {
            debug!(path = %path.display(), %err, "skipping unreadable entry");
            return Branch::empty();
        }
    };

    if meta.is_dir() {
        if let Some(hit) = cache.get(path) {
            return Branch {
                size: hit.size,
                count: hit.count,
                descriptors: vec![hit],
            };
        }

        match fs::canonicalize(path) {
            Ok(canonical) => {
                if !visited.insert(canonical) {
                    warn!(path = %path.display(), "directory cycle detected, skipping");
                    return Branch::empty();
                }
            }
            Err(err) => {
                debug!(path = %path.display(), %err, "cannot canonicalize directory");
                return Branch::empty();
            }
        }

        let descriptors = aggregate_dir(path, &meta, cache, visited);
        // aggregate_dir always appends the directory's own descriptor last.
        let (size, count) = descriptors
            .last()
            .map(|d| (d.size, d.count))
            .unwrap_or((0, 0));
        Branch {
            size,
            count,
            descriptors,
        }
    } else {
        let descriptor = cache.get(path).unwrap_or_else(|| {
            let d = EntryDescriptor::new(path.to_path_buf(), &meta, meta.len(), 0);
            cache.insert(d.clone());
            d
        });
        Branch {
            size: descriptor.size,
            count: 1,
            descriptors: vec![descriptor],
        }
    }
}

fn list_dir(dir: &Path) -> Vec<PathBuf> {
    // The guard spans only the syscall, never the recursion, so each pool
    // thread holds at most one at a time and the high-water mark tracks
    // threads actually touching the filesystem.
    let _guard = ScanGuard::enter();
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect(),
        Err(err) => {
            warn!(path = %dir.display(), %err, "cannot list directory");
            Vec::new()
        }
    }
}

/// Collapses listings that repeat a file name; duplicate OS-level records
/// must not double-count a child's size. First occurrence wins.
pub fn dedup_by_name(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::with_capacity(paths.len());
    paths
        .into_iter()
        .filter(|path| match path.file_name() {
            Some(name) => seen.insert(name.to_os_string()),
            None => false,
        })
        .collect()
}

/// File-only size and count of a single directory, consulting and filling
/// `cache` per file. Used by the browser to size one visible entry without
/// building the full descriptor list. Symlinks are not followed.
pub fn folder_info(path: &Path, cache: &SizeCache) -> (u64, u64) {
    if let Some(hit) = cache.get(path) {
        return (hit.size, hit.count);
    }

    let mut size: u64 = 0;
    let mut count: u64 = 0;
    for entry in WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !e.path_is_symlink())
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(hit) = cache.get(entry.path()) {
            size += hit.size;
            count += 1;
            continue;
        }
        if let Ok(meta) = entry.metadata() {
            size += meta.len();
            count += 1;
            cache.insert(EntryDescriptor::new(
                entry.path().to_path_buf(),
                &meta,
                meta.len(),
                0,
            ));
        }
    }
    (size, count)
}

/// Size of one entry as the browser displays it: a file's own length, or a
/// directory's recursive file total.
pub fn entry_size(path: &Path, meta: &Metadata, cache: &SizeCache) -> u64 {
    if meta.is_dir() {
        folder_info(path, cache).0
    } else {
        meta.len()
    }
}

/// Whether a directory has no entries at all. Unreadable counts as non-empty
/// so cleanup workflows never delete something they could not inspect.
pub fn is_empty_dir(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let paths = vec![
            PathBuf::from("/tmp/x/a.txt"),
            PathBuf::from("/tmp/x/b.txt"),
            PathBuf::from("/tmp/x/a.txt"),
        ];
        let unique = dedup_by_name(paths);
        assert_eq!(
            unique,
            vec![PathBuf::from("/tmp/x/a.txt"), PathBuf::from("/tmp/x/b.txt")]
        );
    }

    #[test]
    fn dedup_ignores_nameless_paths() {
        let unique = dedup_by_name(vec![PathBuf::from("/")]);
        assert!(unique.is_empty());
    }
}

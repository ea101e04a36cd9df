//! Background refresh and preview threads for the browser.
//!
//! A refresh snapshots one directory level off the render thread and streams
//! progress back over an mpsc channel. Starting a new refresh replaces the
//! state's receiver; the superseded thread keeps running but its sends fail
//! and its results are dropped, so the screen only ever shows the newest
//! request. A shared gate mutex keeps two refreshes from walking the
//! filesystem at the same time.
//!
//! Each refresh sizes entries through its own short-lived cache, so every
//! listing reflects the filesystem as it is now; memoization only collapses
//! repeat visits within a single snapshot.

use crate::fs::listing::{child_paths, count_children, describe, read_preview};
use crate::fs::SizeCache;
use crate::tui::state::{
    BrowserEntry, BrowserMode, BrowserState, LoadingInfo, RefreshMessage, SortMode,
};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::debug;

/// Bytes of a file shown in the preview pane.
pub const PREVIEW_LIMIT: usize = 8192;

pub fn start_refresh(state: &mut BrowserState) {
    let (tx, rx) = mpsc::channel();
    state.refresh_rx = Some(rx);
    state.mode = BrowserMode::Loading;
    state.loading = Some(LoadingInfo::default());

    let path = state.current_path.clone();
    let gate = Arc::clone(&state.refresh_gate);
    let sort = state.sort;

    thread::spawn(move || {
        let _guard = gate.lock().unwrap_or_else(|e| e.into_inner());
        run_refresh(&path, sort, &tx);
    });
}

fn run_refresh(dir: &Path, sort: SortMode, tx: &Sender<RefreshMessage>) {
    let started = Instant::now();
    // Fresh per-refresh cache: totals are recomputed from the live tree.
    let cache = SizeCache::new();
    let children = child_paths(dir);
    let total = children.len();

    let mut entries: Vec<BrowserEntry> = Vec::with_capacity(total + 1);
    for (done, child) in children.into_iter().enumerate() {
        let progress = RefreshMessage::Progress(LoadingInfo {
            done,
            total,
            current: Some(child.clone()),
        });
        if tx.send(progress).is_err() {
            // Superseded by a newer refresh.
            debug!(path = %dir.display(), "refresh abandoned");
            return;
        }
        if let Some(descriptor) = describe(&child, &cache) {
            entries.push(descriptor.into());
        }
    }

    sort_browser_entries(&mut entries, sort);
    if let Some(up) = parent_entry(dir) {
        entries.insert(0, up);
    }

    let _ = tx.send(RefreshMessage::Listing {
        entries,
        elapsed: started.elapsed(),
    });
}

/// The synthetic ".." row: zero size, direct child count of the parent.
fn parent_entry(dir: &Path) -> Option<BrowserEntry> {
    let parent = dir.parent()?;
    Some(BrowserEntry {
        name: "..".to_string(),
        path: parent.to_path_buf(),
        size: 0,
        count: count_children(parent),
        is_dir: true,
        modified: None,
    })
}

/// Sorts listing rows, leaving any ".." row alone (it is inserted after).
pub fn sort_browser_entries(entries: &mut [BrowserEntry], sort: SortMode) {
    match sort {
        SortMode::SizeDesc => entries.sort_by(|a, b| b.size.cmp(&a.size)),
        SortMode::NameAsc => entries.sort_by_key(|e| e.name.to_lowercase()),
    }
}

pub fn start_preview(state: &mut BrowserState, path: PathBuf) {
    let (tx, rx) = mpsc::channel();
    state.refresh_rx = Some(rx);
    state.preview_path = Some(path.clone());

    thread::spawn(move || {
        let contents = match read_preview(&path, PREVIEW_LIMIT) {
            Ok(contents) => contents,
            Err(err) => format!("cannot read {}: {}", path.display(), err),
        };
        let _ = tx.send(RefreshMessage::Preview { contents });
    });
}

/// Drains every pending message from the current refresh into the state.
/// Called once per frame before drawing.
pub fn poll_refresh(state: &mut BrowserState) {
    let Some(rx) = &state.refresh_rx else {
        return;
    };

    let mut received = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        received.push(msg);
    }

    for msg in received {
        match msg {
            RefreshMessage::Progress(info) => {
                state.loading = Some(info);
            }
            RefreshMessage::Listing { entries, elapsed } => {
                state.entries = entries;
                state.loading = None;
                state.last_elapsed = Some(elapsed);
                state.updated_at = Some(Local::now());
                if state.mode == BrowserMode::Loading {
                    state.mode = BrowserMode::Listing;
                }
            }
            RefreshMessage::Preview { contents } => {
                state.preview = Some(contents);
                state.mode = BrowserMode::FileView;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, size: u64) -> BrowserEntry {
        BrowserEntry {
            name: name.to_string(),
            path: PathBuf::from(name),
            size,
            count: 0,
            is_dir: false,
            modified: None,
        }
    }

    #[test]
    fn size_sort_is_descending() {
        let mut rows = vec![row("a", 1), row("b", 9), row("c", 5)];
        sort_browser_entries(&mut rows, SortMode::SizeDesc);
        let sizes: Vec<u64> = rows.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![9, 5, 1]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut rows = vec![row("Zed", 0), row("apple", 0)];
        sort_browser_entries(&mut rows, SortMode::NameAsc);
        assert_eq!(rows[0].name, "apple");
    }
}

//! Batch-mode output pipeline: filter, sort, then render as text or JSON.

pub mod json;
pub mod terminal;

pub use json::render as render_json;
pub use terminal::render as render_terminal;

use crate::cli::{Args, SortKey};
use crate::fs::EntryDescriptor;
use std::collections::HashSet;
use std::path::PathBuf;

const LARGE_THRESHOLD: u64 = 1_000_000_000;

/// Applies the listing filters from the command line to one entry.
pub fn passes_filters(entry: &EntryDescriptor, args: &Args) -> bool {
    if args.files_only && entry.is_dir {
        return false;
    }
    if args.no_empty && entry.size == 0 {
        return false;
    }
    if args.large && entry.size < LARGE_THRESHOLD {
        return false;
    }
    entry.size >= args.min_size && entry.size <= args.max_size
}

/// Sorts the listing in place. `Name` is case-insensitive ascending, `Size`
/// ascending so the largest entries land at the bottom of terminal output,
/// `Modified` newest-first, `None` keeps traversal order. `reverse` flips
/// whichever order was picked.
pub fn sort_entries(entries: &mut [EntryDescriptor], key: SortKey, reverse: bool) {
    match key {
        SortKey::Size => entries.sort_by_key(|e| e.size),
        SortKey::Modified => entries.sort_by(|a, b| b.modified.cmp(&a.modified)),
        SortKey::Name => entries.sort_by_key(|e| e.path.to_string_lossy().to_lowercase()),
        SortKey::None => {}
    }
    if reverse {
        entries.reverse();
    }
}

/// Filters, dedups by path (first occurrence wins) and sorts a raw descriptor
/// list into its final display order.
pub fn prepare(mut entries: Vec<EntryDescriptor>, args: &Args, key: SortKey) -> Vec<EntryDescriptor> {
    let mut seen: HashSet<PathBuf> = HashSet::with_capacity(entries.len());
    entries.retain(|e| passes_filters(e, args) && seen.insert(e.path.clone()));
    sort_entries(&mut entries, key, args.reverse);
    entries
}

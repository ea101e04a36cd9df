//! Filesystem inspection core: descriptors, the size cache, the concurrent
//! recursive aggregator and the single-level listing used by the browser.

pub mod aggregate;
pub mod entry;
pub mod listing;

pub use aggregate::{aggregate, entry_size, folder_info, is_empty_dir};
pub use entry::{EntryDescriptor, SizeCache};

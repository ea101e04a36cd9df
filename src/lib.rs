//! Library crate for dirscope.
//!
//! Exposes the modules needed by the binary and by integration tests:
//!
//! - [`fs`]: size cache, concurrent recursive aggregation, single-level listing
//! - [`output`]: sorting, filtering and rendering of batch-mode listings
//! - [`tui`]: the interactive directory browser
//! - [`cli`], [`config`], [`history`], [`logging`], [`utils`]: ambient glue

pub mod cli;
pub mod config;
pub mod fs;
pub mod history;
pub mod logging;
pub mod output;
pub mod tui;
pub mod utils;

pub use cli::Args;
pub use fs::{EntryDescriptor, SizeCache};

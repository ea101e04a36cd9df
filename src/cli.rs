//! CLI interface definitions for `dirscope`.
//!
//! This module defines command-line arguments using [`clap`] and exposes:
//!
//! - [`Args`]: the main struct parsed from CLI inputs
//! - [`SortKey`]: sorting options for batch-mode listings
//! - [`OutputFormat`]: human or JSON rendering
//!
//! # Example
//!
//! ```bash
//! dirscope ~/Downloads --sort size --humanize
//! dirscope ~/Downloads --browse
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Command-line arguments for the `dirscope` directory inspector.
#[derive(Parser, Debug)]
#[command(name = "dirscope")]
#[command(about = "Inspect directory-tree sizes, in batch or in an interactive browser")]
#[command(version)]
pub struct Args {
    /// Directory (or file) to inspect (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Launch the interactive terminal browser instead of printing a listing
    #[arg(short = 'b', long)]
    pub browse: bool,

    /// Only show the first level of the file tree
    #[arg(short = 'f', long)]
    pub first_only: bool,

    /// Sort order for the listing (defaults to the configured value)
    #[arg(short = 'S', long, value_enum)]
    pub sort: Option<SortKey>,

    /// Reverse the order of the listing
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Humanize file sizes (e.g. "1.5 MB" instead of raw bytes)
    #[arg(short = 'z', long)]
    pub humanize: bool,

    /// Only show entry names, no sizes
    #[arg(short = 'n', long)]
    pub names_only: bool,

    /// Only print files, exclude all directories
    #[arg(short = 'F', long)]
    pub files_only: bool,

    /// Don't show empty files and folders
    #[arg(short = 'e', long)]
    pub no_empty: bool,

    /// Only print entries of 1 GB or more
    #[arg(short = 'G', long)]
    pub large: bool,

    /// Only show entries larger than or equal to this many bytes
    #[arg(long, default_value_t = 0)]
    pub min_size: u64,

    /// Only show entries smaller than or equal to this many bytes
    #[arg(long, default_value_t = u64::MAX)]
    pub max_size: u64,

    /// Show verbose entry details (descendant counts, modified times)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Delete empty directories found under the path
    #[arg(long)]
    pub rm_empty: bool,

    /// Answer yes to all prompts
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Suppress non-listing output such as the timing line
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Output format for the listing
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Write the listing to a file instead of stdout (JSON format only)
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Print the last N recorded deletions and exit
    #[arg(long, value_name = "N")]
    pub history: Option<usize>,
}

/// How to sort batch-mode listings.
///
/// `Name` is case-insensitive ascending, `Size` ascending (largest last, the
/// most useful tail for terminal output), `Modified` newest-first, `None`
/// keeps traversal order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Size,
    Modified,
    Name,
    None,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

//! File-backed diagnostic logging.
//!
//! All components log through [`tracing`]; the subscriber writes to an
//! append-only file in the data directory so the TUI's alternate screen is
//! never polluted. `DIRSCOPE_LOG` overrides the default `info` filter.

use crate::config::Config;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Degrades to no logging if the log file
/// cannot be opened; diagnostics are never worth failing the run for.
pub fn init() {
    let log_path = Config::data_dir().join("dirscope.log");

    if let Some(parent) = log_path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_env("DIRSCOPE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

//! JSON listing renderer, for piping into other tools.

use crate::cli::Args;
use crate::fs::EntryDescriptor;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;

/// Serializes pre-filtered, pre-sorted entries as a pretty-printed JSON
/// array, to `--out` when given or stdout otherwise.
pub fn render(entries: &[EntryDescriptor], args: &Args) -> Result<()> {
    let body = serde_json::to_string_pretty(entries)?;

    match &args.out {
        Some(path) => fs::write(path, body)
            .with_context(|| format!("failed to write listing to {}", path.display()))?,
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{}", body)?;
        }
    }
    Ok(())
}

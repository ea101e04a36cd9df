//! Human-readable listing renderer.

use crate::cli::Args;
use crate::fs::EntryDescriptor;
use crate::utils::format_size;
use anyhow::Result;
use std::io::Write;

/// Renders pre-filtered, pre-sorted entries one per line.
///
/// Default is `SIZE PATH`; `--names-only` drops the size column and
/// `--verbose` adds the descendant count and modification time.
pub fn render(entries: &[EntryDescriptor], args: &Args) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for entry in entries {
        writeln!(out, "{}", format_line(entry, args))?;
    }
    Ok(())
}

fn format_line(entry: &EntryDescriptor, args: &Args) -> String {
    if args.names_only {
        return entry.path.display().to_string();
    }

    let size = format_size(entry.size, args.humanize);
    if args.verbose {
        let modified = entry
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        let kind = if entry.is_dir { "dir " } else { "file" };
        format!(
            "{:<10} {} {:>6} {} {}",
            size,
            kind,
            entry.count,
            modified,
            entry.path.display()
        )
    } else {
        format!("{:<10} {}", size, entry.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    fn entry(size: u64) -> EntryDescriptor {
        EntryDescriptor {
            path: Path::new("/tmp/sample").to_path_buf(),
            size,
            count: 3,
            is_dir: true,
            modified: None,
        }
    }

    #[test]
    fn default_line_is_size_then_path() {
        let args = Args::parse_from(["dirscope"]);
        let line = format_line(&entry(42), &args);
        assert!(line.starts_with("42"));
        assert!(line.ends_with(" /tmp/sample"));
    }

    #[test]
    fn names_only_drops_the_size() {
        let args = Args::parse_from(["dirscope", "--names-only"]);
        assert_eq!(format_line(&entry(42), &args), "/tmp/sample");
    }

    #[test]
    fn verbose_line_includes_count() {
        let args = Args::parse_from(["dirscope", "--verbose"]);
        let line = format_line(&entry(42), &args);
        assert!(line.contains("dir "));
        assert!(line.contains('3'));
    }
}

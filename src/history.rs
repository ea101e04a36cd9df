//! Append-only log of destructive actions.
//!
//! Every delete the tool performs, from the browser or from `--rm-empty`, is
//! recorded here so a surprised user can reconstruct what happened.

use crate::config::Config;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub path: PathBuf,
    pub size: Option<u64>,
}

impl HistoryEntry {
    pub fn new(action: impl Into<String>, path: PathBuf) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            path,
            size: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn to_log_line(&self) -> String {
        let size_str = self
            .size
            .map(|s| format!(" size={}", s))
            .unwrap_or_default();
        format!(
            "{} {} {}{}\n",
            self.timestamp.to_rfc3339(),
            self.action,
            self.path.display(),
            size_str
        )
    }
}

pub struct HistoryLogger {
    log_path: PathBuf,
}

impl HistoryLogger {
    pub fn new() -> Self {
        Self {
            log_path: Config::data_dir().join("history.log"),
        }
    }

    /// A logger writing somewhere other than the default data directory.
    pub fn at(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn log(&self, entry: &HistoryEntry) -> Result<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        write!(file, "{}", entry.to_log_line())?;
        Ok(())
    }

    pub fn log_delete(&self, path: &Path, size: Option<u64>) -> Result<()> {
        let mut entry = HistoryEntry::new("DELETE", path.to_path_buf());
        if let Some(s) = size {
            entry = entry.with_size(s);
        }
        self.log(&entry)
    }

    /// Most-recent-first when limited, oldest-first otherwise.
    pub fn read_history(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)?;
        let entries: Vec<HistoryEntry> =
            content.lines().filter_map(Self::parse_line).collect();

        let result = if let Some(n) = limit {
            entries.into_iter().rev().take(n).collect()
        } else {
            entries
        };

        Ok(result)
    }

    fn parse_line(line: &str) -> Option<HistoryEntry> {
        let parts: Vec<&str> = line.splitn(4, ' ').collect();
        if parts.len() < 3 {
            return None;
        }

        let timestamp = DateTime::parse_from_rfc3339(parts[0])
            .ok()?
            .with_timezone(&Utc);
        let size = parts
            .get(3)
            .and_then(|s| s.strip_prefix("size=").and_then(|s| s.parse::<u64>().ok()));

        Some(HistoryEntry {
            timestamp,
            action: parts[1].to_string(),
            path: PathBuf::from(parts[2]),
            size,
        })
    }
}

impl Default for HistoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn log_then_read_round_trip() {
        let tmp = TempDir::new().expect("tempdir");
        let logger = HistoryLogger::at(tmp.path().join("history.log"));

        logger
            .log_delete(Path::new("/tmp/victim"), Some(42))
            .expect("log");
        logger.log_delete(Path::new("/tmp/other"), None).expect("log");

        let all = logger.read_history(None).expect("read");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].action, "DELETE");
        assert_eq!(all[0].path, PathBuf::from("/tmp/victim"));
        assert_eq!(all[0].size, Some(42));
        assert_eq!(all[1].size, None);
    }

    #[test]
    fn limited_read_is_most_recent_first() {
        let tmp = TempDir::new().expect("tempdir");
        let logger = HistoryLogger::at(tmp.path().join("history.log"));

        logger.log_delete(Path::new("/a"), None).expect("log");
        logger.log_delete(Path::new("/b"), None).expect("log");
        logger.log_delete(Path::new("/c"), None).expect("log");

        let recent = logger.read_history(Some(2)).expect("read");
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].path, PathBuf::from("/c"));
        assert_eq!(recent[1].path, PathBuf::from("/b"));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let tmp = TempDir::new().expect("tempdir");
        let log = tmp.path().join("history.log");
        std::fs::write(&log, "not a log line\n").expect("write");

        let logger = HistoryLogger::at(log);
        assert!(logger.read_history(None).expect("read").is_empty());
    }
}

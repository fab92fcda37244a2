//! Append-only latency log.
//!
//! One line per event, format:
//!
//! ```text
//! <timestamp>: <key>=<value>ms[, <key>=<value>ms]
//! ```
//!
//! The file is never truncated; opening a session appends a
//! `=== Session Started <timestamp> ===` marker. Write errors propagate to
//! the caller, which only reports them.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    /// Open (or create) the log at `path` and append the session-start
    /// marker. Creates the parent directory if absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let log = Self { path };
        log.append_raw(&format!(
            "\n=== Session Started {} ===\n",
            Local::now().format(TIMESTAMP_FORMAT)
        ))?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped latency line, e.g. `append(&[("STT", 412)])`
    /// produces `2026-08-25 10:30:00: STT=412ms`.
    pub fn append(&self, entries: &[(&str, u128)]) -> Result<()> {
        let values = entries
            .iter()
            .map(|(key, millis)| format!("{key}={millis}ms"))
            .collect::<Vec<_>>()
            .join(", ");
        self.append_raw(&format!(
            "{}: {values}\n",
            Local::now().format(TIMESTAMP_FORMAT)
        ))
    }

    fn append_raw(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_appends_a_session_start_marker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("LatencyLog.txt");
        EventLog::open(&path).expect("open log");

        let contents = fs::read_to_string(&path).expect("read log");
        assert!(contents.contains("=== Session Started "));
        assert!(contents.ends_with(" ===\n"));
    }

    #[test]
    fn reopening_never_truncates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("LatencyLog.txt");
        let log = EventLog::open(&path).expect("first session");
        log.append(&[("STT", 412)]).expect("append");
        EventLog::open(&path).expect("second session");

        let contents = fs::read_to_string(&path).expect("read log");
        assert!(contents.contains("STT=412ms"));
        assert_eq!(contents.matches("=== Session Started ").count(), 2);
    }

    #[test]
    fn single_entry_line_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("LatencyLog.txt");
        let log = EventLog::open(&path).expect("open log");
        log.append(&[("STT", 412)]).expect("append");

        let contents = fs::read_to_string(&path).expect("read log");
        let line = contents.lines().last().expect("latency line");
        assert!(line.ends_with(": STT=412ms"), "bad line: {line}");
    }

    #[test]
    fn multi_entry_line_joins_with_comma() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("LatencyLog.txt");
        let log = EventLog::open(&path).expect("open log");
        log.append(&[("TTS", 88), ("Manual RoundTrip", 975)])
            .expect("append");

        let contents = fs::read_to_string(&path).expect("read log");
        let line = contents.lines().last().expect("latency line");
        assert!(
            line.ends_with(": TTS=88ms, Manual RoundTrip=975ms"),
            "bad line: {line}"
        );
    }

    #[test]
    fn open_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("deeper").join("LatencyLog.txt");
        EventLog::open(&path).expect("open log");
        assert!(path.exists());
    }
}

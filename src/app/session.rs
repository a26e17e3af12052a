// LogTail - app/session.rs
//
// Per-caller view of one configured logfile.
//
// A session keeps two independent cursors over the same file:
//   - the dump cursor, advanced by `dump` (the live text view), and
//   - the summary cursor, advanced by `summarize` (running line counts).
// Reading one never moves the other.
//
// Sessions are plain data. Callers sharing a session across threads wrap it
// in a lock (see `app::registry`), which serialises every tail on both
// cursors for the whole scan-and-read.

use crate::app::tail;
use crate::core::model::{LineCounts, TailCursor, TailMode};
use crate::core::patterns::LinePatterns;
use crate::util::error::TailError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One caller's dump and summary state for one logfile.
#[derive(Debug)]
pub struct LoggerSession {
    /// Configured logfile name, e.g. "/logs/error.log".
    logfile: String,
    patterns: Arc<LinePatterns>,
    dump_cursor: TailCursor,
    summary_cursor: TailCursor,
    /// Totals over every line counted since creation or the last reset.
    counts: LineCounts,
}

impl LoggerSession {
    /// Create a session reading `path` with a `size_cap` byte cold-read window.
    pub fn new(
        logfile: impl Into<String>,
        path: impl Into<PathBuf>,
        patterns: Arc<LinePatterns>,
        size_cap: u64,
    ) -> Result<Self, TailError> {
        let path = path.into();
        Ok(Self {
            logfile: logfile.into(),
            patterns,
            dump_cursor: TailCursor::new(path.clone(), size_cap)?,
            summary_cursor: TailCursor::new(path, size_cap)?,
            counts: LineCounts::default(),
        })
    }

    pub fn logfile(&self) -> &str {
        &self.logfile
    }

    pub fn path(&self) -> &Path {
        self.dump_cursor.path()
    }

    /// Running counts as of the last `summarize`.
    pub fn counts(&self) -> LineCounts {
        self.counts
    }

    pub fn dump_offset(&self) -> u64 {
        self.dump_cursor.offset()
    }

    pub fn summary_offset(&self) -> u64 {
        self.summary_cursor.offset()
    }

    /// I/O failures seen by either cursor.
    pub fn failures(&self) -> u64 {
        self.dump_cursor.failures() + self.summary_cursor.failures()
    }

    /// Lines appended since the last dump. `reset` re-reads the trailing window.
    pub fn dump(&mut self, reset: bool) -> Vec<String> {
        tail::tail(&mut self.dump_cursor, TailMode::Dump, reset).lines
    }

    /// Count lines appended since the last summary and return the running totals.
    pub fn summarize(&mut self) -> LineCounts {
        let result = tail::tail(
            &mut self.summary_cursor,
            TailMode::Summarize(&self.patterns),
            false,
        );
        self.counts += result.counts;
        self.counts
    }

    /// Rewind both cursors and zero the running counts.
    pub fn reset(&mut self) {
        self.dump_cursor.set_offset(0);
        self.summary_cursor.set_offset(0);
        self.counts = LineCounts::default();
        tracing::debug!(logfile = %self.logfile, "Session reset");
    }
}

/// Whether a `Cache-Control` header value asks for a fresh read.
///
/// Any directive containing "no" (`no-cache`, `no-store`) counts.
pub fn reset_requested(cache_control: Option<&str>) -> bool {
    cache_control.is_some_and(|value| value.contains("no"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, OpenOptions};
    use std::io::Write;
    use tempfile::TempDir;

    fn session_for(dir: &TempDir, content: &str) -> LoggerSession {
        let path = dir.path().join("error.log");
        fs::write(&path, content).unwrap();
        LoggerSession::new(
            "/logs/error.log",
            path,
            Arc::new(LinePatterns::default()),
            1_000,
        )
        .unwrap()
    }

    fn append(session: &LoggerSession, text: &str) {
        let mut f = OpenOptions::new().append(true).open(session.path()).unwrap();
        f.write_all(text.as_bytes()).unwrap();
    }

    #[test]
    fn test_dump_and_summary_cursors_are_independent() {
        let dir = TempDir::new().unwrap();
        let mut session = session_for(&dir, "*ERROR* a\nplain\n");

        assert_eq!(session.dump(true), vec!["*ERROR* a", "plain"]);
        assert_eq!(session.summary_offset(), 0);

        let counts = session.summarize();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.errors, 1);
        assert_eq!(session.dump_offset(), session.summary_offset());
    }

    #[test]
    fn test_summary_counts_only_new_lines() {
        let dir = TempDir::new().unwrap();
        let mut session = session_for(&dir, "*WARN* one\n");
        assert_eq!(session.summarize().warnings, 1);

        append(&session, "*WARN* two\n*ERROR* three\n");
        let counts = session.summarize();
        assert_eq!(
            counts,
            LineCounts {
                total: 3,
                errors: 1,
                warnings: 2
            }
        );

        // Nothing appended: totals stay put.
        assert_eq!(session.summarize(), counts);
    }

    #[test]
    fn test_reset_rewinds_and_zeroes() {
        let dir = TempDir::new().unwrap();
        let mut session = session_for(&dir, "*ERROR* x\n");
        session.dump(false);
        session.summarize();

        session.reset();
        assert_eq!(session.counts(), LineCounts::default());
        assert_eq!(session.dump_offset(), 0);
        assert_eq!(session.summarize().errors, 1);
        assert_eq!(session.dump(false), vec!["*ERROR* x"]);
    }

    #[test]
    fn test_removed_file_counts_failure() {
        let dir = TempDir::new().unwrap();
        let mut session = session_for(&dir, "a\n");
        session.dump(false);
        fs::remove_file(session.path()).unwrap();

        assert!(session.dump(false).is_empty());
        assert_eq!(session.dump_offset(), 0);
        assert_eq!(session.failures(), 1);
    }

    #[test]
    fn test_zero_cap_rejected() {
        let result = LoggerSession::new(
            "/logs/error.log",
            "error.log",
            Arc::new(LinePatterns::default()),
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_reset_requested() {
        assert!(reset_requested(Some("no-cache")));
        assert!(reset_requested(Some("max-age=0, no-store")));
        assert!(!reset_requested(Some("max-age=60")));
        assert!(!reset_requested(None));
    }
}

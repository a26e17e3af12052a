// LogTail - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no platform
// dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::core::patterns::LinePatterns;
use crate::util::error::TailError;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

// =============================================================================
// Tail cursor
// =============================================================================

/// Caller-held read position in one log file.
///
/// The offset is only ever advanced by the tail operation, which requires
/// `&mut` access; two tails can therefore never interleave on the same cursor
/// without the caller holding a lock around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailCursor {
    path: PathBuf,
    /// Byte offset of the first unread byte. Always a line boundary or EOF.
    offset: u64,
    /// Size of the trailing window read on a cold or reset tail.
    size_cap: u64,
    /// I/O failures observed by tail calls on this cursor.
    failures: u64,
}

impl TailCursor {
    /// Create a cursor positioned at the start ("nothing consumed yet").
    ///
    /// Returns `TailError::InvalidCap` if `size_cap` is zero.
    pub fn new(path: impl Into<PathBuf>, size_cap: u64) -> Result<Self, TailError> {
        let path = path.into();
        if size_cap == 0 {
            return Err(TailError::InvalidCap { path });
        }
        Ok(Self {
            path,
            offset: 0,
            size_cap,
            failures: 0,
        })
    }

    /// Resume from an offset returned by an earlier tail call.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn size_cap(&self) -> u64 {
        self.size_cap
    }

    /// Number of tail calls on this cursor that hit an I/O error and fell
    /// back to offset 0.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub(crate) fn set_offset(&mut self, offset: u64) {
        self.offset = offset;
    }

    pub(crate) fn record_failure(&mut self) {
        self.offset = 0;
        self.failures += 1;
    }
}

// =============================================================================
// Tail mode and result
// =============================================================================

/// What a tail call produces from the lines it reads.
#[derive(Debug, Clone, Copy)]
pub enum TailMode<'a> {
    /// Return every line verbatim.
    Dump,
    /// Return only counts of total, error, and warning lines.
    Summarize(&'a LinePatterns),
}

/// Outcome of a single tail call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TailResult {
    /// Offset to feed into the next call.
    pub new_offset: u64,
    /// New lines, without their terminators. Empty in summarize mode.
    pub lines: Vec<String>,
    /// Line counts for this call. All zero in dump mode.
    pub counts: LineCounts,
}

impl TailResult {
    /// A result carrying no new content.
    pub fn unchanged(offset: u64) -> Self {
        Self {
            new_offset: offset,
            ..Default::default()
        }
    }
}

// =============================================================================
// Line counts
// =============================================================================

/// Counters produced by summarize mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    /// Lines read.
    pub total: u64,
    /// Lines matching the error pattern.
    pub errors: u64,
    /// Lines matching the warning pattern.
    pub warnings: u64,
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.errors += other.errors;
        self.warnings += other.warnings;
    }
}

// =============================================================================
// Overview
// =============================================================================

/// Running counts of one configured logfile, as shown in an overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogfileSummary {
    /// Configured logfile name (not the resolved path).
    pub logfile: String,
    pub lines: u64,
    pub errors: u64,
    pub warnings: u64,
}

impl LogfileSummary {
    pub fn new(logfile: impl Into<String>, counts: LineCounts) -> Self {
        Self {
            logfile: logfile.into(),
            lines: counts.total,
            errors: counts.errors,
            warnings: counts.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_cap_rejected() {
        let result = TailCursor::new("app.log", 0);
        assert!(matches!(result, Err(TailError::InvalidCap { .. })));
    }

    #[test]
    fn test_new_cursor_starts_at_zero() {
        let cursor = TailCursor::new("app.log", 10).unwrap();
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.size_cap(), 10);
        assert_eq!(cursor.failures(), 0);
        assert_eq!(cursor.with_offset(42).offset(), 42);
    }

    #[test]
    fn test_record_failure_rewinds() {
        let mut cursor = TailCursor::new("app.log", 10).unwrap().with_offset(99);
        cursor.record_failure();
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.failures(), 1);
    }

    #[test]
    fn test_counts_accumulate() {
        let mut running = LineCounts::default();
        running += LineCounts {
            total: 3,
            errors: 1,
            warnings: 0,
        };
        running += LineCounts {
            total: 2,
            errors: 0,
            warnings: 2,
        };
        assert_eq!(
            running,
            LineCounts {
                total: 5,
                errors: 1,
                warnings: 2
            }
        );
    }
}

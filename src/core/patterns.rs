// LogTail - core/patterns.rs
//
// Error/warning line patterns used by summarize mode.
// Core layer: pure logic, no I/O.
//
// Patterns are compiled once at setup; a malformed pattern is reported there
// and can never surface from a tail call.

use crate::core::model::LineCounts;
use crate::util::constants::{
    DEFAULT_ERROR_PATTERN, DEFAULT_WARNING_PATTERN, MAX_REGEX_PATTERN_LENGTH,
};
use crate::util::error::PatternError;
use regex::Regex;

/// Compiled error and warning patterns. Both are unanchored searches.
#[derive(Debug, Clone)]
pub struct LinePatterns {
    error: Regex,
    warning: Regex,
}

impl LinePatterns {
    /// Compile both patterns, validating each independently.
    pub fn compile(error: &str, warning: &str) -> Result<Self, PatternError> {
        Ok(Self {
            error: compile_field("error_pattern", error)?,
            warning: compile_field("warning_pattern", warning)?,
        })
    }

    pub fn error(&self) -> &Regex {
        &self.error
    }

    pub fn warning(&self) -> &Regex {
        &self.warning
    }

    /// Count `line` into `counts`. A line may be both an error and a warning.
    pub fn classify(&self, line: &str, counts: &mut LineCounts) {
        counts.total += 1;
        if self.error.is_match(line) {
            counts.errors += 1;
        }
        if self.warning.is_match(line) {
            counts.warnings += 1;
        }
    }
}

impl Default for LinePatterns {
    fn default() -> Self {
        Self {
            error: Regex::new(DEFAULT_ERROR_PATTERN).expect("built-in error pattern is valid"),
            warning: Regex::new(DEFAULT_WARNING_PATTERN)
                .expect("built-in warning pattern is valid"),
        }
    }
}

/// Validate and compile a single pattern.
pub fn compile_field(field: &'static str, pattern: &str) -> Result<Regex, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty { field });
    }
    if pattern.len() > MAX_REGEX_PATTERN_LENGTH {
        return Err(PatternError::TooLong {
            field,
            length: pattern.len(),
            max_length: MAX_REGEX_PATTERN_LENGTH,
        });
    }
    Regex::new(pattern).map_err(|e| PatternError::InvalidRegex {
        field,
        pattern: pattern.to_string(),
        source: e,
    })
}

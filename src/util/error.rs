// LogTail - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation.
//
// Note what is NOT here: I/O failures during a tail call. The tailer degrades
// those to "start over" semantics and never returns them to its caller.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogTail operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogTailError {
    /// Tail cursor construction failed.
    Tail(TailError),

    /// Error/warning pattern compilation failed.
    Pattern(PatternError),

    /// A logger session could not be opened.
    Session(SessionError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// JSON serialisation of command output failed.
    Json { source: serde_json::Error },
}

impl fmt::Display for LogTailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tail(e) => write!(f, "Tail error: {e}"),
            Self::Pattern(e) => write!(f, "Pattern error: {e}"),
            Self::Session(e) => write!(f, "Session error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Json { source } => write!(f, "JSON output error: {source}"),
        }
    }
}

impl std::error::Error for LogTailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tail(e) => Some(e),
            Self::Pattern(e) => Some(e),
            Self::Session(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Json { source } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Tail errors
// ---------------------------------------------------------------------------

/// Caller-side validation errors raised before the tailer runs.
#[derive(Debug)]
pub enum TailError {
    /// The size cap must be greater than zero.
    InvalidCap { path: PathBuf },
}

impl fmt::Display for TailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCap { path } => write!(
                f,
                "Size cap for '{}' must be greater than zero",
                path.display()
            ),
        }
    }
}

impl std::error::Error for TailError {}

impl From<TailError> for LogTailError {
    fn from(e: TailError) -> Self {
        Self::Tail(e)
    }
}

// ---------------------------------------------------------------------------
// Pattern errors
// ---------------------------------------------------------------------------

/// Errors compiling the error/warning line patterns. Setup-time only.
#[derive(Debug)]
pub enum PatternError {
    /// The pattern is empty and would match every line.
    Empty { field: &'static str },

    /// The pattern exceeds the maximum allowed length.
    TooLong {
        field: &'static str,
        length: usize,
        max_length: usize,
    },

    /// The pattern is not a valid regex.
    InvalidRegex {
        field: &'static str,
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "'{field}' must not be empty"),
            Self::TooLong {
                field,
                length,
                max_length,
            } => write!(
                f,
                "'{field}' is {length} chars, exceeds maximum of {max_length}"
            ),
            Self::InvalidRegex {
                field,
                pattern,
                source,
            } => write!(f, "invalid regex in '{field}' ('{pattern}'): {source}"),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PatternError> for LogTailError {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}

// ---------------------------------------------------------------------------
// Session errors
// ---------------------------------------------------------------------------

/// Errors opening a logger session for a logfile.
#[derive(Debug)]
pub enum SessionError {
    /// The logfile is not in the configured set.
    NotConfigured { logfile: String },

    /// The resolved file is missing, not a regular file, or not readable.
    Unreadable { logfile: String, path: PathBuf },

    /// The session could not be created.
    Tail(TailError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured { logfile } => {
                write!(f, "Logfile '{logfile}' is not configured")
            }
            Self::Unreadable { logfile, path } => write!(
                f,
                "Logfile '{logfile}' ('{}') is not a readable file",
                path.display()
            ),
            Self::Tail(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tail(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TailError> for SessionError {
    fn from(e: TailError) -> Self {
        Self::Tail(e)
    }
}

impl From<SessionError> for LogTailError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogTailError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogTail results.
pub type Result<T> = std::result::Result<T, LogTailError>;

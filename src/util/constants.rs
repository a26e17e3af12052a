// LogTail - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogTail";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogTail";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Tail window
// =============================================================================

/// Multiplier applied to the configured size limit. The limit is expressed in
/// decimal kilobytes.
pub const BYTES_PER_KB: u64 = 1_000;

/// Default size limit (KB) of the window read on a cold or reset tail.
pub const DEFAULT_SIZE_LIMIT_KB: u64 = 1_000;

/// Minimum user-configurable size limit (KB). A zero cap is never valid.
pub const MIN_SIZE_LIMIT_KB: u64 = 1;

/// Maximum user-configurable size limit (KB).
pub const MAX_SIZE_LIMIT_KB: u64 = 1_000_000; // 1 GB

/// Block size used when walking backward from the window start to find the
/// preceding newline.
pub const BACKSCAN_BLOCK_SIZE: usize = 4 * 1_024;

/// Buffer size of the sequential line reader.
pub const READ_BUFFER_SIZE: usize = 64 * 1_024;

// =============================================================================
// Logfiles
// =============================================================================

/// Logfiles monitored when the config does not name any.
pub const DEFAULT_LOG_FILES: &[&str] = &["/logs/error.log"];

/// Directory the configured logfile names are resolved against.
pub const DEFAULT_BASE_DIR: &str = ".";

/// Session identifier used by the command-line front end.
pub const CLI_SESSION_ID: &str = "cli";

/// Default interval between polls in `dump --follow` (ms).
pub const DEFAULT_FOLLOW_INTERVAL_MS: u64 = 1_000;

/// Minimum interval between polls in `dump --follow` (ms).
pub const MIN_FOLLOW_INTERVAL_MS: u64 = 100;

// =============================================================================
// Patterns
// =============================================================================

/// Default pattern counting a line as an error.
pub const DEFAULT_ERROR_PATTERN: &str = r"\*ERROR\*";

/// Default pattern counting a line as a warning.
pub const DEFAULT_WARNING_PATTERN: &str = r"\*WARN\*";

/// Maximum regex pattern length to prevent ReDoS.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

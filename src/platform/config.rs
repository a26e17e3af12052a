// LogTail - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::patterns::{self, LinePatterns};
use crate::util::constants;
use crate::util::error::{ConfigError, PatternError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogTail configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logtail/ or %APPDATA%\LogTail\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[tail]` section.
    pub tail: TailSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[tail]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct TailSection {
    /// Directory configured logfile names are resolved against.
    pub base_dir: Option<String>,
    /// Logfiles callers may tail.
    pub log_files: Option<Vec<String>>,
    /// Regex counting a line as an error.
    pub error_pattern: Option<String>,
    /// Regex counting a line as a warning.
    pub warning_pattern: Option<String>,
    /// Cold-read window in KB (1 KB = 1000 bytes).
    pub size_limit_kb: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Tail --
    pub base_dir: PathBuf,
    pub log_files: Vec<String>,
    /// Known to compile.
    pub error_pattern: String,
    /// Known to compile.
    pub warning_pattern: String,
    pub size_limit_kb: u64,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(constants::DEFAULT_BASE_DIR),
            log_files: constants::DEFAULT_LOG_FILES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            error_pattern: constants::DEFAULT_ERROR_PATTERN.to_string(),
            warning_pattern: constants::DEFAULT_WARNING_PATTERN.to_string(),
            size_limit_kb: constants::DEFAULT_SIZE_LIMIT_KB,
            log_level: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Cold-read window in bytes.
    pub fn size_cap(&self) -> u64 {
        self.size_limit_kb * constants::BYTES_PER_KB
    }

    /// Compile the configured error and warning patterns.
    pub fn patterns(&self) -> Result<LinePatterns, PatternError> {
        LinePatterns::compile(&self.error_pattern, &self.warning_pattern)
    }
}

/// Read and parse config.toml without validating values.
pub fn read_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let raw = match read_raw_config(config_path) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Validate each field against named constants, accumulating all problems.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Tail: base_dir --
    if let Some(dir) = raw.tail.base_dir {
        if dir.is_empty() {
            warnings.push(format!(
                "[tail] base_dir is empty. Using default (\"{}\").",
                constants::DEFAULT_BASE_DIR
            ));
        } else {
            config.base_dir = PathBuf::from(dir);
        }
    }

    // -- Tail: log_files --
    if let Some(files) = raw.tail.log_files {
        let (kept, empty): (Vec<String>, Vec<String>) =
            files.into_iter().partition(|f| !f.trim().is_empty());
        if !empty.is_empty() {
            warnings.push(format!(
                "[tail] log_files contains {} empty entr{}; ignored.",
                empty.len(),
                if empty.len() == 1 { "y" } else { "ies" }
            ));
        }
        if kept.is_empty() {
            warnings.push(format!(
                "[tail] log_files names no logfiles. Using default ({:?}).",
                constants::DEFAULT_LOG_FILES
            ));
        } else {
            config.log_files = kept;
        }
    }

    // -- Tail: patterns --
    if let Some(pattern) = raw.tail.error_pattern {
        match patterns::compile_field("error_pattern", &pattern) {
            Ok(_) => config.error_pattern = pattern,
            Err(e) => warnings.push(format!(
                "[tail] {e}. Using default ({}).",
                constants::DEFAULT_ERROR_PATTERN
            )),
        }
    }
    if let Some(pattern) = raw.tail.warning_pattern {
        match patterns::compile_field("warning_pattern", &pattern) {
            Ok(_) => config.warning_pattern = pattern,
            Err(e) => warnings.push(format!(
                "[tail] {e}. Using default ({}).",
                constants::DEFAULT_WARNING_PATTERN
            )),
        }
    }

    // -- Tail: size_limit_kb --
    if let Some(kb) = raw.tail.size_limit_kb {
        if (constants::MIN_SIZE_LIMIT_KB..=constants::MAX_SIZE_LIMIT_KB).contains(&kb) {
            config.size_limit_kb = kb;
        } else {
            let e = ConfigError::ValueOutOfRange {
                field: "[tail] size_limit_kb".to_string(),
                value: kb.to_string(),
                expected: format!(
                    "{}-{}",
                    constants::MIN_SIZE_LIMIT_KB,
                    constants::MAX_SIZE_LIMIT_KB
                ),
            };
            warnings.push(format!(
                "{e}. Using default ({}).",
                constants::DEFAULT_SIZE_LIMIT_KB
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    config
}

// LogTail - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading (platform config dir or --config)
// 3. Logging initialisation (debug mode support)
// 4. Dispatch to the tail / dump / summary commands

use clap::{Parser, Subcommand};
use logtail::app::overview::summarize_all;
use logtail::app::registry::{lock_session, SessionRegistry};
use logtail::app::session::reset_requested;
use logtail::app::tail::tail;
use logtail::core::model::{TailCursor, TailMode};
use logtail::core::patterns::LinePatterns;
use logtail::platform::config::{self, AppConfig, PlatformPaths};
use logtail::util::constants::{
    APP_NAME, APP_VERSION, CLI_SESSION_ID, DEFAULT_FOLLOW_INTERVAL_MS, MIN_FOLLOW_INTERVAL_MS,
};
use logtail::util::error::{ConfigError, LogTailError, Result};
use logtail::util::logging;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// LogTail - bounded, resumable log file tailing.
///
/// Reads only what was appended since the last read, never more than the
/// configured window on a cold read, and never starts mid-line.
#[derive(Parser, Debug)]
#[command(name = "logtail", version, about)]
struct Cli {
    /// Config file (defaults to config.toml in the platform config directory).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Single tail call on any file, resuming from --offset.
    Tail {
        /// File to read.
        path: PathBuf,

        /// Offset returned by the previous call (0 = cold read).
        #[arg(long, default_value_t = 0)]
        offset: u64,

        /// Cold-read window in bytes (defaults to the configured size limit).
        #[arg(long)]
        cap: Option<u64>,

        /// Ignore --offset and re-read the trailing window.
        #[arg(long)]
        reset: bool,

        /// Print line counts instead of lines.
        #[arg(long)]
        summarize: bool,

        /// Error pattern for --summarize (defaults to the configured pattern).
        #[arg(long)]
        error_pattern: Option<String>,

        /// Warning pattern for --summarize (defaults to the configured pattern).
        #[arg(long)]
        warning_pattern: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print new lines of a configured logfile.
    Dump {
        /// Configured logfile name, e.g. /logs/error.log.
        logfile: String,

        /// Re-read the trailing window.
        #[arg(long)]
        reset: bool,

        /// Cache-Control directive; any "no-*" directive forces a reset.
        #[arg(long)]
        cache_control: Option<String>,

        /// Keep polling for appended lines until interrupted.
        #[arg(short = 'f', long)]
        follow: bool,

        /// Poll interval for --follow in milliseconds.
        #[arg(long, default_value_t = DEFAULT_FOLLOW_INTERVAL_MS)]
        interval_ms: u64,
    },

    /// Line, error, and warning totals for every configured logfile.
    Summary {
        /// Recount from the trailing window.
        #[arg(long)]
        reset: bool,

        /// Cache-Control directive; any "no-*" directive forces a reset.
        #[arg(long)]
        cache_control: Option<String>,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) if !path.is_file() => {
            let e = LogTailError::from(ConfigError::Io {
                path,
                source: io::Error::new(io::ErrorKind::NotFound, "config file not found"),
            });
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
        Some(path) => path,
        None => PlatformPaths::resolve().config_file(),
    };
    let (config, warnings) = config::load_config(&config_path);

    logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "{APP_NAME} starting"
    );
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Config warning");
        eprintln!("Warning: {warning}");
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Tail {
            path,
            offset,
            cap,
            reset,
            summarize,
            error_pattern,
            warning_pattern,
            json,
        } => {
            let patterns = LinePatterns::compile(
                error_pattern.as_deref().unwrap_or(&config.error_pattern),
                warning_pattern.as_deref().unwrap_or(&config.warning_pattern),
            )?;
            let mut cursor =
                TailCursor::new(path, cap.unwrap_or_else(|| config.size_cap()))?.with_offset(offset);
            let mode = if summarize {
                TailMode::Summarize(&patterns)
            } else {
                TailMode::Dump
            };

            let result = tail(&mut cursor, mode, reset);

            if json {
                println!("{}", to_json(&result)?);
            } else if summarize {
                println!(
                    "lines={} errors={} warnings={} offset={}",
                    result.counts.total,
                    result.counts.errors,
                    result.counts.warnings,
                    result.new_offset
                );
            } else {
                for line in &result.lines {
                    println!("{line}");
                }
                eprintln!("offset={}", result.new_offset);
            }
            Ok(())
        }

        Command::Dump {
            logfile,
            reset,
            cache_control,
            follow,
            interval_ms,
        } => {
            let registry = registry(config)?;
            let reset = reset || reset_requested(cache_control.as_deref());
            let session = registry.session(CLI_SESSION_ID, &logfile, reset)?;

            print_lines(lock_session(&session).dump(reset));

            if follow {
                let interval = Duration::from_millis(interval_ms.max(MIN_FOLLOW_INTERVAL_MS));
                tracing::info!(logfile = %logfile, interval_ms = interval.as_millis() as u64, "Following");
                loop {
                    std::thread::sleep(interval);
                    print_lines(lock_session(&session).dump(false));
                }
            }
            Ok(())
        }

        Command::Summary {
            reset,
            cache_control,
            json,
        } => {
            let registry = registry(config)?;
            let reset = reset || reset_requested(cache_control.as_deref());
            let summaries = summarize_all(&registry, CLI_SESSION_ID, reset);

            if json {
                println!("{}", to_json(&summaries)?);
            } else {
                let width = summaries
                    .iter()
                    .map(|s| s.logfile.len())
                    .max()
                    .unwrap_or(0)
                    .max("LOGFILE".len());
                println!(
                    "{:<width$}  {:>8}  {:>8}  {:>10}",
                    "LOGFILE", "ERRORS", "WARNINGS", "LINES"
                );
                for s in &summaries {
                    println!(
                        "{:<width$}  {:>8}  {:>8}  {:>10}",
                        s.logfile, s.errors, s.warnings, s.lines
                    );
                }
            }
            Ok(())
        }
    }
}

fn registry(config: &AppConfig) -> Result<SessionRegistry> {
    Ok(SessionRegistry::new(
        config.base_dir.clone(),
        config.log_files.clone(),
        config.patterns()?,
        config.size_cap(),
    )?)
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|source| LogTailError::Json { source })
}

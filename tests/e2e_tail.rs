// LogTail - tests/e2e_tail.rs
//
// End-to-end tests for tailing real files on disk.
//
// These tests exercise the real filesystem: files are created, appended to,
// and removed between calls, and every call goes through the public API the
// CLI uses. No mocks, no stubs.

use logtail::app::overview::summarize_all;
use logtail::app::registry::{lock_session, SessionRegistry};
use logtail::core::model::{LineCounts, TailCursor, TailMode};
use logtail::core::patterns::LinePatterns;
use logtail::platform::config::load_config;
use logtail::tail;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

fn append(path: &Path, text: &str) {
    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .expect("open for append");
    f.write_all(text.as_bytes()).expect("append");
}

// =============================================================================
// Tailer on disk
// =============================================================================

/// Reset read, then resume after an append: only the new line comes back.
#[test]
fn e2e_reset_then_resume_reads_only_appended_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "A\nB\nC\n").unwrap();

    let mut cursor = TailCursor::new(&path, 1_000).unwrap();
    let first = tail(&mut cursor, TailMode::Dump, true);
    assert_eq!(first.lines, vec!["A", "B", "C"]);
    assert_eq!(first.new_offset, 6);

    append(&path, "D\n");
    let second = tail(&mut cursor, TailMode::Dump, false);
    assert_eq!(second.lines, vec!["D"]);
    assert_eq!(second.new_offset, 8);
}

/// A small cap starting mid-line backs up to the start of that line.
#[test]
fn e2e_small_cap_returns_whole_trailing_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "AAAA\nBB\n").unwrap();

    let mut cursor = TailCursor::new(&path, 2).unwrap();
    let result = tail(&mut cursor, TailMode::Dump, true);
    assert_eq!(result.lines, vec!["BB"]);
}

/// Summarize mode counts matches without returning lines.
#[test]
fn e2e_summarize_counts_error_and_warning_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "no match\n*ERROR* disk\n*WARN* low space\n").unwrap();

    let patterns = LinePatterns::compile(r"\*ERROR\*", r"\*WARN\*").unwrap();
    let mut cursor = TailCursor::new(&path, 1_000).unwrap();
    let result = tail(&mut cursor, TailMode::Summarize(&patterns), false);

    assert!(result.lines.is_empty());
    assert_eq!(
        result.counts,
        LineCounts {
            total: 3,
            errors: 1,
            warnings: 1
        }
    );
}

/// A large file read cold returns only about `cap` bytes of trailing lines.
#[test]
fn e2e_cold_read_of_large_file_is_bounded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.log");
    let content: String = (0..20_000).map(|i| format!("entry {i:05}\n")).collect();
    fs::write(&path, &content).unwrap();

    let line_len = "entry 00000\n".len() as u64;
    let cap = 10 * line_len + 3;
    let mut cursor = TailCursor::new(&path, cap).unwrap();
    let result = tail(&mut cursor, TailMode::Dump, true);

    assert_eq!(result.lines.len(), 11);
    assert_eq!(result.lines.first().unwrap(), "entry 19989");
    assert_eq!(result.lines.last().unwrap(), "entry 19999");
    assert_eq!(result.new_offset, content.len() as u64);
}

/// A missing file resets the cursor and is retried cleanly once it exists.
#[test]
fn e2e_missing_file_resets_then_recovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rotating.log");
    fs::write(&path, "old\n").unwrap();

    let mut cursor = TailCursor::new(&path, 1_000).unwrap();
    tail(&mut cursor, TailMode::Dump, false);
    assert_eq!(cursor.offset(), 4);

    fs::remove_file(&path).unwrap();
    let gone = tail(&mut cursor, TailMode::Dump, false);
    assert!(gone.lines.is_empty());
    assert_eq!(gone.new_offset, 0);
    assert_eq!(cursor.failures(), 1);

    fs::write(&path, "new 1\nnew 2\n").unwrap();
    let back = tail(&mut cursor, TailMode::Dump, false);
    assert_eq!(back.lines, vec!["new 1", "new 2"]);
}

/// Two cursors on the same file advance independently.
#[test]
fn e2e_two_cursors_same_file_are_independent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shared.log");
    fs::write(&path, "x\ny\n").unwrap();

    let mut tab_a = TailCursor::new(&path, 1_000).unwrap();
    let mut tab_b = TailCursor::new(&path, 1_000).unwrap();

    assert_eq!(tail(&mut tab_a, TailMode::Dump, false).lines.len(), 2);
    append(&path, "z\n");
    assert_eq!(tail(&mut tab_a, TailMode::Dump, false).lines, vec!["z"]);
    assert_eq!(tail(&mut tab_b, TailMode::Dump, false).lines.len(), 3);
}

// =============================================================================
// Config -> registry -> overview
// =============================================================================

/// The whole configured pipeline: config.toml, allow list, sessions, overview.
#[test]
fn e2e_configured_overview_and_dump() {
    let dir = TempDir::new().unwrap();
    let logs = dir.path().join("logs");
    fs::create_dir_all(&logs).unwrap();
    fs::write(logs.join("error.log"), "*ERROR* boom\n*WARN* hmm\nfine\n").unwrap();
    fs::write(logs.join("audit.log"), "ERR denied\n").unwrap();

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[tail]\nbase_dir = {:?}\nlog_files = [\"/logs/error.log\", \"/logs/audit.log\"]\n\
             error_pattern = \"ERR\"\nwarning_pattern = \"WARN\"\nsize_limit_kb = 1\n",
            dir.path().to_str().unwrap()
        ),
    )
    .unwrap();

    let (config, warnings) = load_config(&config_path);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(config.size_cap(), 1_000);

    let registry = SessionRegistry::new(
        config.base_dir.clone(),
        config.log_files.clone(),
        config.patterns().unwrap(),
        config.size_cap(),
    )
    .unwrap();

    let summaries = summarize_all(&registry, "browser-1", false);
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].logfile, "/logs/error.log");
    assert_eq!((summaries[0].lines, summaries[0].errors, summaries[0].warnings), (3, 1, 1));
    assert_eq!((summaries[1].lines, summaries[1].errors), (1, 1));

    let session = registry.session("browser-1", "/logs/error.log", false).unwrap();
    assert_eq!(lock_session(&session).dump(true).len(), 3);

    append(&logs.join("error.log"), "*ERROR* again\n");
    assert_eq!(lock_session(&session).dump(false), vec!["*ERROR* again"]);
    assert_eq!(summarize_all(&registry, "browser-1", false)[0].errors, 2);

    assert!(registry.session("browser-1", "/logs/other.log", false).is_err());
}

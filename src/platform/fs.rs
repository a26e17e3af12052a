// LogTail - platform/fs.rs
//
// Filesystem helpers for locating configured logfiles.

use std::path::{Path, PathBuf};

/// Resolve a configured logfile name under `base_dir`.
///
/// Names are written absolute-looking ("/logs/error.log") but are always
/// taken relative to the base directory.
pub fn resolve_logfile(base_dir: &Path, logfile: &str) -> PathBuf {
    base_dir.join(logfile.trim_start_matches(['/', '\\']))
}

/// True if `path` is a regular file this process can open for reading.
pub fn is_readable_file(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => match std::fs::File::open(path) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Logfile not readable");
                false
            }
        },
        Ok(_) => {
            tracing::debug!(path = %path.display(), "Logfile is not a regular file");
            false
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Logfile not found");
            false
        }
    }
}

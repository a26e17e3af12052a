// LogTail - app/registry.rs
//
// Table of logger sessions keyed by (session id, logfile).
//
// Locking:
//   - The table mutex is held only for lookup and insert.
//   - Each session has its own mutex, held by the caller for the whole
//     scan-and-read. Different keys never contend on a session lock.
//   - Entries are created on first use and never removed, so a key maps to
//     the same lock for the life of the process. A reset rewinds the existing
//     session in place rather than replacing it.
//
// Only logfiles named in the configured allow list can be opened.

use crate::app::session::LoggerSession;
use crate::core::patterns::LinePatterns;
use crate::platform::fs;
use crate::util::error::{SessionError, TailError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A session shared between callers holding the same key.
pub type SharedSession = Arc<Mutex<LoggerSession>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SessionKey {
    session_id: String,
    logfile: String,
}

/// Creates and hands out logger sessions for the configured logfiles.
#[derive(Debug)]
pub struct SessionRegistry {
    base_dir: PathBuf,
    log_files: Vec<String>,
    patterns: Arc<LinePatterns>,
    size_cap: u64,
    sessions: Mutex<HashMap<SessionKey, SharedSession>>,
}

impl SessionRegistry {
    /// Returns `TailError::InvalidCap` if `size_cap` is zero.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        log_files: Vec<String>,
        patterns: LinePatterns,
        size_cap: u64,
    ) -> Result<Self, TailError> {
        let base_dir = base_dir.into();
        if size_cap == 0 {
            return Err(TailError::InvalidCap { path: base_dir });
        }
        tracing::debug!(
            base_dir = %base_dir.display(),
            logfiles = log_files.len(),
            size_cap,
            "Session registry created"
        );
        Ok(Self {
            base_dir,
            log_files,
            patterns: Arc::new(patterns),
            size_cap,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    /// Configured logfiles, in configured order.
    pub fn logfiles(&self) -> &[String] {
        &self.log_files
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Number of sessions created so far.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the session for `logfile` owned by `session_id`, creating it on
    /// first use. `reset` rewinds an existing session.
    pub fn session(
        &self,
        session_id: &str,
        logfile: &str,
        reset: bool,
    ) -> Result<SharedSession, SessionError> {
        if !self.log_files.iter().any(|f| f == logfile) {
            return Err(SessionError::NotConfigured {
                logfile: logfile.to_string(),
            });
        }

        let key = SessionKey {
            session_id: session_id.to_string(),
            logfile: logfile.to_string(),
        };

        // Bind before branching so the table guard is released first.
        let existing = self.table().get(&key).cloned();
        if let Some(session) = existing {
            if reset {
                lock_session(&session).reset();
            }
            return Ok(session);
        }

        let path = fs::resolve_logfile(&self.base_dir, logfile);
        if !fs::is_readable_file(&path) {
            return Err(SessionError::Unreadable {
                logfile: logfile.to_string(),
                path,
            });
        }

        let created = LoggerSession::new(logfile, path, Arc::clone(&self.patterns), self.size_cap)?;

        // Another caller may have inserted the same key meanwhile; keep theirs.
        let session = Arc::clone(
            self.table()
                .entry(key)
                .or_insert_with(|| Arc::new(Mutex::new(created))),
        );
        tracing::debug!(session_id, logfile, "Logger session opened");
        Ok(session)
    }

    fn table(&self) -> MutexGuard<'_, HashMap<SessionKey, SharedSession>> {
        self.sessions.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Session table lock poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

/// Lock a shared session for one scan-and-read.
///
/// A poisoned lock is recovered: the session holds only offsets and counters,
/// and the next tail call re-establishes a consistent offset.
pub fn lock_session(session: &SharedSession) -> MutexGuard<'_, LoggerSession> {
    session.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Logger session lock poisoned; recovering");
        PoisonError::into_inner(poisoned)
    })
}

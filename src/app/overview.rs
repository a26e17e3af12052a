// LogTail - app/overview.rs
//
// Error/warning/line totals for every configured logfile, for one caller.

use crate::app::registry::{lock_session, SessionRegistry};
use crate::core::model::LogfileSummary;

/// Summarise each configured logfile in configured order.
///
/// Logfiles whose session cannot be opened (missing, unreadable) are left out
/// of the result.
pub fn summarize_all(
    registry: &SessionRegistry,
    session_id: &str,
    reset: bool,
) -> Vec<LogfileSummary> {
    registry
        .logfiles()
        .iter()
        .filter_map(|logfile| match registry.session(session_id, logfile, reset) {
            Ok(session) => {
                let counts = lock_session(&session).summarize();
                Some(LogfileSummary::new(logfile.as_str(), counts))
            }
            Err(e) => {
                tracing::debug!(logfile = %logfile, error = %e, "Overview: skipping logfile");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::patterns::LinePatterns;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_summarize_all_skips_missing_and_keeps_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.log"), "*WARN* x\n").unwrap();
        fs::write(dir.path().join("a.log"), "*ERROR* y\nz\n").unwrap();
        let registry = SessionRegistry::new(
            dir.path(),
            vec!["/b.log".into(), "/gone.log".into(), "/a.log".into()],
            LinePatterns::default(),
            1_000,
        )
        .unwrap();

        let summaries = summarize_all(&registry, "tile", false);
        assert_eq!(
            summaries,
            vec![
                LogfileSummary {
                    logfile: "/b.log".into(),
                    lines: 1,
                    errors: 0,
                    warnings: 1
                },
                LogfileSummary {
                    logfile: "/a.log".into(),
                    lines: 2,
                    errors: 1,
                    warnings: 0
                },
            ]
        );
    }

    #[test]
    fn test_repeated_overview_accumulates_and_reset_restarts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.log");
        fs::write(&path, "*ERROR* 1\n").unwrap();
        let registry =
            SessionRegistry::new(dir.path(), vec!["/a.log".into()], LinePatterns::default(), 1_000)
                .unwrap();

        assert_eq!(summarize_all(&registry, "tile", false)[0].errors, 1);
        fs::write(&path, "*ERROR* 1\n*ERROR* 2\n").unwrap();
        assert_eq!(summarize_all(&registry, "tile", false)[0].errors, 2);
        assert_eq!(summarize_all(&registry, "tile", true)[0].errors, 2);
    }
}

//! Report publishing
//!
//! Persisted mode overwrites the report document on disk; virtual mode
//! stores the query in the session and hands back the rendered text.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::model::{Query, SearchError, DOCUMENT_EXTENSION, PERSISTED_REPORT_NAME};
use crate::flows::search::SearchEngine;
use crate::flows::session::ReportSession;

/// Result of issuing a query
#[derive(Debug)]
pub enum Outcome {
    /// Report written to this file
    Saved(PathBuf),
    /// Report text for the virtual document
    Shown(String),
    /// Search ended without a report
    Notice(SearchError),
}

/// Path of the persisted report document
pub fn report_path(root: &Path) -> PathBuf {
    root.join(format!("{}.{}", PERSISTED_REPORT_NAME, DOCUMENT_EXTENSION))
}

/// Replace the persisted report in one step
pub fn save_report(root: &Path, text: &str) -> Result<PathBuf> {
    let target = report_path(root);
    let staging = target.with_extension(format!("{}.tmp", DOCUMENT_EXTENSION));
    fs::write(&staging, text)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    fs::rename(&staging, &target)
        .with_context(|| format!("Failed to replace {}", target.display()))?;
    Ok(target)
}

/// Issue a query and publish its report
pub fn issue(engine: &SearchEngine, session: &ReportSession, query: Query) -> Result<Outcome> {
    if engine.config().save_results {
        return match engine.render(&query) {
            Ok(text) => Ok(Outcome::Saved(save_report(engine.root(), &text)?)),
            Err(err) => Ok(Outcome::Notice(err)),
        };
    }

    Ok(match session.issue(engine, query) {
        Ok(text) => Outcome::Shown(text),
        Err(err) => Outcome::Notice(err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::builtin::BuiltinBackend;
    use crate::backends::rg::RipgrepBackend;
    use crate::core::config::Config;

    fn engine(root: &Path, save_results: bool) -> SearchEngine {
        let config = Config {
            save_results,
            ..Config::default()
        };
        SearchEngine::new(root, config, Box::new(BuiltinBackend))
    }

    #[test]
    fn test_virtual_mode_shows_and_stores() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "todo\n").unwrap();
        let session = ReportSession::new();

        let query = Query::whole_tree("todo", true).unwrap();
        let outcome = issue(&engine(temp.path(), false), &session, query.clone()).unwrap();
        assert!(matches!(outcome, Outcome::Shown(ref text) if text.contains(">>>todo<<<")));
        assert_eq!(session.query(), Some(query));
        assert!(!report_path(temp.path()).exists());
    }

    #[test]
    fn test_persisted_mode_overwrites_report() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "todo\n").unwrap();
        fs::write(report_path(temp.path()), "stale content").unwrap();
        let session = ReportSession::new();

        let query = Query::whole_tree("todo", true).unwrap();
        let outcome = issue(&engine(temp.path(), true), &session, query).unwrap();
        let Outcome::Saved(path) = outcome else {
            panic!("expected saved outcome");
        };
        let saved = fs::read_to_string(path).unwrap();
        assert!(saved.starts_with("# Search results"));
        assert!(saved.contains("- a.md:1:1 >>>todo<<<"));
        assert!(session.query().is_none());
    }

    #[test]
    fn test_persisted_report_is_not_searched_again() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "todo\n").unwrap();
        let session = ReportSession::new();
        let engine = engine(temp.path(), true);

        let query = Query::whole_tree("todo", true).unwrap();
        issue(&engine, &session, query.clone()).unwrap();
        let first = fs::read_to_string(report_path(temp.path())).unwrap();
        issue(&engine, &session, query).unwrap();
        let second = fs::read_to_string(report_path(temp.path())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tool_failure_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "todo\n").unwrap();
        let config = Config {
            save_results: true,
            ..Config::default()
        };
        let engine = SearchEngine::new(
            temp.path(),
            config,
            Box::new(RipgrepBackend::new("vaultgrep-missing-rg-binary")),
        );
        let session = ReportSession::new();

        let query = Query::whole_tree("todo", true).unwrap();
        let outcome = issue(&engine, &session, query).unwrap();
        assert!(matches!(outcome, Outcome::Notice(SearchError::ExternalTool(_))));
        assert!(!report_path(temp.path()).exists());
    }
}

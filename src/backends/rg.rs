//! ripgrep integration
//!
//! Calls rg with grouped (`--heading`) output and hands the text to the
//! shared parser.

use std::path::Path;
use std::process::Command;

use crate::backends::SearchBackend;
use crate::core::model::{Query, SearchError, DOCUMENT_EXTENSION};
use crate::core::util::{command_exists, first_line};

/// Default ripgrep executable
pub const DEFAULT_RG: &str = "rg";

/// Check if ripgrep is available
pub fn is_rg_available() -> bool {
    command_exists(DEFAULT_RG)
}

/// Backend shelling out to an installed ripgrep
#[derive(Debug, Clone)]
pub struct RipgrepBackend {
    program: String,
}

impl Default for RipgrepBackend {
    fn default() -> Self {
        Self::new(DEFAULT_RG)
    }
}

impl RipgrepBackend {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Build the rg invocation for a query
    pub fn command(&self, root: &Path, query: &Query, case_sensitive: bool) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(root)
            .arg("--no-config")
            .arg("--heading")
            .arg("--line-number")
            .arg("--column")
            .arg("--color")
            .arg("never")
            .arg("--no-ignore")
            .arg("--sort")
            .arg("path");

        cmd.arg(if case_sensitive {
            "--case-sensitive"
        } else {
            "--ignore-case"
        });
        if query.literal {
            cmd.arg("--fixed-strings");
        }

        cmd.arg("--glob")
            .arg(format!("*.{}", DOCUMENT_EXTENSION))
            .arg("-e")
            .arg(&query.pattern)
            .arg(&query.folder);
        cmd
    }
}

impl SearchBackend for RipgrepBackend {
    fn name(&self) -> &str {
        "ripgrep"
    }

    fn search(
        &self,
        root: &Path,
        query: &Query,
        case_sensitive: bool,
    ) -> Result<String, SearchError> {
        let mut cmd = self.command(root, query, case_sensitive);
        tracing::debug!("running {:?}", cmd);

        let output = cmd.output().map_err(|e| {
            tracing::warn!("failed to start {}: {}", self.program, e);
            SearchError::ExternalTool(format!("could not run {}: {}", self.program, e))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let has_output = !stdout.trim().is_empty();

        match output.status.code() {
            Some(0) if has_output => Ok(stdout),
            Some(0) | Some(1) => Err(SearchError::NoResults(query.clone())),
            // rg exits 2 on partial errors (e.g. unreadable files) but still reports matches
            _ if has_output => {
                if let Some(err) = first_line(&output.stderr) {
                    tracing::warn!("{} reported: {}", self.program, err);
                }
                Ok(stdout)
            }
            code => {
                let message = first_line(&output.stderr)
                    .unwrap_or_else(|| format!("{} exited with status {:?}", self.program, code));
                tracing::warn!("{} failed: {}", self.program, message);
                Err(SearchError::ExternalTool(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    /// Stand-in rg executable running a fixed shell body
    #[cfg(unix)]
    fn fake_rg(dir: &Path, body: &str) -> RipgrepBackend {
        let script = dir.join("fake-rg");
        fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        RipgrepBackend::new(script.to_string_lossy().into_owned())
    }

    #[cfg(unix)]
    fn search_with(body: &str) -> Result<String, SearchError> {
        let temp = tempfile::tempdir().unwrap();
        let backend = fake_rg(temp.path(), body);
        let query = Query::whole_tree("todo", true).unwrap();
        backend.search(temp.path(), &query, false)
    }

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_is_rg_available() {
        // This test depends on the system having rg installed
        let _ = is_rg_available();
    }

    #[test]
    fn test_command_literal_insensitive() {
        let backend = RipgrepBackend::default();
        let query = Query::whole_tree("todo", true).unwrap();
        let cmd = backend.command(Path::new("/vault"), &query, false);
        let args = args(&cmd);

        assert_eq!(cmd.get_program(), "rg");
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/vault")));
        assert!(args.contains(&"--heading".to_string()));
        assert!(args.contains(&"--column".to_string()));
        assert!(args.contains(&"--ignore-case".to_string()));
        assert!(args.contains(&"--fixed-strings".to_string()));
        assert!(args.contains(&"*.md".to_string()));
        assert_eq!(&args[args.len() - 3..], &["-e", "todo", "."]);
    }

    #[test]
    fn test_command_regex_sensitive_in_folder() {
        let backend = RipgrepBackend::new("/opt/rg");
        let query = Query::new("TO+DO", false, "notes").unwrap();
        let cmd = backend.command(Path::new("/vault"), &query, true);
        let args = args(&cmd);

        assert_eq!(cmd.get_program(), "/opt/rg");
        assert!(args.contains(&"--case-sensitive".to_string()));
        assert!(!args.contains(&"--fixed-strings".to_string()));
        assert_eq!(&args[args.len() - 3..], &["-e", "TO+DO", "notes/"]);
    }

    #[test]
    fn test_missing_tool_is_external_tool_error() {
        let temp = tempfile::tempdir().unwrap();
        let backend = RipgrepBackend::new("vaultgrep-missing-rg-binary");
        let query = Query::whole_tree("todo", true).unwrap();
        let err = backend.search(temp.path(), &query, false).unwrap_err();
        assert!(matches!(err, SearchError::ExternalTool(_)));
    }

    #[test]
    fn test_search_with_rg() {
        if !is_rg_available() {
            return;
        }
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("notes")).unwrap();
        fs::write(temp.path().join("notes/a.md"), "a todo item\nnothing\n").unwrap();
        fs::write(temp.path().join("notes/b.txt"), "todo\n").unwrap();

        let backend = RipgrepBackend::default();
        let query = Query::whole_tree("todo", true).unwrap();
        let output = backend.search(temp.path(), &query, false).unwrap();
        assert!(output.contains("notes/a.md"));
        assert!(output.contains("1:3:a todo item"));
        assert!(!output.contains("b.txt"));
    }

    #[test]
    fn test_search_with_rg_no_results() {
        if !is_rg_available() {
            return;
        }
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "nothing here\n").unwrap();

        let backend = RipgrepBackend::default();
        let query = Query::whole_tree("todo", true).unwrap();
        let err = backend.search(temp.path(), &query, false).unwrap_err();
        assert!(matches!(err, SearchError::NoResults(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_zero_with_output_is_ok() {
        let output = search_with("printf 'a.md\\n1:1:todo\\n'; exit 0").unwrap();
        assert_eq!(output, "a.md\n1:1:todo\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_one_is_no_results() {
        let err = search_with("exit 1").unwrap_err();
        assert!(matches!(err, SearchError::NoResults(ref q) if q.pattern == "todo"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_zero_without_output_is_no_results() {
        let err = search_with("exit 0").unwrap_err();
        assert!(matches!(err, SearchError::NoResults(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_two_without_output_carries_stderr() {
        let err = search_with("echo 'rg: regex parse error' >&2; echo 'detail' >&2; exit 2").unwrap_err();
        match err {
            SearchError::ExternalTool(message) => assert_eq!(message, "rg: regex parse error"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_two_silent_reports_status() {
        let err = search_with("exit 2").unwrap_err();
        match err {
            SearchError::ExternalTool(message) => assert!(message.contains("exited with status")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_two_with_output_keeps_matches() {
        let output =
            search_with("printf 'a.md\\n1:1:todo\\n'; echo 'b.md: Permission denied' >&2; exit 2")
                .unwrap();
        assert_eq!(output, "a.md\n1:1:todo\n");
    }
}

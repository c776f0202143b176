//! Search policies: case sensitivity, pattern engine and folder exclusion

use regex::{Regex, RegexBuilder};

use crate::core::config::Config;
use crate::core::model::{Query, PERSISTED_REPORT_NAME, VIRTUAL_REPORT_NAME};
use crate::core::paths::containing_folder;

/// Resolve case sensitivity for a pattern.
///
/// With smart case on, any uppercase character makes the search
/// case-sensitive; an all-lowercase pattern matches case-insensitively.
pub fn is_case_sensitive(smart_case: bool, pattern: &str) -> bool {
    if !smart_case {
        return true;
    }
    pattern != pattern.to_lowercase()
}

/// Build the pattern engine for a query.
///
/// Literal queries are escaped; every backend and the refiner share this
/// so they agree on what counts as an occurrence.
pub fn build_regex(query: &Query, case_sensitive: bool) -> Result<Regex, regex::Error> {
    let source = if query.literal {
        regex::escape(&query.pattern)
    } else {
        query.pattern.clone()
    };
    RegexBuilder::new(&source)
        .case_insensitive(!case_sensitive)
        .build()
}

/// Check whether a folder is covered by one of the ignore patterns.
///
/// A pattern matches its folder exactly, or, when it ends in "/*", any
/// folder starting with the part before the wildcard.
pub fn is_folder_ignored(folder: &str, ignore_folders: &[String]) -> bool {
    let folder = folder.trim_end_matches('/');
    ignore_folders.iter().any(|pattern| {
        if let Some(prefix) = pattern.strip_suffix("/*") {
            folder.starts_with(prefix)
        } else {
            folder == pattern.trim_end_matches('/')
        }
    })
}

/// Whether a document is one of the report documents
pub fn is_report_document(document_path: &str) -> bool {
    document_path == PERSISTED_REPORT_NAME || document_path == VIRTUAL_REPORT_NAME
}

/// Decide whether a candidate document is excluded from the results
pub fn is_excluded(document_path: &str, config: &Config) -> bool {
    is_report_document(document_path)
        || is_folder_ignored(containing_folder(document_path), &config.ignore_folders)
}

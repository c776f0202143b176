//! Built-in search backend
//!
//! Walks the tree with the ignore crate and scans documents line by line,
//! emitting the same grouped output rg produces so both backends share
//! one parser.

use ignore::WalkBuilder;
use regex::Regex;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::backends::SearchBackend;
use crate::core::model::{Query, SearchError, DOCUMENT_EXTENSION};
use crate::core::paths::make_relative;
use crate::core::policy::build_regex;

/// In-process backend, no external tool required
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinBackend;

/// Append one document group, returning whether anything matched
fn scan_document(output: &mut String, relative: &str, content: &str, re: &Regex) -> bool {
    let mut matched = false;
    // Only '\n' ends a line; a trailing '\r' stays part of the line, as in rg
    for (idx, line) in content.split_inclusive('\n').enumerate() {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let Some(found) = re.find(line) else {
            continue;
        };
        if !matched {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(relative);
            output.push('\n');
            matched = true;
        }
        let _ = writeln!(output, "{}:{}:{}", idx + 1, found.start() + 1, line);
    }
    matched
}

impl SearchBackend for BuiltinBackend {
    fn name(&self) -> &str {
        "builtin"
    }

    fn search(
        &self,
        root: &Path,
        query: &Query,
        case_sensitive: bool,
    ) -> Result<String, SearchError> {
        let re = build_regex(query, case_sensitive)?;

        let scope = if query.is_whole_tree() {
            root.to_path_buf()
        } else {
            root.join(&query.folder)
        };
        if !scope.is_dir() {
            return Err(SearchError::ExternalTool(format!(
                "{}: No such directory",
                query.folder
            )));
        }

        let mut builder = WalkBuilder::new(&scope);
        builder
            .hidden(true)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        let mut output = String::new();
        let mut scanned = 0usize;

        for entry in builder.build() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!("walk error: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }

            let relative = match make_relative(path, root) {
                Some(r) => r,
                None => continue,
            };

            // Non-UTF-8 content is treated as binary and skipped
            let content = match fs::read_to_string(path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::debug!("skipping {}: {}", relative, e);
                    continue;
                }
            };

            scanned += 1;
            scan_document(&mut output, &relative, &content, &re);
        }

        tracing::debug!("builtin backend scanned {} documents", scanned);

        if output.is_empty() {
            return Err(SearchError::NoResults(query.clone()));
        }
        Ok(output)
    }
}

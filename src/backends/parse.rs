//! Grouped output parser
//!
//! Backends emit ripgrep's `--heading` layout:
//!
//! ```text
//! notes/a.md
//! 1:3:a todo item
//! 2:9:another TODO here
//!
//! notes/b.md
//! 7:1:todo
//! ```
//!
//! Groups are separated by a blank line. The first line of a group is the
//! file path; body lines carry a `line:column:` prefix. Anything that does
//! not fit is skipped silently.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::RawLineHit;
use crate::core::paths::document_path;

/// Location prefix of a body line: `<line>:<column>:`
static LOCATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d+):").expect("Invalid LOCATION_RE regex"));

/// Parse one body line into (line, column, context)
fn parse_location(line: &str) -> Option<(u32, u32, &str)> {
    let caps = LOCATION_RE.captures(line)?;
    let line_number = caps[1].parse().ok()?;
    let column = caps[2].parse().ok()?;
    let rest = &line[caps.get(0)?.end()..];
    Some((line_number, column, rest.trim_end_matches('\r')))
}

/// Parse grouped output into line hits, in output order
pub fn parse_grouped_output(output: &str) -> Vec<RawLineHit> {
    let mut hits = Vec::new();
    let mut current: Option<String> = None;
    let mut at_group_start = true;

    for line in output.split('\n') {
        if line.trim_end_matches('\r').is_empty() {
            at_group_start = true;
            current = None;
            continue;
        }

        if at_group_start {
            at_group_start = false;
            current = document_path(line);
            if current.is_none() {
                tracing::debug!("skipping non-document group: {}", line);
            }
            continue;
        }

        let Some(doc) = &current else {
            continue;
        };

        if let Some((line_number, column, context)) = parse_location(line) {
            hits.push(RawLineHit {
                document_path: doc.clone(),
                line_number,
                raw_column_hint: column,
                context_text: context.to_string(),
            });
        }
    }

    hits
}

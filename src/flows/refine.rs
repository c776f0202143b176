//! Match refinement
//!
//! Backends report at most one location per line. The refiner rescans each
//! hit line with the same pattern engine to recover every occurrence and
//! its column.

use regex::Regex;

use crate::core::model::{Match, RawLineHit};

/// Expands line hits into per-occurrence matches
pub struct Refiner<'a> {
    re: &'a Regex,
    left: &'a str,
    right: &'a str,
}

impl<'a> Refiner<'a> {
    pub fn new(re: &'a Regex, left: &'a str, right: &'a str) -> Self {
        Self { re, left, right }
    }

    /// One match per non-overlapping, non-empty occurrence on the line
    pub fn refine(&self, hit: &RawLineHit) -> Vec<Match> {
        let text = hit.context_text.as_str();
        self.re
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| {
                let column = text[..m.start()].chars().count() + 1;
                let mut highlighted = String::with_capacity(
                    text.len() + self.left.len() + self.right.len(),
                );
                highlighted.push_str(&text[..m.start()]);
                highlighted.push_str(self.left);
                highlighted.push_str(m.as_str());
                highlighted.push_str(self.right);
                highlighted.push_str(&text[m.end()..]);

                Match {
                    line_number: hit.line_number,
                    column_number: column as u32,
                    highlighted_context: highlighted,
                }
            })
            .collect()
    }
}

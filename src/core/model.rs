//! Search Result Model
//!
//! Every backend maps its output to these types before refinement and
//! rendering. A `Report` is only ever built whole, never patched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::paths::normalize_folder;

/// Extension of documents eligible for search
pub const DOCUMENT_EXTENSION: &str = "md";

/// Document name (extension stripped) the persisted report is written to
pub const PERSISTED_REPORT_NAME: &str = "search-results";

/// Well-known name the lazily rendered report is registered under
pub const VIRTUAL_REPORT_NAME: &str = "search-results.virtual";

/// Folder value meaning "the whole tree"
pub const WHOLE_TREE: &str = ".";

/// A single search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub pattern: String,
    pub literal: bool,
    pub folder: String,
}

impl Query {
    /// Build a query, normalizing the folder scope.
    ///
    /// Returns `None` for an empty pattern: such a request is a no-op.
    pub fn new(pattern: impl Into<String>, literal: bool, folder: &str) -> Option<Self> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return None;
        }
        Some(Self {
            pattern,
            literal,
            folder: normalize_folder(folder),
        })
    }

    /// Whole-tree query
    pub fn whole_tree(pattern: impl Into<String>, literal: bool) -> Option<Self> {
        Self::new(pattern, literal, WHOLE_TREE)
    }

    /// Check the invariants a query must hold before it can be replayed
    pub fn is_well_formed(&self) -> bool {
        !self.pattern.is_empty()
            && (self.folder == WHOLE_TREE
                || (self.folder.ends_with('/')
                    && !self.folder.starts_with("./")
                    && !self.folder.contains('\\')))
    }

    pub fn is_whole_tree(&self) -> bool {
        self.folder == WHOLE_TREE
    }
}

/// One line of backend output attributable to a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLineHit {
    pub document_path: String,
    pub line_number: u32,
    /// Column as reported by the backend; never used for output
    pub raw_column_hint: u32,
    pub context_text: String,
}

/// A single concrete occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub line_number: u32,
    /// 1-based character offset
    pub column_number: u32,
    pub highlighted_context: String,
}

/// All matches within one document, in line-then-column order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub document_path: String,
    pub matches: Vec<Match>,
}

impl DocumentResult {
    pub fn new(document_path: impl Into<String>) -> Self {
        Self {
            document_path: document_path.into(),
            matches: Vec::new(),
        }
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Ranked results for one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub query: Query,
    pub documents: Vec<DocumentResult>,
}

impl Report {
    /// Build a report, ranking documents by descending match count.
    ///
    /// The sort is stable, so equal counts keep discovery order.
    pub fn ranked(query: Query, mut documents: Vec<DocumentResult>) -> Self {
        documents.sort_by(|a, b| b.match_count().cmp(&a.match_count()));
        Self { query, documents }
    }

    pub fn total_matches(&self) -> usize {
        self.documents.iter().map(DocumentResult::match_count).sum()
    }
}

/// Errors a search can end in
///
/// All of them are recovered by the caller and shown as notifications.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search tool failed: {0}")]
    ExternalTool(String),

    #[error("no results for {}", describe(.0))]
    NoResults(Query),

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("no report to show: {0}")]
    MalformedSession(String),
}

fn describe(query: &Query) -> String {
    let kind = if query.literal { "text" } else { "pattern" };
    if query.is_whole_tree() {
        format!("{} \"{}\"", kind, query.pattern)
    } else {
        format!("{} \"{}\" in {}", kind, query.pattern, query.folder)
    }
}

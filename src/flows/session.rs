//! Report session
//!
//! Holds the last successfully issued query so the virtual report document
//! can regenerate its content from the live tree on every read.

use std::sync::RwLock;

use crate::core::model::{Query, SearchError};
use crate::flows::search::SearchEngine;

/// Owned "last query" state; one per host, never global
#[derive(Debug, Default)]
pub struct ReportSession {
    last_query: RwLock<Option<Query>>,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored query
    pub fn set_query(&self, query: Query) {
        let mut slot = self
            .last_query
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(query);
    }

    /// The stored query, if any
    pub fn query(&self) -> Option<Query> {
        self.last_query
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Run a new query and, if it produced a report, remember it.
    ///
    /// A failed search leaves the previous query in place.
    pub fn issue(&self, engine: &SearchEngine, query: Query) -> Result<String, SearchError> {
        let text = engine.render(&query)?;
        self.set_query(query);
        Ok(text)
    }

    /// Replay the stored query through the full pipeline
    pub fn render(&self, engine: &SearchEngine) -> Result<String, SearchError> {
        let query = self.query().ok_or_else(|| {
            SearchError::MalformedSession("no search has been run yet".to_string())
        })?;
        if !query.is_well_formed() {
            return Err(SearchError::MalformedSession(format!(
                "stored query is invalid (pattern {:?}, folder {:?})",
                query.pattern, query.folder
            )));
        }
        engine.render(&query)
    }
}

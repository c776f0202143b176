//! Virtual documents
//!
//! A virtual document computes its content on read. Writes are accepted and
//! dropped. Documents are registered under well-known names and looked up by
//! the host.

use std::collections::HashMap;

use crate::core::model::SearchError;
use crate::flows::search::SearchEngine;
use crate::flows::session::ReportSession;

/// Metadata reported for a virtual document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStat {
    pub size: u64,
    pub read_only: bool,
}

/// Capability interface of a document whose content is computed on read
pub trait VirtualDocument {
    fn read(&self) -> String;

    /// Accepts and discards the data
    fn write(&self, data: &[u8]);

    fn stat(&self) -> DocumentStat;
}

/// The lazily rendered search report
pub struct ReportDocument<'a> {
    session: &'a ReportSession,
    engine: &'a SearchEngine,
}

impl<'a> ReportDocument<'a> {
    pub fn new(session: &'a ReportSession, engine: &'a SearchEngine) -> Self {
        Self { session, engine }
    }
}

/// Explanatory text shown in place of a report
pub fn placeholder(err: &SearchError) -> String {
    format!("# Search results\n\nNo report available: {}\n", err)
}

impl VirtualDocument for ReportDocument<'_> {
    fn read(&self) -> String {
        match self.session.render(self.engine) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!("report document rendered as placeholder: {}", err);
                placeholder(&err)
            }
        }
    }

    fn write(&self, data: &[u8]) {
        tracing::debug!("discarding {} bytes written to the report document", data.len());
    }

    fn stat(&self) -> DocumentStat {
        DocumentStat {
            size: self.read().len() as u64,
            read_only: true,
        }
    }
}

/// Virtual documents by name
#[derive(Default)]
pub struct DocumentRegistry<'a> {
    documents: HashMap<String, Box<dyn VirtualDocument + 'a>>,
}

impl<'a> DocumentRegistry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document, replacing any previous one of that name
    pub fn register(&mut self, name: impl Into<String>, document: Box<dyn VirtualDocument + 'a>) {
        self.documents.insert(name.into(), document);
    }

    pub fn get(&self, name: &str) -> Option<&(dyn VirtualDocument + 'a)> {
        self.documents.get(name).map(|doc| doc.as_ref())
    }
}

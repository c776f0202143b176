//! Search pipeline
//!
//! query -> case policy -> backend -> parse -> folder filter -> refine -> rank
//!
//! A Report is assembled in full before it is returned; nothing is published
//! from a search that fails part way.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::backends::parse::parse_grouped_output;
use crate::backends::SearchBackend;
use crate::core::config::Config;
use crate::core::model::{DocumentResult, Query, Report, SearchError};
use crate::core::policy::{build_regex, is_case_sensitive, is_excluded};
use crate::core::render::Renderer;
use crate::flows::refine::Refiner;

/// Runs queries against one document tree
pub struct SearchEngine {
    root: PathBuf,
    config: Config,
    backend: Box<dyn SearchBackend>,
}

impl SearchEngine {
    pub fn new(root: impl Into<PathBuf>, config: Config, backend: Box<dyn SearchBackend>) -> Self {
        Self {
            root: root.into(),
            config,
            backend,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline and build a ranked report
    pub fn run(&self, query: &Query) -> Result<Report, SearchError> {
        let case_sensitive = is_case_sensitive(self.config.smart_case, &query.pattern);
        // Compile first so a bad pattern never reaches the backend
        let re = build_regex(query, case_sensitive)?;

        tracing::debug!(
            "searching {:?} with {} (case_sensitive={})",
            query,
            self.backend.name(),
            case_sensitive
        );
        let output = self.backend.search(&self.root, query, case_sensitive)?;
        let hits = parse_grouped_output(&output);
        tracing::debug!("backend reported {} line hits", hits.len());

        let refiner = Refiner::new(&re, self.config.left_marker(), self.config.right_marker());
        let mut documents: Vec<DocumentResult> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for hit in &hits {
            if is_excluded(&hit.document_path, &self.config) {
                tracing::debug!("excluded {}:{}", hit.document_path, hit.line_number);
                continue;
            }

            let matches = refiner.refine(hit);
            if matches.is_empty() {
                tracing::debug!(
                    "no occurrence at {}:{} (backend column {})",
                    hit.document_path,
                    hit.line_number,
                    hit.raw_column_hint
                );
                continue;
            }

            let slot = *index.entry(hit.document_path.clone()).or_insert_with(|| {
                documents.push(DocumentResult::new(hit.document_path.clone()));
                documents.len() - 1
            });
            documents[slot].matches.extend(matches);
        }

        if documents.is_empty() {
            return Err(SearchError::NoResults(query.clone()));
        }

        Ok(Report::ranked(query.clone(), documents))
    }

    /// Run the pipeline and render the Markdown report text
    pub fn render(&self, query: &Query) -> Result<String, SearchError> {
        let report = self.run(query)?;
        Ok(Renderer::markdown().render(&report))
    }
}

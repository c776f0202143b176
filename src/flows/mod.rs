//! Flows module - The search-and-report pipeline
//!
//! - search: runs a query end to end and builds the ranked report
//! - refine: recovers every occurrence and its column on a hit line
//! - session: remembers the last query for lazy re-rendering
//! - document: virtual report document and its registry
//! - publish: persisted or virtual report output
//! - shell: line-oriented host driving the session interactively

pub mod document;
pub mod publish;
pub mod refine;
pub mod search;
pub mod session;
pub mod shell;

//! Backends module - Search tool integrations
//!
//! Provides:
//! - rg: ripgrep integration
//! - builtin: in-process walk + regex scan
//! - parse: grouped output parser shared by both
//! - version: external tool version probe

use std::path::Path;

use crate::core::model::{Query, SearchError};

pub mod builtin;
pub mod parse;
pub mod rg;
pub mod version;

/// A coarse, line-level search over the document tree.
///
/// Implementations return grouped output (see [`parse`]) listing every
/// line with at least one occurrence, or `NoResults` when nothing matched.
pub trait SearchBackend {
    fn name(&self) -> &str;

    fn search(
        &self,
        root: &Path,
        query: &Query,
        case_sensitive: bool,
    ) -> Result<String, SearchError>;
}

/// Which backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    Ripgrep,
    Builtin,
}

impl std::str::FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rg" | "ripgrep" => Ok(Engine::Ripgrep),
            "builtin" => Ok(Engine::Builtin),
            _ => Err(format!("Unknown engine: {}", s)),
        }
    }
}

/// Create the backend for an engine choice
pub fn make_backend(engine: Engine, rg_program: &str) -> Box<dyn SearchBackend> {
    match engine {
        Engine::Ripgrep => Box::new(rg::RipgrepBackend::new(rg_program)),
        Engine::Builtin => Box::new(builtin::BuiltinBackend),
    }
}

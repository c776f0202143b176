//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Search result model (Query, Match, Report, SearchError)
//! - Configuration loading
//! - Case and folder policies
//! - User-facing notifications
//! - Rendering functions for different output formats
//! - Path normalization utilities

pub mod config;
pub mod model;
pub mod notify;
pub mod paths;
pub mod policy;
pub mod render;
pub mod util;

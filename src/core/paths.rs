//! Path normalization utilities
//!
//! Document paths always use '/' as separator, carry no leading "./" and no
//! extension. Folder scopes are either "." or end in '/'.

use std::path::Path;

use crate::core::model::{DOCUMENT_EXTENSION, WHOLE_TREE};

/// Normalize a path string to use '/' and drop any leading "./"
pub fn normalize_str(path: &str) -> String {
    let mut normalized = path.replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    normalized
}

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    normalize_str(&path.to_string_lossy())
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Normalize a folder scope to "." or a prefix ending in '/'
pub fn normalize_folder(folder: &str) -> String {
    let normalized = normalize_str(folder.trim());
    let trimmed = normalized.trim_end_matches('/');
    if trimmed.is_empty() || trimmed == "." {
        WHOLE_TREE.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

/// Turn a backend file path into a document path.
///
/// Returns `None` when the file does not carry the document extension.
pub fn document_path(file_path: &str) -> Option<String> {
    let normalized = normalize_str(file_path.trim_end_matches('\r'));
    let stem = normalized.strip_suffix(DOCUMENT_EXTENSION)?.strip_suffix('.')?;
    if stem.is_empty() || stem.ends_with('/') {
        return None;
    }
    Some(stem.to_string())
}

/// Folder containing a document ("" at the root)
pub fn containing_folder(document_path: &str) -> &str {
    match document_path.rfind('/') {
        Some(idx) => &document_path[..idx],
        None => "",
    }
}

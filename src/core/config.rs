//! Configuration loading
//!
//! Priority:
//! 1. --config FILE (must exist and parse)
//! 2. <root>/.vaultgrep.json
//! 3. Built-in defaults

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file looked up in the root when no --config is given
pub const CONFIG_FILE: &str = ".vaultgrep.json";

/// Highlight markers placed around each occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surround {
    pub left: String,
    pub right: String,
}

impl Default for Surround {
    fn default() -> Self {
        Self {
            left: ">>>".to_string(),
            right: "<<<".to_string(),
        }
    }
}

/// Accepted shapes of the `surround` key
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SurroundSetting {
    Markers(Surround),
    Enabled(bool),
}

fn deserialize_surround<'de, D>(deserializer: D) -> Result<Option<Surround>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let setting: Option<SurroundSetting> = Option::deserialize(deserializer)?;
    Ok(match setting {
        Some(SurroundSetting::Markers(markers)) => Some(markers),
        Some(SurroundSetting::Enabled(true)) => Some(Surround::default()),
        Some(SurroundSetting::Enabled(false)) | None => None,
    })
}

fn default_true() -> bool {
    true
}

fn default_surround() -> Option<Surround> {
    Some(Surround::default())
}

/// Search configuration, read-only for the duration of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_true")]
    pub smart_case: bool,

    /// `None` disables highlighting
    #[serde(
        default = "default_surround",
        deserialize_with = "deserialize_surround"
    )]
    pub surround: Option<Surround>,

    #[serde(default)]
    pub save_results: bool,

    #[serde(default)]
    pub ignore_folders: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smart_case: true,
            surround: default_surround(),
            save_results: false,
            ignore_folders: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a config from JSON text
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("Invalid configuration JSON")
    }

    /// Load configuration for a root, honouring an explicit override
    pub fn load(root: &Path, config_override: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_override {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            return Self::from_json(&content)
                .with_context(|| format!("Failed to load config file: {}", path.display()));
        }

        let default_path = root.join(CONFIG_FILE);
        if default_path.is_file() {
            tracing::debug!("loading config from {}", default_path.display());
            let content = fs::read_to_string(&default_path)
                .with_context(|| format!("Failed to read {}", default_path.display()))?;
            return Self::from_json(&content);
        }

        Ok(Self::default())
    }

    /// Left highlight marker ("" when disabled)
    pub fn left_marker(&self) -> &str {
        self.surround.as_ref().map(|s| s.left.as_str()).unwrap_or("")
    }

    /// Right highlight marker ("" when disabled)
    pub fn right_marker(&self) -> &str {
        self.surround.as_ref().map(|s| s.right.as_str()).unwrap_or("")
    }
}

//! Version probe
//!
//! Reports this tool's version beside the first line of `rg --version`.

use std::process::Command;

use crate::core::model::SearchError;
use crate::core::util::first_line;

/// Versions of this tool and the external search tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub own: String,
    pub tool: String,
}

impl VersionInfo {
    pub fn render(&self) -> String {
        format!("vaultgrep {}\n{}", self.own, self.tool)
    }
}

/// Run `<program> --version` and collect both versions
pub fn probe_version(program: &str) -> Result<VersionInfo, SearchError> {
    let output = Command::new(program)
        .arg("--version")
        .output()
        .map_err(|e| SearchError::ExternalTool(format!("could not run {}: {}", program, e)))?;

    if !output.status.success() {
        return Err(SearchError::ExternalTool(
            first_line(&output.stderr)
                .unwrap_or_else(|| format!("{} --version failed", program)),
        ));
    }

    let tool = first_line(&output.stdout)
        .ok_or_else(|| SearchError::ExternalTool(format!("{} printed no version", program)))?;

    Ok(VersionInfo {
        own: env!("CARGO_PKG_VERSION").to_string(),
        tool,
    })
}

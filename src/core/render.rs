//! Renderer module
//!
//! Renders a Report to md (the canonical report text), json or jsonl

use crate::core::model::{DocumentResult, Report, DOCUMENT_EXTENSION};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Markdown renderer, producing the report document text
    pub fn markdown() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Render a report to a string
    pub fn render(&self, report: &Report) -> String {
        match self.config.format {
            OutputFormat::Markdown => render_markdown(report),
            OutputFormat::Json => self.render_json(report),
            OutputFormat::Jsonl => self.render_jsonl(report),
        }
    }

    /// Render as a single JSON object
    fn render_json(&self, report: &Report) -> String {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        rendered.unwrap_or_else(|_| "{}".to_string())
    }

    /// Render as JSON Lines (one document per line)
    fn render_jsonl(&self, report: &Report) -> String {
        report
            .documents
            .iter()
            .filter_map(|doc| {
                if self.config.pretty {
                    serde_json::to_string_pretty(doc).ok()
                } else {
                    serde_json::to_string(doc).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "match"
    } else {
        "matches"
    }
}

/// Render the report text shown to the user and saved to disk
fn render_markdown(report: &Report) -> String {
    let query = &report.query;
    let mut output = String::new();

    output.push_str("# Search results\n\n");
    let kind = if query.literal { "text" } else { "pattern" };
    output.push_str(&format!("Searched for {} \"{}\"", kind, query.pattern));
    if !query.is_whole_tree() {
        output.push_str(&format!(" in folder {}", query.folder));
    }
    output.push_str(&format!(
        ": {} {} in {} {}\n",
        report.total_matches(),
        plural(report.total_matches()),
        report.documents.len(),
        if report.documents.len() == 1 {
            "document"
        } else {
            "documents"
        }
    ));

    for doc in &report.documents {
        output.push('\n');
        render_document(&mut output, doc);
    }

    output
}

fn render_document(output: &mut String, doc: &DocumentResult) {
    output.push_str(&format!(
        "## {} ({} {})\n\n",
        doc.document_path,
        doc.match_count(),
        plural(doc.match_count())
    ));
    for m in &doc.matches {
        output.push_str(&format!(
            "- {}.{}:{}:{} {}\n",
            doc.document_path,
            DOCUMENT_EXTENSION,
            m.line_number,
            m.column_number,
            m.highlighted_context
        ));
    }
}

//! vaultgrep - search a tree of Markdown documents
//!
//! vaultgrep provides:
//! - Literal and regex search with smart case
//! - ripgrep or in-process search engines
//! - Exact per-occurrence columns and highlighted context
//! - Reports grouped by document, ranked by match count
//! - Persisted or lazily re-rendered report documents

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}

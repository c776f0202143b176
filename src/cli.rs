//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::backends::rg::{is_rg_available, DEFAULT_RG};
use crate::backends::version::probe_version;
use crate::backends::{make_backend, Engine};
use crate::core::config::Config;
use crate::core::model::{Query, WHOLE_TREE};
use crate::core::notify::Notifier;
use crate::core::paths::make_relative;
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::flows::publish::{issue, Outcome};
use crate::flows::search::SearchEngine;
use crate::flows::session::ReportSession;
use crate::flows::shell::Shell;

/// vaultgrep - search a tree of Markdown documents and report matches by document.
#[derive(Parser, Debug)]
#[command(name = "vaultgrep")]
#[command(
    author,
    version,
    about,
    long_about = r#"vaultgrep searches every Markdown document under ROOT, finds every
occurrence of a literal text or regular expression, and prints a report
grouped by document, ranked by number of matches.

Lowercase patterns match case-insensitively ("smart case"); any uppercase
character makes the search case-sensitive.

Examples:
    vaultgrep text todo
    vaultgrep pattern "TODO|FIXME" --folder projects
    vaultgrep --engine builtin text "meeting notes" --here
    vaultgrep shell
"#
)]
pub struct Cli {
    /// Root of the document tree.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root of the document tree (defaults to the current directory).\n\n\
Document paths in the report are relative to this root, extension stripped."
    )]
    pub root: PathBuf,

    /// Configuration file (JSON).
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        long_help = "Read configuration from FILE instead of ROOT/.vaultgrep.json.\n\n\
Keys: smartCase (bool), surround ({left,right} or false), saveResults (bool),\n\
ignoreFolders (list; a trailing /* matches every folder with that prefix)."
    )]
    pub config: Option<PathBuf>,

    /// Search engine (rg/builtin).
    #[arg(
        long,
        global = true,
        default_value = "rg",
        value_name = "ENGINE",
        long_help = "Select the search engine.\n\n\
Supported values:\n\
- rg (default): shell out to ripgrep\n\
- builtin: walk and scan the tree in-process"
    )]
    pub engine: String,

    /// ripgrep executable.
    #[arg(long = "rg", global = true, env = "VAULTGREP_RG", default_value = DEFAULT_RG, value_name = "PATH")]
    pub rg_program: String,

    /// Output format (md/json/jsonl).
    #[arg(
        long,
        global = true,
        default_value = "md",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- md (default): the report document text\n\
- json: the ranked report as one JSON object\n\
- jsonl: one JSON object per document\n\n\
Persisted reports are always written as md."
    )]
    pub format: String,

    /// Disable colored notifications.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no notifications).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the search commands
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text or pattern to search for.
    #[arg(value_name = "PATTERN", default_value = "")]
    pub pattern: String,

    /// Limit the search to a folder under ROOT.
    #[arg(long, value_name = "DIR", conflicts_with = "here")]
    pub folder: Option<String>,

    /// Limit the search to the current directory.
    #[arg(long)]
    pub here: bool,

    /// Write the report to ROOT/search-results.md.
    #[arg(long)]
    pub save: bool,

    /// Always match case exactly.
    #[arg(long)]
    pub no_smart_case: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search literal text.
    #[command(long_about = "Search for literal TEXT in every document under ROOT.\n\n\
An empty TEXT does nothing.\n\n\
Examples:\n\
  vaultgrep text todo\n\
  vaultgrep text \"a.b(c\" --folder notes\n")]
    Text(SearchArgs),

    /// Search a regular expression.
    #[command(long_about = "Search for a regular expression in every document under ROOT.\n\n\
An empty PATTERN does nothing.\n\n\
Examples:\n\
  vaultgrep pattern \"TODO|FIXME\"\n\
  vaultgrep pattern \"\\d{4}-\\d{2}\" --here\n")]
    Pattern(SearchArgs),

    /// Show this tool's and ripgrep's versions.
    Version,

    /// Run an interactive session reading commands from stdin.
    #[command(long_about = "Keep one search session open and read commands from stdin:\n\n\
  text <PATTERN>, pattern <PATTERN>, text-here <PATTERN>, pattern-here <PATTERN>,\n\
  cd <DIR>, pwd, show, stat, help, quit\n\n\
`show` re-runs the last query against the current tree.")]
    Shell,
}

/// Install the tracing subscriber on stderr
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Folder scope for a search relative to root
fn resolve_folder(root: &Path, args: &SearchArgs) -> Result<String> {
    if let Some(folder) = &args.folder {
        let path = Path::new(folder);
        if !path.is_absolute() {
            return Ok(folder.clone());
        }
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        return make_relative(&path, root)
            .with_context(|| format!("{} is not inside {}", path.display(), root.display()));
    }
    if args.here {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let cwd = cwd.canonicalize().unwrap_or(cwd);
        return make_relative(&cwd, root).with_context(|| {
            format!("{} is not inside {}", cwd.display(), root.display())
        });
    }
    Ok(WHOLE_TREE.to_string())
}

fn run_search(
    root: &Path,
    mut config: Config,
    backend: Box<dyn crate::backends::SearchBackend>,
    args: SearchArgs,
    literal: bool,
    render_config: RenderConfig,
    notifier: Notifier,
) -> Result<()> {
    if args.save {
        config.save_results = true;
    }
    if args.no_smart_case {
        config.smart_case = false;
    }

    let folder = resolve_folder(root, &args)?;
    let Some(query) = Query::new(args.pattern, literal, &folder) else {
        tracing::debug!("empty pattern, nothing to do");
        return Ok(());
    };

    let engine = SearchEngine::new(root, config, backend);

    // Structured formats bypass the report document
    if render_config.format != OutputFormat::Markdown && !engine.config().save_results {
        match engine.run(&query) {
            Ok(report) => println!("{}", Renderer::with_config(render_config).render(&report)),
            Err(err) => notifier.emit(&notifier.format_error(&err)),
        }
        return Ok(());
    }

    let session = ReportSession::new();
    match issue(&engine, &session, query)? {
        Outcome::Shown(text) => {
            tracing::debug!("report document is {} bytes", text.len());
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        Outcome::Saved(path) => {
            let shown = make_relative(&path, root).unwrap_or_else(|| path.display().to_string());
            notifier.emit(&notifier.format_saved(&shown));
        }
        Outcome::Notice(err) => notifier.emit(&notifier.format_error(&err)),
    }
    Ok(())
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }
    let notifier = Notifier::new(cli.quiet);

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);
    let engine_kind: Engine = cli
        .engine
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);

    if let Commands::Version = cli.command {
        match probe_version(&cli.rg_program) {
            Ok(info) => println!("{}", info.render()),
            Err(err) => {
                println!("vaultgrep {}", env!("CARGO_PKG_VERSION"));
                notifier.emit(&notifier.format_error(&err));
            }
        }
        return Ok(());
    }

    if engine_kind == Engine::Ripgrep && cli.rg_program == DEFAULT_RG && !is_rg_available() {
        tracing::warn!("ripgrep not found on PATH; --engine builtin searches without it");
    }

    let config = Config::load(&root, cli.config.as_deref())?;
    let backend = make_backend(engine_kind, &cli.rg_program);

    match cli.command {
        Commands::Text(args) => {
            run_search(&root, config, backend, args, true, render_config, notifier)
        }
        Commands::Pattern(args) => {
            run_search(&root, config, backend, args, false, render_config, notifier)
        }
        Commands::Shell => {
            let engine = SearchEngine::new(&root, config, backend);
            let session = ReportSession::new();
            let mut shell = Shell::new(&engine, &session, notifier);
            let stdin = std::io::stdin();
            shell.run(stdin.lock(), std::io::stdout().lock())
        }
        Commands::Version => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_command() {
        let cli = Cli::try_parse_from(["vaultgrep", "text", "todo", "--folder", "notes"]).unwrap();
        match cli.command {
            Commands::Text(args) => {
                assert_eq!(args.pattern, "todo");
                assert_eq!(args.folder.as_deref(), Some("notes"));
                assert!(!args.here);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.engine, "rg");
        assert_eq!(cli.format, "md");
    }

    #[test]
    fn test_parse_pattern_without_argument() {
        let cli = Cli::try_parse_from(["vaultgrep", "pattern"]).unwrap();
        assert!(matches!(cli.command, Commands::Pattern(ref a) if a.pattern.is_empty()));
    }

    #[test]
    fn test_folder_conflicts_with_here() {
        assert!(
            Cli::try_parse_from(["vaultgrep", "text", "x", "--folder", "a", "--here"]).is_err()
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "vaultgrep", "text", "x", "--engine", "builtin", "--format", "json", "--pretty",
        ])
        .unwrap();
        assert_eq!(cli.engine, "builtin");
        assert!(cli.pretty);
    }

    #[test]
    fn test_resolve_folder_defaults_to_whole_tree() {
        let args = SearchArgs {
            pattern: "x".to_string(),
            folder: None,
            here: false,
            save: false,
            no_smart_case: false,
        };
        assert_eq!(resolve_folder(Path::new("/vault"), &args).unwrap(), ".");
    }

    #[test]
    fn test_resolve_folder_explicit() {
        let args = SearchArgs {
            pattern: "x".to_string(),
            folder: Some("notes/daily".to_string()),
            here: false,
            save: false,
            no_smart_case: false,
        };
        assert_eq!(
            resolve_folder(Path::new("/vault"), &args).unwrap(),
            "notes/daily"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_folder_absolute_is_made_relative() {
        let args = SearchArgs {
            pattern: "x".to_string(),
            folder: Some("/vaultgrep-test-vault/notes/daily".to_string()),
            here: false,
            save: false,
            no_smart_case: false,
        };
        assert_eq!(
            resolve_folder(Path::new("/vaultgrep-test-vault"), &args).unwrap(),
            "notes/daily"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_folder_absolute_outside_root_fails() {
        let args = SearchArgs {
            pattern: "x".to_string(),
            folder: Some("/elsewhere/notes".to_string()),
            here: false,
            save: false,
            no_smart_case: false,
        };
        assert!(resolve_folder(Path::new("/vaultgrep-test-vault"), &args).is_err());
    }
}

//! Interactive shell
//!
//! A line-oriented host for one long-lived session. Each input line is a
//! command:
//!
//! ```text
//! text <PATTERN>           search literal text in the whole tree
//! pattern <PATTERN>        search a regex in the whole tree
//! text-here <PATTERN>      search literal text in the current folder
//! pattern-here <PATTERN>   search a regex in the current folder
//! cd <DIR>                 set the current folder ("." for the root)
//! pwd                      print the current folder
//! show                     re-render the report document from the live tree
//! stat                     print the report document's size
//! help                     list commands
//! quit | exit              leave
//! ```

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::core::model::{Query, VIRTUAL_REPORT_NAME, WHOLE_TREE};
use crate::core::notify::Notifier;
use crate::core::paths::normalize_folder;
use crate::flows::document::{DocumentRegistry, ReportDocument};
use crate::flows::publish::{issue, report_path, Outcome};
use crate::flows::search::SearchEngine;
use crate::flows::session::ReportSession;

const HELP: &str = "commands: text, pattern, text-here, pattern-here, cd, pwd, show, stat, help, quit";

/// Session host reading commands from a line source
pub struct Shell<'a> {
    engine: &'a SearchEngine,
    session: &'a ReportSession,
    registry: DocumentRegistry<'a>,
    notifier: Notifier,
    folder: String,
}

impl<'a> Shell<'a> {
    pub fn new(engine: &'a SearchEngine, session: &'a ReportSession, notifier: Notifier) -> Self {
        let mut registry = DocumentRegistry::new();
        if !engine.config().save_results {
            registry.register(
                VIRTUAL_REPORT_NAME,
                Box::new(ReportDocument::new(session, engine)),
            );
        }
        Self {
            engine,
            session,
            registry,
            notifier,
            folder: WHOLE_TREE.to_string(),
        }
    }

    /// Process commands until input ends or `quit`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r').trim_start();
            if line.trim_end().is_empty() {
                continue;
            }
            if !self.execute(line, &mut out)? {
                break;
            }
            out.flush()?;
        }
        Ok(())
    }

    /// Execute one command, returning false when the shell should stop
    fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        // One separator character; the rest of the line is the pattern as typed
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a),
            None => (line, ""),
        };

        match command {
            "text" => self.search(Query::whole_tree(arg, true), out)?,
            "pattern" => self.search(Query::whole_tree(arg, false), out)?,
            "text-here" => self.search(Query::new(arg, true, &self.folder), out)?,
            "pattern-here" => self.search(Query::new(arg, false, &self.folder), out)?,
            "cd" => {
                self.folder = normalize_folder(arg.trim());
                writeln!(out, "{}", self.folder)?;
            }
            "pwd" => writeln!(out, "{}", self.folder)?,
            "show" => match self.registry.get(VIRTUAL_REPORT_NAME) {
                Some(doc) => write!(out, "{}", doc.read())?,
                None => writeln!(
                    out,
                    "results are saved to {}",
                    report_path(self.engine.root()).display()
                )?,
            },
            "stat" => match self.registry.get(VIRTUAL_REPORT_NAME) {
                Some(doc) => {
                    let stat = doc.stat();
                    writeln!(out, "{} bytes, read-only: {}", stat.size, stat.read_only)?;
                }
                None => writeln!(out, "no virtual report registered")?,
            },
            "help" => writeln!(out, "{}", HELP)?,
            "quit" | "exit" => return Ok(false),
            other => writeln!(out, "unknown command: {} ({})", other, HELP)?,
        }
        Ok(true)
    }

    fn search<W: Write>(&self, query: Option<Query>, out: &mut W) -> Result<()> {
        let Some(query) = query else {
            tracing::debug!("ignoring empty pattern");
            return Ok(());
        };

        match issue(self.engine, self.session, query)? {
            Outcome::Shown(text) => write!(out, "{}", text)?,
            Outcome::Saved(path) => {
                writeln!(out, "{}", self.notifier.format_saved(&path.display().to_string()))?
            }
            Outcome::Notice(err) => writeln!(out, "{}", self.notifier.format_error(&err))?,
        }
        Ok(())
    }
}

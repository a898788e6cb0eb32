//! Command implementations for scaffold-cli
//!
//! Every `add-*` command builds an [`Entry`], then runs [`merge_file`] once
//! per managed document and reports the outcomes together.

pub mod env;
pub mod nav;
pub mod provider;
pub mod router;
pub mod status;

pub use env::{EnvArgs, run_add_env};
pub use nav::run_add_nav_link;
pub use provider::run_add_provider;
pub use router::run_add_router;
pub use status::run_status;

use colored::Colorize;
use serde::Serialize;

use scaffold_content::{ConstructHandler, Document, Entry, merge};
use scaffold_fs::{LockedFile, NormalizedPath, RobustnessConfig};

use crate::context::ProjectContext;
use crate::error::{CliError, Result};
use crate::formatter::format_or_keep;

/// Flags shared by every `add-*` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    pub json: bool,
}

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    Updated { path: String },
    /// Dry run: the unified diff that would have been written.
    Preview { path: String, diff: String },
    Unchanged { path: String },
    /// The document's shape was not recognised; add `snippet` by hand.
    Manual {
        path: String,
        reason: String,
        snippet: String,
    },
    Missing { path: String, snippet: String },
}

impl Outcome {
    fn needs_attention(&self) -> bool {
        matches!(self, Self::Manual { .. } | Self::Missing { .. })
    }

    fn print(&self) {
        match self {
            Self::Updated { path } => println!("  {} {}", "updated".green().bold(), path),
            Self::Preview { path, diff } => {
                println!("  {} {}", "would update".yellow().bold(), path);
                for line in diff.lines() {
                    let line = if line.starts_with('+') && !line.starts_with("+++") {
                        line.green()
                    } else if line.starts_with('-') && !line.starts_with("---") {
                        line.red()
                    } else {
                        line.dimmed()
                    };
                    println!("    {line}");
                }
            }
            Self::Unchanged { path } => {
                println!("  {} {} (already present)", "unchanged".dimmed(), path)
            }
            Self::Manual {
                path,
                reason,
                snippet,
            } => {
                println!("  {} {}", "manual edit needed".red().bold(), path);
                println!("    {}", reason.dimmed());
                println!("    Add the following by hand:");
                for line in snippet.lines() {
                    println!("      {}", line.cyan());
                }
            }
            Self::Missing { path, snippet } => {
                println!("  {} {}", "missing".red().bold(), path);
                println!("    Create it, or add the following to the right file:");
                for line in snippet.lines() {
                    println!("      {}", line.cyan());
                }
            }
        }
    }
}

/// Outcomes of one command, printed together.
#[derive(Debug, Serialize)]
pub struct Report {
    pub command: &'static str,
    pub entry: String,
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn new(command: &'static str, entry: impl Into<String>) -> Self {
        Self {
            command,
            entry: entry.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    /// Print the report; documents left for a manual edit turn into an
    /// error so the exit status reflects them.
    pub fn finish(self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&self)?);
        } else {
            println!("{} {}", self.command.bold(), self.entry.cyan());
            for outcome in &self.outcomes {
                outcome.print();
            }
        }

        match self.outcomes.iter().filter(|o| o.needs_attention()).count() {
            0 => Ok(()),
            count => Err(CliError::Unrecognized { count }),
        }
    }
}

/// How [`merge_file`] treats a document that does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenMissing {
    /// Report it for a manual edit.
    Report,
    /// Start from an empty document.
    Create,
}

/// Merge `entry` into the project file at `relative`.
///
/// The file stays locked from read to write. Unrecognised shapes become
/// [`Outcome::Manual`]; planner defects and I/O failures are errors.
pub fn merge_file(
    ctx: &ProjectContext,
    relative: &NormalizedPath,
    handler: &dyn ConstructHandler,
    entry: &Entry,
    when_missing: WhenMissing,
    options: RunOptions,
) -> Result<Outcome> {
    let display_path = relative.to_string();
    let absolute = ctx.absolute(relative);
    let missing = || -> Result<Outcome> {
        tracing::warn!(path = %display_path, "managed file not found");
        Ok(Outcome::Missing {
            path: display_path.clone(),
            snippet: handler.manual_snippet(entry)?,
        })
    };

    // Locking creates parent directories; probe first so a missing file
    // leaves no trace.
    if when_missing == WhenMissing::Report && !absolute.is_file() {
        return missing();
    }
    let lock = LockedFile::acquire(&absolute, RobustnessConfig::default())?;

    let text = match (lock.read_text()?, when_missing) {
        (Some(text), _) => text,
        (None, WhenMissing::Create) => String::new(),
        (None, WhenMissing::Report) => return missing(),
    };

    let document = Document::new(relative.as_str(), text);
    let result = match merge(&document, handler, entry) {
        Ok(result) => result,
        Err(e) if e.is_recoverable() => {
            tracing::warn!(path = %display_path, error = %e, "document not updated");
            return Ok(Outcome::Manual {
                path: display_path,
                reason: e.to_string(),
                snippet: handler.manual_snippet(entry)?,
            });
        }
        Err(e) => return Err(e.into()),
    };

    if !result.applied {
        return Ok(Outcome::Unchanged { path: display_path });
    }
    if options.dry_run {
        return Ok(Outcome::Preview {
            diff: result.unified_diff(&document),
            path: display_path,
        });
    }

    let text = format_or_keep(ctx.formatter.as_ref(), &absolute, result.document.into_source());
    lock.write(text.as_bytes())?;
    tracing::info!(path = %display_path, entry = %entry.name, "updated");
    Ok(Outcome::Updated { path: display_path })
}

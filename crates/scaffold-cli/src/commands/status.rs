//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use scaffold_content::{ConstructHandler, Document};
use scaffold_fs::NormalizedPath;

use crate::context::ProjectContext;
use crate::error::Result;

/// Recognition state of one managed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum FileState {
    Recognized {
        shape: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        entries: Option<usize>,
    },
    Unrecognized { reason: String },
    Missing,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileStatus {
    pub role: &'static str,
    pub path: String,
    #[serde(flatten)]
    pub state: FileState,
}

/// Classify every managed file without changing anything.
pub fn collect_status(ctx: &ProjectContext) -> Result<Vec<FileStatus>> {
    let config = &ctx.config;
    let env = config.env_handler()?;
    let router = config.router_handler();
    let nav = config.nav_handler();
    let provider = config.provider_handler();
    let dotenv = config.dotenv_handler();

    let managed: [(&'static str, NormalizedPath, &dyn ConstructHandler); 5] = [
        ("root router", ctx.source_path(config.root_router()), &router),
        ("navigation", ctx.source_path(&config.paths.nav), &nav),
        ("env schema", ctx.source_path(&config.paths.env_schema), &env),
        ("root layout", ctx.source_path(&config.paths.root_layout), &provider),
        ("dotenv", NormalizedPath::new(&config.paths.dotenv), &dotenv),
    ];

    managed
        .into_iter()
        .map(|(role, relative, handler)| {
            let state = classify_file(ctx, &relative, handler)?;
            Ok(FileStatus {
                role,
                path: relative.to_string(),
                state,
            })
        })
        .collect()
}

fn classify_file(
    ctx: &ProjectContext,
    relative: &NormalizedPath,
    handler: &dyn ConstructHandler,
) -> Result<FileState> {
    let absolute = ctx.absolute(relative);
    if !absolute.is_file() {
        return Ok(FileState::Missing);
    }

    let document = Document::new(relative.as_str(), scaffold_fs::read_text(&absolute)?);
    match handler.classify(&document) {
        Ok(shape) => Ok(FileState::Recognized {
            shape: shape.name(),
            entries: shape.entry_count(),
        }),
        Err(e) if e.is_recoverable() => Ok(FileState::Unrecognized {
            reason: e.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Run the status command
pub fn run_status(ctx: &ProjectContext, json: bool) -> Result<()> {
    let statuses = collect_status(ctx)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    println!("{}", "Project Status".bold());
    println!();
    println!("{}:   {}", "Root".dimmed(), ctx.root);
    println!(
        "{}:   {}",
        "Layout".dimmed(),
        if ctx.config.t3 { "t3" } else { "standard" }.cyan()
    );
    println!();

    for status in &statuses {
        let detail = match &status.state {
            FileState::Recognized {
                shape,
                entries: Some(n),
            } => format!("{} ({n} entries)", shape.green()),
            FileState::Recognized { shape, entries: None } => shape.green().to_string(),
            FileState::Unrecognized { reason } => {
                format!("{} {}", "unrecognized".red(), reason.dimmed())
            }
            FileState::Missing => "missing".yellow().to_string(),
        };
        println!("  {:<12} {} {}", status.role, status.path.cyan(), detail);
    }

    Ok(())
}

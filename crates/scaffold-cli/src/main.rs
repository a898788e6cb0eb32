//! Scaffold CLI
//!
//! Adds entries to the generated files of a web project: routers to the root
//! router, links to the navigation list, variables to the env schema and
//! `.env`, providers to the root layout. Each file is updated in place and
//! left untouched when the entry is already there.

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod formatter;
mod logging;
mod naming;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::{EnvArgs, RunOptions};
use context::ProjectContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not initialise logging: {}", "warning".yellow(), e);
    }
    tracing::debug!(?cli, "parsed arguments");

    let Some(command) = cli.command else {
        println!("{} project scaffolding CLI", "scaffold".green().bold());
        println!();
        println!("Run {} for available commands.", "scaffold --help".cyan());
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    let ctx = ProjectContext::load(&cwd, cli.config.as_deref())?;
    execute_command(&ctx, command, cli.json)
}

fn execute_command(ctx: &ProjectContext, cmd: Commands, json: bool) -> Result<()> {
    match cmd {
        Commands::AddRouter { name, dry_run } => {
            commands::run_add_router(ctx, &name, RunOptions { dry_run, json })
        }
        Commands::AddNavLink {
            name,
            title,
            dry_run,
        } => commands::run_add_nav_link(ctx, &name, title.as_deref(), RunOptions { dry_run, json }),
        Commands::AddEnv {
            key,
            public,
            url,
            validator,
            value,
            dry_run,
        } => commands::run_add_env(
            ctx,
            EnvArgs {
                key,
                public,
                url,
                validator,
                value,
            },
            RunOptions { dry_run, json },
        ),
        Commands::AddProvider {
            name,
            from,
            dry_run,
        } => commands::run_add_provider(ctx, &name, &from, RunOptions { dry_run, json }),
        Commands::Status => commands::run_status(ctx, json),
    }
}

//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scaffold - Add routers, links, env variables and providers to a
/// generated project without clobbering hand edits
#[derive(Parser, Debug)]
#[command(name = "scaffold")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project config file (defaults to the nearest scaffold.toml)
    #[arg(long, global = true, env = "SCAFFOLD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Register a router in the root router
    ///
    /// Examples:
    ///   scaffold add-router user
    ///   scaffold add-router billing-accounts --dry-run
    AddRouter {
        /// Router name; converted to camelCase for the key
        name: String,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Add a link to the navigation list
    AddNavLink {
        /// Resource name; the route is its kebab-case form
        name: String,

        /// Link title (defaults to the title-cased name)
        #[arg(long)]
        title: Option<String>,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Declare an environment variable in the env schema and .env
    ///
    /// Examples:
    ///   scaffold add-env DATABASE_URL --url
    ///   scaffold add-env NEXT_PUBLIC_APP_NAME --public --value demo
    AddEnv {
        /// Variable name; converted to SCREAMING_SNAKE_CASE
        key: String,

        /// Expose the variable to the client
        #[arg(long)]
        public: bool,

        /// Validate the value as a URL
        #[arg(long, conflicts_with = "validator")]
        url: bool,

        /// Validator expression, e.g. 'z.enum(["a", "b"])'
        #[arg(long)]
        validator: Option<String>,

        /// Value written to .env
        #[arg(long)]
        value: Option<String>,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Wrap the root layout's children in a provider component
    AddProvider {
        /// Provider component name
        name: String,

        /// Module to import the provider from: a package name or a project file
        #[arg(long)]
        from: String,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the recognised shape of every managed file
    Status,
}

//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod cache;
pub mod chart;
pub mod context;
pub mod init;
pub mod langs;
pub mod show;
pub mod status;
pub mod watch;

pub use context::CommandContext;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting
    Pretty,
    /// Table format - one row per entry (default)
    #[default]
    Table,
    /// JSON format - structured for scripts
    Json,
}

/// Sort order for the portfolio listing
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum SortOrder {
    /// Most recently updated repositories first
    #[default]
    Updated,
    /// Alphabetical by project title
    Title,
}

/// Gitfolio - project portfolio cards for your GitHub repositories
#[derive(Parser, Debug)]
#[command(name = "gitfolio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "GITFOLIO_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "GITFOLIO_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// GitHub token (overrides the config file)
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env = true)]
    pub token: Option<String>,

    /// Directory of project markdown files (overrides the config file)
    #[arg(long, global = true, env = "GITFOLIO_PROJECTS_DIR", hide_env = true)]
    pub projects_dir: Option<PathBuf>,

    /// Custom API host for development/testing
    #[arg(long, global = true, env = "GITFOLIO_API_HOST", hide = true)]
    pub api_host: Option<String>,

    /// Bypass the repository cache, always fetch fresh data
    #[arg(long, global = true, env = "GITFOLIO_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "GITFOLIO_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Gitfolio configuration
    Init,

    /// Show configuration and cache status
    Status,

    /// Render the portfolio with repository data
    Show {
        /// Sort order for the listing
        #[arg(long, value_enum, default_value = "updated")]
        sort: SortOrder,
    },

    /// Show the language breakdown for one repository
    Langs {
        /// Repository as `owner/name` or a GitHub URL
        repo: String,
    },

    /// Write an SVG language pie chart for one repository
    Chart {
        /// Repository as `owner/name` or a GitHub URL
        repo: String,

        /// Output file (stdout when omitted)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Render the portfolio and keep refreshing it on a timer
    Watch {
        /// Refresh period in minutes (defaults to the configured value)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Manage the local repository cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics, or one repository's entry
    Status {
        /// Repository as `owner/name` or a GitHub URL
        repo: Option<String>,
    },
    /// Clear all cached data
    Clear,
    /// Print the cache file path
    Path,
}

/// Global CLI options passed to all command handlers.
///
/// Consolidates the global flags so handler signatures stay small.
/// Precedence for each option is CLI flag > environment variable >
/// config file > default; this struct captures the CLI/env layer.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format, when given on the command line or environment
    pub format: Option<OutputFormat>,

    /// Custom config file path
    pub config: Option<String>,

    /// GitHub token override
    pub token: Option<String>,

    /// Projects directory override
    pub projects_dir: Option<PathBuf>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,

    /// Bypass the repository cache
    pub no_cache: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            token: cli.token.clone(),
            projects_dir: cli.projects_dir.clone(),
            api_host: cli.api_host.clone(),
            no_cache: cli.no_cache,
        }
    }

    /// Get config path as `Option<&str>`
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}

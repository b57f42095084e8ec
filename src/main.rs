//! Gitfolio CLI - project portfolio cards for your GitHub repositories

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod output;
mod portfolio;
mod stats;

use cli::{CacheCommands, Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Show { sort } => cli::show::run(&opts, sort).await,
        Commands::Langs { repo } => cli::langs::run(&opts, &repo).await,
        Commands::Chart { repo, out } => cli::chart::run(&opts, &repo, out.as_deref()).await,
        Commands::Watch { interval } => cli::watch::run(&opts, interval).await,
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status { repo } => cli::cache::status(&opts, repo.as_deref()),
            CacheCommands::Clear => cli::cache::clear(&opts),
            CacheCommands::Path => cli::cache::path(),
        },
    }
}

//! Status command implementation

use colored::Colorize;

use crate::cache::{FileStorage, RepoCache};
use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Run the status command to display configuration and cache state
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Gitfolio Configuration Status".bold());

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            let config_path = Config::resolve_path(opts.config_ref())?;
            println!("Config file: {}", config_path.display().to_string().cyan());

            if config.github_token.is_some() {
                println!("{} GitHub token configured", "✓".green());
            } else {
                println!(
                    "{} No GitHub token (unauthenticated, stricter rate limits)",
                    "-".yellow()
                );
            }

            match &config.projects_dir {
                Some(dir) => {
                    println!("{} Projects directory: {}", "✓".green(), dir.display());
                }
                None => {
                    println!("{} Projects directory not set", "✗".red());
                    println!("  → Run 'gitfolio init' or pass --projects-dir");
                }
            }

            println!(
                "Auto-refresh period: {} min",
                config.preferences.refresh_minutes
            );
        }
        Err(Error::Config(ConfigError::NotFound)) => {
            println!("{} No configuration file found", "✗".red());
            println!("  → Run 'gitfolio init' to set up");
        }
        Err(err) => return Err(err),
    }

    println!();
    match FileStorage::open() {
        Ok(storage) => {
            let path = storage.path().display().to_string();
            let stats = RepoCache::new(storage).stats();
            println!("Cache: {}", path.cyan());
            println!(
                "  {} entries ({} valid, {} stale)",
                stats.entries, stats.valid_entries, stats.stale_entries
            );
        }
        Err(err) => println!("Cache unavailable: {}", err),
    }

    Ok(())
}

//! Init command implementation

use std::path::PathBuf;

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the optional GitHub token and the projects directory,
/// then writes the configuration file. No network calls are made; an
/// invalid token simply surfaces later as unauthorized fetches that
/// degrade to cached or empty data.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to Gitfolio!".bold().green());
    println!("Let's set up your portfolio configuration.\n");

    let mut config = Config::load_or_default(opts.config_ref())?;

    let token: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("GitHub token (optional, Enter to skip)")
        .allow_empty_password(true)
        .interact()?;
    if !token.is_empty() {
        config.github_token = Some(token);
    }

    let default_dir = config
        .projects_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "projects".to_string());

    let projects_dir: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Projects directory (markdown files)")
        .default(default_dir)
        .interact_text()?;
    config.projects_dir = Some(PathBuf::from(projects_dir));

    config.save_at(opts.config_ref())?;

    let path = Config::resolve_path(opts.config_ref())?;
    println!("\n{} Configuration saved to {}", "✓".green(), path.display());

    if config.github_token.is_none() {
        println!(
            "{}",
            "Running unauthenticated; GitHub rate limits will be stricter.".yellow()
        );
    }

    Ok(())
}

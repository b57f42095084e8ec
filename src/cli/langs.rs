//! Language breakdown command

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::{Error, Result};
use crate::output::{format_json, format_table, hex_rgb};
use crate::stats::{calculate_breakdown, format_bytes, format_percentage};

use crate::client::RepoIdentity;

#[derive(Tabled)]
struct LanguageRow {
    #[tabled(rename = " ")]
    swatch: String,
    #[tabled(rename = "LANGUAGE")]
    language: String,
    #[tabled(rename = "SHARE")]
    share: String,
    #[tabled(rename = "BYTES")]
    bytes: String,
    #[tabled(rename = "COLOR")]
    color: String,
}

/// Run the langs command for one repository
pub async fn run(opts: &GlobalOptions, repo_spec: &str) -> Result<()> {
    let repo = RepoIdentity::parse(repo_spec)
        .ok_or_else(|| Error::Other(format!("Not a GitHub repository: {}", repo_spec)))?;

    let ctx = CommandContext::new(opts)?;
    let data = ctx.client.fetch_repo_data(&repo).await;

    if data.source.is_degraded() {
        eprintln!(
            "{}",
            format!("⚠ Could not reach GitHub for {}, showing fallback data", repo).yellow()
        );
    }

    let breakdown = calculate_breakdown(&data.record.languages);

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", format_json(&breakdown)?);
        }
        _ => {
            if breakdown.is_empty() {
                println!("No language data available for {}", repo);
                return Ok(());
            }

            let rows: Vec<LanguageRow> = breakdown
                .iter()
                .map(|entry| LanguageRow {
                    swatch: match hex_rgb(entry.color) {
                        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
                        None => "●".to_string(),
                    },
                    language: entry.language.clone(),
                    share: format_percentage(entry.percentage),
                    bytes: format_bytes(entry.bytes),
                    color: entry.color.to_string(),
                })
                .collect();

            println!("{}", format_table(&rows));
        }
    }

    Ok(())
}

//! Chart command implementation
//!
//! Renders one repository's language breakdown as an SVG pie chart.

use std::path::Path;

use crate::cli::{CommandContext, GlobalOptions};
use crate::client::RepoIdentity;
use crate::error::{Error, Result};
use crate::stats::{calculate_breakdown, generate_pie_chart_data};

/// Run the chart command
pub async fn run(opts: &GlobalOptions, repo_spec: &str, out: Option<&Path>) -> Result<()> {
    let repo = RepoIdentity::parse(repo_spec)
        .ok_or_else(|| Error::Other(format!("Not a GitHub repository: {}", repo_spec)))?;

    let ctx = CommandContext::new(opts)?;
    let data = ctx.client.fetch_repo_data(&repo).await;

    let breakdown = calculate_breakdown(&data.record.languages);
    if breakdown.is_empty() {
        println!("No language data available for {}", repo);
        return Ok(());
    }

    let chart = generate_pie_chart_data(&breakdown);
    let svg = chart.to_svg();

    match out {
        Some(path) => {
            std::fs::write(path, &svg)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", svg),
    }

    Ok(())
}

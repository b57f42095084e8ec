//! Show command implementation
//!
//! Loads every project, fetches repository data through the cache, and
//! renders the portfolio in the selected format.

use std::time::Duration;

use chrono::{DateTime, Utc};
use colored::Colorize;
use indicatif::ProgressBar;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, SortOrder};
use crate::error::Result;
use crate::output::{format_json, format_table, hex_rgb};
use crate::portfolio::Project;
use crate::stats::{LanguageBreakdownEntry, calculate_breakdown, format_bytes, format_percentage};

/// Run the show command
pub async fn run(opts: &GlobalOptions, sort: SortOrder) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let paths = ctx.discover_projects()?;

    if paths.is_empty() {
        println!(
            "No project files found in {}",
            ctx.require_projects_dir()?.display()
        );
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Loading {} projects...", paths.len()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let mut registry = ctx.registry();
    let load_result = registry.load_projects(&paths).await;
    spinner.finish_and_clear();
    load_result?;

    match sort {
        SortOrder::Updated => registry.sort_by_last_updated(),
        SortOrder::Title => registry.sort_by_title(),
    }

    render(registry.projects(), ctx.format)
}

/// Render loaded projects in the given format.
///
/// Shared with `watch`, which re-renders after every refresh pass.
pub fn render(projects: &[Project], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let reports: Vec<ProjectReport> = projects.iter().map(ProjectReport::from).collect();
            println!("{}", format_json(&reports)?);
        }
        OutputFormat::Table => {
            let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
            println!("{}", format_table(&rows));
        }
        OutputFormat::Pretty => {
            for project in projects {
                print_pretty(project);
                println!();
            }
        }
    }
    Ok(())
}

fn format_updated(updated: Option<DateTime<Utc>>) -> String {
    match updated {
        Some(timestamp) => timestamp.format("%Y-%m-%d").to_string(),
        None => "Unknown".to_string(),
    }
}

/// Terminal swatch in the language's color
fn swatch(color: &str) -> String {
    match hex_rgb(color) {
        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
        None => "●".to_string(),
    }
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "REPOSITORY")]
    repository: String,
    #[tabled(rename = "UPDATED")]
    updated: String,
    #[tabled(rename = "TOP LANGUAGE")]
    top_language: String,
    #[tabled(rename = "PREVIEWS")]
    previews: String,
    #[tabled(rename = "DATA")]
    source: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        let repository = project
            .repo
            .as_ref()
            .map(|repo| repo.to_string())
            .unwrap_or_else(|| "-".to_string());

        let (updated, top_language, previews, source) = match &project.data {
            Some(data) => {
                let breakdown = calculate_breakdown(&data.record.languages);
                let top_language = breakdown
                    .first()
                    .map(|entry| {
                        format!("{} {}", entry.language, format_percentage(entry.percentage))
                    })
                    .unwrap_or_else(|| "-".to_string());
                (
                    format_updated(data.record.last_updated),
                    top_language,
                    data.record.preview_images.len().to_string(),
                    data.source.label().to_string(),
                )
            }
            None => (
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
            ),
        };

        Self {
            title: project.metadata.title.clone(),
            repository,
            updated,
            top_language,
            previews,
            source,
        }
    }
}

#[derive(Serialize)]
struct RepositoryReport<'a> {
    repository: String,
    last_updated: Option<DateTime<Utc>>,
    source: &'static str,
    languages: Vec<LanguageBreakdownEntry>,
    preview_images: &'a [String],
}

#[derive(Serialize)]
struct ProjectReport<'a> {
    title: &'a str,
    description: &'a str,
    role: &'a str,
    features: &'a [String],
    source_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<RepositoryReport<'a>>,
}

impl<'a> From<&'a Project> for ProjectReport<'a> {
    fn from(project: &'a Project) -> Self {
        let repository = match (&project.repo, &project.data) {
            (Some(repo), Some(data)) => Some(RepositoryReport {
                repository: repo.to_string(),
                last_updated: data.record.last_updated,
                source: data.source.label(),
                languages: calculate_breakdown(&data.record.languages),
                preview_images: &data.record.preview_images,
            }),
            _ => None,
        };

        Self {
            title: &project.metadata.title,
            description: &project.metadata.description,
            role: &project.metadata.role,
            features: &project.metadata.features,
            source_file: project.path.display().to_string(),
            repository,
        }
    }
}

/// Card-style rendering for one project
fn print_pretty(project: &Project) {
    match &project.repo {
        Some(repo) => println!(
            "{}  {}",
            project.metadata.title.bold(),
            format!("({})", repo).dimmed()
        ),
        None => println!("{}", project.metadata.title.bold()),
    }

    if !project.metadata.description.is_empty() {
        println!("  {}", project.metadata.description);
    }
    if !project.metadata.role.is_empty() {
        println!("  Role: {}", project.metadata.role);
    }
    if !project.metadata.features.is_empty() {
        println!("  Features:");
        for feature in &project.metadata.features {
            println!("    - {}", feature);
        }
    }

    let Some(data) = &project.data else {
        return;
    };

    if data.source.is_degraded() {
        println!(
            "  {}",
            "⚠ Repository data unavailable, showing fallback".yellow()
        );
    }

    println!(
        "  Updated: {} {}",
        format_updated(data.record.last_updated),
        format!("[{}]", data.source.label()).dimmed()
    );

    let breakdown = calculate_breakdown(&data.record.languages);
    if breakdown.is_empty() {
        println!("  {}", "No language data available".dimmed());
    } else {
        println!("  Languages:");
        for entry in breakdown.iter().take(5) {
            println!(
                "    {} {:<14} {:>6}  {}",
                swatch(entry.color),
                entry.language,
                format_percentage(entry.percentage),
                format_bytes(entry.bytes).dimmed()
            );
        }
        if breakdown.len() > 5 {
            println!("    {}", format!("+ {} more", breakdown.len() - 5).dimmed());
        }
    }

    if !data.record.preview_images.is_empty() {
        println!("  Previews: {} images", data.record.preview_images.len());
    }
}

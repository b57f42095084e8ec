//! Markdown project file scanner
//!
//! Line-oriented extraction of project metadata from the simple format:
//!
//! ```markdown
//! # Project Title
//! ## Description
//! Free text, possibly over several lines.
//! ## Role
//! Your role.
//! ## Features
//! - Feature one
//! - Feature two
//! ## Repository
//! https://github.com/owner/name
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static NUMBERED_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").unwrap());

static REPO_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://github\.com/[^\s)]+").unwrap());

/// Metadata for one portfolio project
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectMetadata {
    pub title: String,
    pub description: String,
    pub role: String,
    pub features: Vec<String>,
    /// Repository URL from the Repository section, empty when absent
    pub repo_link: String,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Description,
    Role,
    Features,
    Repo,
}

/// Append a continuation line, joining paragraphs with single spaces
fn append_text(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(line);
}

/// Extract project metadata from markdown content.
///
/// Unknown sections and malformed lines are skipped; missing sections
/// leave their fields empty.
pub fn parse_project(markdown: &str) -> ProjectMetadata {
    let mut project = ProjectMetadata::default();
    let mut section: Option<Section> = None;

    for line in markdown.lines() {
        let trimmed = line.trim();
        let lowered = trimmed.to_lowercase();

        if trimmed.starts_with("# ") && !trimmed.starts_with("## ") {
            project.title = trimmed[2..].trim().to_string();
            section = None;
        } else if lowered.starts_with("## description") {
            section = Some(Section::Description);
        } else if lowered.starts_with("## role") {
            section = Some(Section::Role);
        } else if lowered.starts_with("## features") {
            section = Some(Section::Features);
        } else if lowered.starts_with("## repository") || lowered.starts_with("## repo") {
            section = Some(Section::Repo);
        } else if !trimmed.is_empty() {
            match section {
                Some(Section::Description) if !trimmed.starts_with("##") => {
                    append_text(&mut project.description, trimmed);
                }
                Some(Section::Role) if !trimmed.starts_with("##") => {
                    append_text(&mut project.role, trimmed);
                }
                Some(Section::Features) => {
                    if let Some(item) = trimmed
                        .strip_prefix("- ")
                        .or_else(|| trimmed.strip_prefix("* "))
                    {
                        project.features.push(item.trim().to_string());
                    } else if NUMBERED_ITEM_RE.is_match(trimmed) {
                        let item = NUMBERED_ITEM_RE.replace(trimmed, "");
                        project.features.push(item.trim().to_string());
                    }
                }
                Some(Section::Repo) => {
                    if let Some(url) = REPO_LINK_RE.find(trimmed) {
                        project.repo_link = url.as_str().to_string();
                    }
                }
                _ => {}
            }
        }
    }

    project
}

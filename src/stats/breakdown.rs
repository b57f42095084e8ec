//! Language breakdown aggregation
//!
//! Pure transforms from raw per-language byte counts to the ranked,
//! colored, percentage-annotated view the cards render. No I/O, no state.

use serde::Serialize;

use super::colors::language_color;
use crate::client::LanguageBytes;

/// One language's share of a repository
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageBreakdownEntry {
    pub language: String,
    pub bytes: u64,
    /// Share of all bytes, in [0, 100]
    pub percentage: f64,
    pub color: &'static str,
}

/// Rank languages by share of bytes, descending.
///
/// An empty mapping, or one whose counts sum to zero, yields an empty
/// breakdown. The sort is stable, so equal shares keep the input order
/// (alphabetical, since the mapping is ordered by name).
pub fn calculate_breakdown(languages: &LanguageBytes) -> Vec<LanguageBreakdownEntry> {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut breakdown: Vec<LanguageBreakdownEntry> = languages
        .iter()
        .map(|(language, &bytes)| LanguageBreakdownEntry {
            language: language.clone(),
            bytes,
            percentage: (bytes as f64 / total as f64) * 100.0,
            color: language_color(language),
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    breakdown
}

/// Format a byte count with base-1024 units, two decimals at most.
///
/// Picks the largest unit where the value is still >= 1, clamped to GB.
/// Zero is special-cased up front.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut magnitude = 0;
    while value >= 1024.0 && magnitude < UNITS.len() - 1 {
        value /= 1024.0;
        magnitude += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[magnitude])
}

/// Format a percentage with one decimal place
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

//! Pie chart geometry
//!
//! Turns an ordered language breakdown into wedge paths in a fixed
//! 200x200 coordinate space, plus the SVG document the `chart` command
//! writes. Angles are degrees; the first segment starts at 12 o'clock.

use serde::Serialize;

use super::breakdown::{LanguageBreakdownEntry, format_percentage};

/// Chart center in the 200x200 viewport
pub const CENTER: (f64, f64) = (100.0, 100.0);

/// Chart radius
pub const RADIUS: f64 = 80.0;

/// Twelve o'clock, where the first segment begins
const START_ANGLE: f64 = -90.0;

/// One angular wedge of the pie
#[derive(Debug, Clone, Serialize)]
pub struct PieSegment {
    pub language: String,
    pub percentage: f64,
    pub color: &'static str,
    /// Degrees, -90 at 12 o'clock
    pub start_angle: f64,
    pub end_angle: f64,
    /// SVG path of the filled wedge
    pub path: String,
}

/// Segment geometry for one repository's breakdown
#[derive(Debug, Clone, Serialize)]
pub struct PieChart {
    pub segments: Vec<PieSegment>,
    pub center: (f64, f64),
    pub radius: f64,
}

/// Point on the chart circle at the given angle
fn point_at(angle_degrees: f64) -> (f64, f64) {
    let radians = angle_degrees.to_radians();
    (
        CENTER.0 + RADIUS * radians.cos(),
        CENTER.1 + RADIUS * radians.sin(),
    )
}

/// Compute wedge geometry for each breakdown entry, in input order.
///
/// Sweeps accumulate across the sequence, so when the percentages sum to
/// 100 the whole chart spans exactly 360 degrees (modulo float drift).
pub fn generate_pie_chart_data(breakdown: &[LanguageBreakdownEntry]) -> PieChart {
    let mut current_angle = START_ANGLE;

    let segments = breakdown
        .iter()
        .map(|entry| {
            let sweep = entry.percentage / 100.0 * 360.0;
            let start_angle = current_angle;
            let end_angle = current_angle + sweep;

            let (x1, y1) = point_at(start_angle);
            let (x2, y2) = point_at(end_angle);
            let large_arc_flag = if sweep > 180.0 { 1 } else { 0 };

            let path = format!(
                "M {} {} L {} {} A {} {} 0 {} 1 {} {} Z",
                CENTER.0, CENTER.1, x1, y1, RADIUS, RADIUS, large_arc_flag, x2, y2
            );

            current_angle = end_angle;

            PieSegment {
                language: entry.language.clone(),
                percentage: entry.percentage,
                color: entry.color,
                start_angle,
                end_angle,
                path,
            }
        })
        .collect();

    PieChart {
        segments,
        center: CENTER,
        radius: RADIUS,
    }
}

impl PieChart {
    /// Render the chart as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut svg = String::from(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 200 200\">\n",
        );

        for segment in &self.segments {
            svg.push_str(&format!(
                "  <path d=\"{}\" fill=\"{}\"><title>{}: {}</title></path>\n",
                segment.path,
                segment.color,
                segment.language,
                format_percentage(segment.percentage)
            ));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

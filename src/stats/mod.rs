//! Language statistics
//!
//! Pure aggregation from raw byte counts to ranked breakdowns and pie
//! chart geometry. Everything here is recomputed on demand from a
//! repository record; nothing is persisted.

pub mod breakdown;
pub mod colors;
pub mod pie;

pub use breakdown::{LanguageBreakdownEntry, calculate_breakdown, format_bytes, format_percentage};
pub use colors::{DEFAULT_COLOR, language_color};
pub use pie::{PieChart, PieSegment, generate_pie_chart_data};

//! Portfolio projects
//!
//! Markdown project descriptions plus the registry that joins them with
//! fetched repository metadata.

pub mod markdown;
pub mod registry;

pub use markdown::{ProjectMetadata, parse_project};
pub use registry::{Project, ProjectRegistry, RefreshHandle, spawn_auto_refresh};

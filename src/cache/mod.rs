//! Local cache for repository metadata
//!
//! One JSON document maps canonical repository URLs to time-stamped
//! records. Entries older than the validity window are not served
//! proactively but remain readable indefinitely as fallback data; the only
//! way entries leave the store is an explicit clear.

pub mod client;
pub mod storage;
pub mod store;

use std::time::Duration;

/// How long a cache entry satisfies reads without a network call (1 hour)
pub const VALIDITY_WINDOW: Duration = Duration::from_secs(60 * 60);

// Re-export main types
pub use client::{CachedGitHubClient, DataSource, RepoData};
#[cfg(test)]
pub use storage::MemoryStorage;
pub use storage::{FileStorage, Storage};
pub use store::{CacheEntry, CacheStats, CacheStatus, Clock, RepoCache, SystemClock};

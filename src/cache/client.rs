//! Cache-fronted GitHub client
//!
//! Wraps any [`GitHubApi`] implementation with the repository cache and the
//! fallback ladder that guarantees callers always receive a usable record:
//! valid cache, then fresh fetch, then stale cache, then empty placeholder.

use std::sync::Arc;

use super::storage::Storage;
use super::store::{CacheStats, CacheStatus, RepoCache};
use crate::client::{GitHubApi, RepoIdentity, RepoMetadata};
use crate::error::{CacheError, Error};

/// Where a [`RepoData`] record came from.
///
/// The fallback variants carry the fetch error so callers that care (status
/// output, telemetry) can see what went wrong without the error ever being
/// raised.
#[derive(Debug)]
pub enum DataSource {
    /// Fetched from the API just now
    Fresh,

    /// Served from a cache entry inside the validity window
    Cache,

    /// Fetch failed; served from a cache entry past the validity window
    StaleFallback(Error),

    /// Fetch failed with nothing cached; served an empty record
    Placeholder(Error),
}

impl DataSource {
    /// True for the two fallback variants
    pub fn is_degraded(&self) -> bool {
        matches!(self, DataSource::StaleFallback(_) | DataSource::Placeholder(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Fresh => "fresh",
            DataSource::Cache => "cache",
            DataSource::StaleFallback(_) => "stale",
            DataSource::Placeholder(_) => "placeholder",
        }
    }
}

/// A repository record plus its provenance
#[derive(Debug)]
pub struct RepoData {
    pub record: RepoMetadata,
    pub source: DataSource,
}

/// Cached wrapper for any [`GitHubApi`] implementation.
///
/// The cache is optional so `--no-cache` can bypass it entirely; without a
/// cache a failed fetch degrades straight to the placeholder record.
pub struct CachedGitHubClient<C: GitHubApi, S: Storage> {
    inner: Arc<C>,
    cache: Option<RepoCache<S>>,
}

impl<C: GitHubApi, S: Storage> CachedGitHubClient<C, S> {
    /// Wrap a client with the given cache
    pub fn new(inner: C, cache: RepoCache<S>) -> Self {
        Self {
            inner: Arc::new(inner),
            cache: Some(cache),
        }
    }

    /// Wrap a client with caching disabled
    pub fn without_cache(inner: C) -> Self {
        Self {
            inner: Arc::new(inner),
            cache: None,
        }
    }

    /// The wrapped client (used by tests to inspect call counts)
    #[allow(dead_code)]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Fetch the metadata record for a repository.
    ///
    /// Never fails: transient API failures degrade visual richness but must
    /// not break rendering, so the worst outcome is an empty record stamped
    /// with the current time.
    pub async fn fetch_repo_data(&self, repo: &RepoIdentity) -> RepoData {
        let key = repo.canonical_url();

        if let Some(cache) = &self.cache
            && let Some(entry) = cache.get(&key)
            && cache.is_valid(&entry)
        {
            log::debug!("Using cached data for {}", repo);
            return RepoData {
                record: entry.data,
                source: DataSource::Cache,
            };
        }

        log::debug!("Fetching fresh data for {}", repo);
        match self.inner.fetch_metadata(repo).await {
            Ok(record) => {
                if let Some(cache) = &self.cache {
                    cache.put(&key, &record);
                }
                RepoData {
                    record,
                    source: DataSource::Fresh,
                }
            }
            Err(err) => {
                let stale = self.cache.as_ref().and_then(|cache| cache.get(&key));
                match stale {
                    Some(entry) => {
                        log::warn!("Fetch failed for {}, serving stale cache: {}", repo, err);
                        RepoData {
                            record: entry.data,
                            source: DataSource::StaleFallback(err),
                        }
                    }
                    None => {
                        log::warn!("Fetch failed for {} with nothing cached: {}", repo, err);
                        RepoData {
                            record: RepoMetadata::placeholder(),
                            source: DataSource::Placeholder(err),
                        }
                    }
                }
            }
        }
    }

    /// Diagnostic cache view for one repository
    pub fn cache_status(&self, repo: &RepoIdentity) -> CacheStatus {
        match &self.cache {
            Some(cache) => cache.status(&repo.canonical_url()),
            None => CacheStatus {
                cached: false,
                valid: false,
                age: None,
            },
        }
    }

    /// Whole-store cache summary; all zeros when caching is disabled
    pub fn cache_stats(&self) -> CacheStats {
        match &self.cache {
            Some(cache) => cache.stats(),
            None => CacheStats::default(),
        }
    }

    /// Remove every cached entry, returning how many were removed
    pub fn clear_cache(&self) -> Result<usize, CacheError> {
        match &self.cache {
            Some(cache) => cache.clear(),
            None => Ok(0),
        }
    }
}

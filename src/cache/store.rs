//! Time-boxed repository metadata cache
//!
//! The whole cache is a single JSON document mapping canonical repository
//! URLs to time-stamped records. Every operation reads the document in
//! full, mutates it, and rewrites it whole; there are no partial writes.
//! Storage failures never escape this module: a failed read means "not
//! cached", a failed write means the entry simply does not survive.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::VALIDITY_WINDOW;
use super::storage::Storage;
use crate::client::RepoMetadata;
use crate::error::CacheError;

/// One cached record.
///
/// `timestamp` is the wall-clock time of the fetch that produced the
/// record, never the remote API's own last-modified time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Epoch milliseconds at fetch time
    pub timestamp: i64,

    /// The fetched record
    pub data: RepoMetadata,
}

type CacheDocument = HashMap<String, CacheEntry>;

/// Clock abstraction so expiry is testable with a fake
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// The real wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Diagnostic read-only view of one cache key
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStatus {
    pub cached: bool,
    pub valid: bool,
    /// Present only when `cached` is true
    pub age: Option<Duration>,
}

/// Whole-store summary for the `cache status` command
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub valid_entries: usize,
    pub stale_entries: usize,
}

/// Time-boxed key-value cache over a [`Storage`] handle.
///
/// The mutex serializes the read-modify-write cycle of `put` against
/// concurrent fetches; interleaved writes would otherwise lose entries.
pub struct RepoCache<S: Storage> {
    storage: Mutex<S>,
    clock: Box<dyn Clock>,
}

impl<S: Storage> RepoCache<S> {
    /// Cache over the given storage, using the system clock
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }

    /// Cache with an explicit clock (tests)
    pub fn with_clock(storage: S, clock: impl Clock + 'static) -> Self {
        Self {
            storage: Mutex::new(storage),
            clock: Box::new(clock),
        }
    }

    /// Read the whole document, treating every failure as an empty store
    fn read_document(storage: &S) -> CacheDocument {
        let contents = match storage.read() {
            Ok(Some(contents)) => contents,
            Ok(None) => return CacheDocument::new(),
            Err(err) => {
                log::warn!("Cache read failed, treating as empty: {}", err);
                return CacheDocument::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(document) => document,
            Err(err) => {
                log::warn!("Discarding corrupt cache document: {}", err);
                CacheDocument::new()
            }
        }
    }

    /// Look up the entry for a repository URL.
    ///
    /// Storage failures are indistinguishable from a cache miss.
    pub fn get(&self, repo_url: &str) -> Option<CacheEntry> {
        let storage = self.storage.lock().ok()?;
        Self::read_document(&storage).remove(repo_url)
    }

    /// Insert or overwrite the entry for a repository URL, stamped with
    /// the current time, and persist the whole document.
    ///
    /// Persistence failures are swallowed: the entry is best-effort only.
    pub fn put(&self, repo_url: &str, record: &RepoMetadata) {
        let Ok(storage) = self.storage.lock() else {
            return;
        };

        let mut document = Self::read_document(&storage);
        document.insert(
            repo_url.to_string(),
            CacheEntry {
                timestamp: self.clock.now_millis(),
                data: record.clone(),
            },
        );

        let contents = match serde_json::to_string(&document)
            .map_err(|e| CacheError::Serialize(e.to_string()))
        {
            Ok(contents) => contents,
            Err(err) => {
                log::warn!("{}", err);
                return;
            }
        };

        if let Err(err) = storage.write(&contents) {
            log::warn!("Cache write failed, entry will not persist: {}", err);
        }
    }

    /// Whether an entry is still inside the validity window, evaluated
    /// against the clock at call time
    pub fn is_valid(&self, entry: &CacheEntry) -> bool {
        self.clock.now_millis() - entry.timestamp < VALIDITY_WINDOW.as_millis() as i64
    }

    /// Remove the entire store, all keys, unconditionally.
    ///
    /// Returns how many entries were removed.
    pub fn clear(&self) -> Result<usize, CacheError> {
        let storage = self
            .storage
            .lock()
            .map_err(|_| CacheError::Io("storage lock poisoned".to_string()))?;
        let removed = Self::read_document(&storage).len();
        storage.remove()?;
        Ok(removed)
    }

    /// Diagnostic view of one key
    pub fn status(&self, repo_url: &str) -> CacheStatus {
        match self.get(repo_url) {
            None => CacheStatus {
                cached: false,
                valid: false,
                age: None,
            },
            Some(entry) => {
                let age_millis = (self.clock.now_millis() - entry.timestamp).max(0) as u64;
                CacheStatus {
                    cached: true,
                    valid: self.is_valid(&entry),
                    age: Some(Duration::from_millis(age_millis)),
                }
            }
        }
    }

    /// Whole-store summary
    pub fn stats(&self) -> CacheStats {
        let Ok(storage) = self.storage.lock() else {
            return CacheStats::default();
        };
        let document = Self::read_document(&storage);
        let valid_entries = document
            .values()
            .filter(|entry| self.is_valid(entry))
            .count();
        CacheStats {
            entries: document.len(),
            valid_entries,
            stale_entries: document.len() - valid_entries,
        }
    }
}

/// Shared fake clock for expiry tests
#[cfg(test)]
#[derive(Clone)]
pub struct FixedClock(std::sync::Arc<std::sync::atomic::AtomicI64>);

#[cfg(test)]
impl FixedClock {
    pub fn new(now_millis: i64) -> Self {
        Self(std::sync::Arc::new(std::sync::atomic::AtomicI64::new(
            now_millis,
        )))
    }

    pub fn advance(&self, millis: i64) {
        self.0.fetch_add(millis, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0.load(std::sync::atomic::Ordering::SeqCst)
    }
}

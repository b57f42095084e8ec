//! Data models for the GitHub metadata layer

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Language name to byte count, as returned by the languages endpoint.
///
/// Ordered map so that iteration (and therefore percentage tie-breaking)
/// is deterministic.
pub type LanguageBytes = BTreeMap<String, u64>;

static REPO_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/\s]+)/([^/\s#?]+)").unwrap());

/// The (owner, name) pair identifying a GitHub repository.
///
/// Immutable once extracted from a repository URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoIdentity {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub name: String,
}

impl RepoIdentity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Extract the identity from a GitHub repository URL.
    ///
    /// Accepts anything containing `github.com/{owner}/{name}`, ignoring
    /// trailing path segments, fragments, and query strings.
    pub fn from_url(url: &str) -> Option<Self> {
        let caps = REPO_URL_RE.captures(url)?;
        Some(Self::new(&caps[1], &caps[2]))
    }

    /// Parse either an `owner/name` pair or a full repository URL.
    pub fn parse(spec: &str) -> Option<Self> {
        if let Some(identity) = Self::from_url(spec) {
            return Some(identity);
        }
        let (owner, name) = spec.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name))
    }

    /// Canonical display URL, used verbatim as the cache key.
    ///
    /// Deliberately not normalized: case or trailing-slash variants of the
    /// same repository produce distinct cache entries.
    pub fn canonical_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository info from `GET /repos/{owner}/{name}`.
///
/// Only the fields the portfolio consumes; everything else is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoInfo {
    /// Timestamp of the last repository update
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Timestamp of the last push
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}

impl RepoInfo {
    /// The "last updated" timestamp shown on cards: `updated_at`,
    /// falling back to `pushed_at`.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.pushed_at)
    }
}

/// One entry from the contents (directory listing) endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Entry kind: "file", "dir", "symlink", ...
    #[serde(rename = "type")]
    pub entry_type: String,

    /// File or directory name
    pub name: String,

    /// Direct download URL (absent for directories)
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Aggregated metadata for one repository.
///
/// Produced fresh per fetch; a new record replaces the old one, never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoMetadata {
    /// When the repository was last updated; `None` when the API reported
    /// neither an update nor a push timestamp
    pub last_updated: Option<DateTime<Utc>>,

    /// Language name to byte count
    #[serde(default)]
    pub languages: LanguageBytes,

    /// Preview image download URLs, in listing order
    #[serde(default)]
    pub preview_images: Vec<String>,
}

impl RepoMetadata {
    /// The empty record returned when a fetch fails and no cached data
    /// exists. Carries the current time as its timestamp.
    pub fn placeholder() -> Self {
        Self {
            last_updated: Some(Utc::now()),
            languages: LanguageBytes::new(),
            preview_images: Vec::new(),
        }
    }
}

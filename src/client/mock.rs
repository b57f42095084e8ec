//! Mock GitHub API client for testing
//!
//! Provides a mock implementation of [`GitHubApi`] for unit testing without
//! making real API calls.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::DateTime;

use super::GitHubApi;
use super::models::{LanguageBytes, RepoIdentity, RepoInfo};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure canned responses and injected failures via builder methods,
/// then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockGitHubClient::new()
///     .with_updated_at("2024-03-01T12:00:00Z")
///     .with_language("Rust", 9000);
///
/// let record = mock.fetch_metadata(&repo).await?;
/// ```
pub struct MockGitHubClient {
    info: Arc<Mutex<RepoInfo>>,
    languages: Arc<Mutex<LanguageBytes>>,
    previews: Arc<Mutex<Vec<String>>>,
    repo_info_error: Arc<Mutex<Option<ApiError>>>,
    languages_error: Arc<Mutex<Option<ApiError>>>,
    previews_error: Arc<Mutex<Option<ApiError>>>,
    call_counts: Arc<Mutex<CallCounts>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub repo_info: usize,
    pub repo_languages: usize,
    pub preview_images: usize,
}

/// Rebuild an `ApiError` so injected failures persist across calls
fn clone_error(err: &ApiError) -> ApiError {
    match err {
        ApiError::Unauthorized => ApiError::Unauthorized,
        ApiError::Forbidden => ApiError::Forbidden,
        ApiError::NotFound(msg) => ApiError::NotFound(msg.clone()),
        ApiError::RateLimit(d) => ApiError::RateLimit(*d),
        ApiError::ServerError(msg) => ApiError::ServerError(msg.clone()),
        ApiError::Network(msg) => ApiError::Network(msg.clone()),
        ApiError::InvalidResponse(msg) => ApiError::InvalidResponse(msg.clone()),
    }
}

impl Default for MockGitHubClient {
    fn default() -> Self {
        Self {
            info: Arc::new(Mutex::new(RepoInfo {
                updated_at: None,
                pushed_at: None,
            })),
            languages: Arc::new(Mutex::new(LanguageBytes::new())),
            previews: Arc::new(Mutex::new(Vec::new())),
            repo_info_error: Arc::new(Mutex::new(None)),
            languages_error: Arc::new(Mutex::new(None)),
            previews_error: Arc::new(Mutex::new(None)),
            call_counts: Arc::new(Mutex::new(CallCounts::default())),
        }
    }
}

impl MockGitHubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_updated_at(self, rfc3339: &str) -> Self {
        self.info.lock().unwrap().updated_at =
            Some(DateTime::parse_from_rfc3339(rfc3339).unwrap().to_utc());
        self
    }

    pub fn with_pushed_at(self, rfc3339: &str) -> Self {
        self.info.lock().unwrap().pushed_at =
            Some(DateTime::parse_from_rfc3339(rfc3339).unwrap().to_utc());
        self
    }

    pub fn with_language(self, language: &str, bytes: u64) -> Self {
        self.languages
            .lock()
            .unwrap()
            .insert(language.to_string(), bytes);
        self
    }

    pub fn with_preview_image(self, url: &str) -> Self {
        self.previews.lock().unwrap().push(url.to_string());
        self
    }

    /// Make every `repo_info` call fail with the given error
    pub fn failing_repo_info(self, err: ApiError) -> Self {
        *self.repo_info_error.lock().unwrap() = Some(err);
        self
    }

    /// Make every `repo_languages` call fail with the given error
    pub fn failing_languages(self, err: ApiError) -> Self {
        *self.languages_error.lock().unwrap() = Some(err);
        self
    }

    /// Make every `preview_images` call fail with the given error
    pub fn failing_previews(self, err: ApiError) -> Self {
        *self.previews_error.lock().unwrap() = Some(err);
        self
    }

    /// Get call counts for verification
    pub fn call_counts(&self) -> CallCounts {
        self.call_counts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitHubApi for MockGitHubClient {
    async fn repo_info(&self, _repo: &RepoIdentity) -> Result<RepoInfo> {
        self.call_counts.lock().unwrap().repo_info += 1;
        if let Some(ref err) = *self.repo_info_error.lock().unwrap() {
            return Err(clone_error(err).into());
        }
        let info = self.info.lock().unwrap().clone();
        Ok(info)
    }

    async fn repo_languages(&self, _repo: &RepoIdentity) -> Result<LanguageBytes> {
        self.call_counts.lock().unwrap().repo_languages += 1;
        if let Some(ref err) = *self.languages_error.lock().unwrap() {
            return Err(clone_error(err).into());
        }
        let languages = self.languages.lock().unwrap().clone();
        Ok(languages)
    }

    async fn preview_images(&self, _repo: &RepoIdentity) -> Result<Vec<String>> {
        self.call_counts.lock().unwrap().preview_images += 1;
        if let Some(ref err) = *self.previews_error.lock().unwrap() {
            return Err(clone_error(err).into());
        }
        let previews = self.previews.lock().unwrap().clone();
        Ok(previews)
    }
}

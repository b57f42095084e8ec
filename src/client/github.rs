//! GitHub API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use super::GitHubApi;
use super::models::{ContentEntry, LanguageBytes, RepoIdentity, RepoInfo};
use crate::error::{ApiError, Result};

/// GitHub REST API base URL
const API_BASE_URL: &str = "https://api.github.com";

/// Fixed repository subdirectory scanned for card preview images
const PREVIEW_FOLDER: &str = "repo_Previews";

/// File extensions accepted as preview images (matched case-insensitively)
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// Client-side request budget; GitHub's secondary limits dislike bursts
const RATE_LIMIT_PER_SECOND: u32 = 8;

/// GitHub API client
pub struct GitHubClient {
    http: HttpClient,
    base_url: String,
    token: Option<String>,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl GitHubClient {
    /// Create a client, optionally against a custom API host (tests).
    ///
    /// Without a token, requests are unauthenticated and subject to the
    /// stricter public rate limits.
    pub fn with_host(token: Option<String>, host: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("gitfolio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap());
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: host.unwrap_or_else(|| API_BASE_URL.to_string()),
            token,
            rate_limiter,
        })
    }

    /// Issue a GET request and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json");

        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => {
                // GitHub reports primary rate limiting as 403 with a
                // zeroed remaining-requests header
                let remaining = response
                    .headers()
                    .get("x-ratelimit-remaining")
                    .and_then(|v| v.to_str().ok());
                if remaining == Some("0") {
                    let reset = response
                        .headers()
                        .get("x-ratelimit-reset")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<i64>().ok())
                        .map(|epoch| (epoch - chrono::Utc::now().timestamp()).max(0) as u64)
                        .unwrap_or(60);
                    return Err(ApiError::RateLimit(Duration::from_secs(reset)).into());
                }
                Err(ApiError::Forbidden.into())
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string()).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

/// Whether a file name carries one of the accepted image extensions
fn is_image_name(name: &str) -> bool {
    let Some((_, extension)) = name.rsplit_once('.') else {
        return false;
    };
    let extension = extension.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&extension.as_str())
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn repo_info(&self, repo: &RepoIdentity) -> Result<RepoInfo> {
        let path = format!("/repos/{}/{}", repo.owner, repo.name);
        self.get_json(&path).await
    }

    async fn repo_languages(&self, repo: &RepoIdentity) -> Result<LanguageBytes> {
        let path = format!("/repos/{}/{}/languages", repo.owner, repo.name);
        self.get_json(&path).await
    }

    async fn preview_images(&self, repo: &RepoIdentity) -> Result<Vec<String>> {
        let path = format!(
            "/repos/{}/{}/contents/{}",
            repo.owner, repo.name, PREVIEW_FOLDER
        );
        let body: serde_json::Value = self.get_json(&path).await?;

        // The contents endpoint returns an object when the path names a
        // single file; only a directory listing yields images.
        let Some(entries) = body.as_array() else {
            return Ok(Vec::new());
        };

        let images = entries
            .iter()
            .filter_map(|entry| serde_json::from_value::<ContentEntry>(entry.clone()).ok())
            .filter(|entry| entry.entry_type == "file" && is_image_name(&entry.name))
            .filter_map(|entry| entry.download_url)
            .collect();

        Ok(images)
    }
}

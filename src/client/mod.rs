//! GitHub API client
//!
//! Three read-only endpoints per repository (info, languages, preview image
//! listing) behind the [`GitHubApi`] trait, plus the composition that folds
//! them into one [`RepoMetadata`] record.

use async_trait::async_trait;

use crate::error::Result;

pub mod github;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use github::GitHubClient;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockGitHubClient;
pub use models::{ContentEntry, LanguageBytes, RepoIdentity, RepoInfo, RepoMetadata};

/// GitHub API client trait
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Fetch repository info (timestamps). Required call: any failure here
    /// fails the whole metadata fetch.
    async fn repo_info(&self, repo: &RepoIdentity) -> Result<RepoInfo>;

    /// Fetch per-language byte counts.
    async fn repo_languages(&self, repo: &RepoIdentity) -> Result<LanguageBytes>;

    /// List preview image download URLs from the repository's preview
    /// folder, in listing order.
    async fn preview_images(&self, repo: &RepoIdentity) -> Result<Vec<String>>;

    /// Compose the three endpoint calls into one metadata record.
    ///
    /// Only `repo_info` is fatal. Missing language stats or an absent
    /// preview folder degrade to empty defaults so the project still
    /// renders.
    async fn fetch_metadata(&self, repo: &RepoIdentity) -> Result<RepoMetadata> {
        let info = self.repo_info(repo).await?;

        let languages = match self.repo_languages(repo).await {
            Ok(languages) => languages,
            Err(err) => {
                log::warn!("Language stats unavailable for {}: {}", repo, err);
                LanguageBytes::new()
            }
        };

        let preview_images = match self.preview_images(repo).await {
            Ok(images) => images,
            Err(err) => {
                log::warn!("Preview images unavailable for {}: {}", repo, err);
                Vec::new()
            }
        };

        Ok(RepoMetadata {
            last_updated: info.last_updated(),
            languages,
            preview_images,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[tokio::test]
    async fn test_fetch_metadata_composes_all_three_calls() {
        let mock = MockGitHubClient::new()
            .with_updated_at("2024-03-01T12:00:00Z")
            .with_language("Rust", 9000)
            .with_preview_image("https://example.com/shot.png");

        let repo = RepoIdentity::new("octocat", "hello-world");
        let record = mock.fetch_metadata(&repo).await.unwrap();

        assert_eq!(
            record.last_updated,
            Some("2024-03-01T12:00:00Z".parse().unwrap())
        );
        assert_eq!(record.languages.get("Rust"), Some(&9000));
        assert_eq!(record.preview_images, vec!["https://example.com/shot.png"]);
    }

    #[tokio::test]
    async fn test_fetch_metadata_fails_when_repo_info_fails() {
        let mock =
            MockGitHubClient::new().failing_repo_info(ApiError::NotFound("gone".to_string()));

        let repo = RepoIdentity::new("octocat", "gone");
        assert!(mock.fetch_metadata(&repo).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_metadata_absorbs_language_failure() {
        let mock = MockGitHubClient::new()
            .with_updated_at("2024-03-01T12:00:00Z")
            .with_preview_image("https://example.com/shot.png")
            .failing_languages(ApiError::ServerError("boom".to_string()));

        let repo = RepoIdentity::new("octocat", "hello-world");
        let record = mock.fetch_metadata(&repo).await.unwrap();

        assert!(record.languages.is_empty());
        assert_eq!(record.preview_images.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_metadata_absorbs_preview_failure() {
        let mock = MockGitHubClient::new()
            .with_updated_at("2024-03-01T12:00:00Z")
            .with_language("Rust", 9000)
            .failing_previews(ApiError::NotFound("no folder".to_string()));

        let repo = RepoIdentity::new("octocat", "hello-world");
        let record = mock.fetch_metadata(&repo).await.unwrap();

        assert!(record.preview_images.is_empty());
        assert_eq!(record.languages.len(), 1);
    }
}

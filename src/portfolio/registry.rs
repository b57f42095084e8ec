//! Project registry and refresh orchestration
//!
//! Loads project description files, resolves each one's repository
//! identity, and drives the cache-fronted fetch path. All repository
//! fetches for a load or refresh are issued concurrently and joined when
//! every one has settled; one slow or failed repository never blocks the
//! rest.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future;
use tokio::task::JoinHandle;

use super::markdown::{self, ProjectMetadata};
use crate::cache::{CachedGitHubClient, RepoData, Storage};
use crate::client::{GitHubApi, RepoIdentity};
use crate::error::{Error, Result};

/// One loaded project
#[derive(Debug)]
pub struct Project {
    pub metadata: ProjectMetadata,
    pub path: PathBuf,
    /// Present when `repo_link` named a GitHub repository
    pub repo: Option<RepoIdentity>,
    /// Fetched repository data; `None` only when there is no repository
    pub data: Option<RepoData>,
}

impl Project {
    fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.data.as_ref().and_then(|data| data.record.last_updated)
    }
}

/// Coordinator for loading and refreshing portfolio projects
pub struct ProjectRegistry<C: GitHubApi, S: Storage> {
    client: Arc<CachedGitHubClient<C, S>>,
    projects: Vec<Project>,
}

impl<C: GitHubApi + 'static, S: Storage + 'static> ProjectRegistry<C, S> {
    pub fn new(client: Arc<CachedGitHubClient<C, S>>) -> Self {
        Self {
            client,
            projects: Vec::new(),
        }
    }

    /// Load projects from markdown files, fetching repository data for
    /// every project concurrently.
    ///
    /// An unreadable project file fails the load; repository fetches
    /// cannot fail (they degrade inside the cache-fronted client).
    pub async fn load_projects(&mut self, paths: &[PathBuf]) -> Result<&[Project]> {
        let loads = paths.iter().map(|path| {
            let client = Arc::clone(&self.client);
            let path = path.clone();
            async move {
                let contents = tokio::fs::read_to_string(&path).await?;
                let metadata = markdown::parse_project(&contents);
                let repo = RepoIdentity::from_url(&metadata.repo_link);

                let data = match &repo {
                    Some(identity) => Some(client.fetch_repo_data(identity).await),
                    None => None,
                };

                Ok::<Project, Error>(Project {
                    metadata,
                    path,
                    repo,
                    data,
                })
            }
        });

        let loaded = future::try_join_all(loads).await?;
        self.projects = loaded;
        Ok(&self.projects)
    }

    /// Re-fetch repository data for every loaded project, reconciling the
    /// results into the existing entries
    pub async fn refresh_all(&mut self) {
        let refreshes: Vec<_> = self
            .projects
            .iter()
            .map(|project| {
                let client = Arc::clone(&self.client);
                let repo = project.repo.clone();
                async move {
                    match repo {
                        Some(identity) => Some(client.fetch_repo_data(&identity).await),
                        None => None,
                    }
                }
            })
            .collect();

        let results = future::join_all(refreshes).await;
        for (project, data) in self.projects.iter_mut().zip(results) {
            if data.is_some() {
                project.data = data;
            }
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Most recently updated first; projects without repository data sink
    /// to the bottom
    pub fn sort_by_last_updated(&mut self) {
        self.projects.sort_by_key(|project| {
            std::cmp::Reverse(project.last_updated().unwrap_or(DateTime::<Utc>::MIN_UTC))
        });
    }

    /// Alphabetical by title
    pub fn sort_by_title(&mut self) {
        self.projects
            .sort_by(|a, b| a.metadata.title.cmp(&b.metadata.title));
    }
}

/// Lifecycle handle for the auto-refresh timer.
///
/// Stopping (or dropping) the handle aborts the timer task, so a torn
/// down view cannot leak its timer.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Refresh every project on a fixed period, invoking `on_refresh` with
/// the reconciled projects after each pass
pub fn spawn_auto_refresh<C, S, F>(
    registry: Arc<tokio::sync::Mutex<ProjectRegistry<C, S>>>,
    period: Duration,
    on_refresh: F,
) -> RefreshHandle
where
    C: GitHubApi + 'static,
    S: Storage + 'static,
    F: Fn(&[Project]) + Send + Sync + 'static,
{
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; the load that preceded
        // this task already fetched fresh data
        interval.tick().await;

        loop {
            interval.tick().await;
            log::info!("Auto-refreshing repository data");
            let mut registry = registry.lock().await;
            registry.refresh_all().await;
            on_refresh(registry.projects());
        }
    });

    RefreshHandle { task }
}

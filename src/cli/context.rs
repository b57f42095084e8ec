//! Command execution context
//!
//! Unifies config loading, client construction, and option resolution so
//! individual command handlers stay small.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::ValueEnum;

use crate::cache::{CachedGitHubClient, FileStorage, RepoCache};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::GitHubClient;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::portfolio::ProjectRegistry;

/// Context for command execution containing config, client, and resolved
/// runtime options
pub struct CommandContext {
    /// Loaded configuration (defaults when no file exists yet)
    pub config: Config,

    /// Cache-fronted API client (Arc-wrapped for the concurrent fetches)
    pub client: Arc<CachedGitHubClient<GitHubClient, FileStorage>>,

    /// Resolved output format
    pub format: OutputFormat,

    /// Resolved projects directory, when configured anywhere
    projects_dir: Option<PathBuf>,
}

impl CommandContext {
    /// Build a context from global options.
    ///
    /// The token comes from the CLI/env layer first, then the config
    /// file. When the cache cannot be opened at all (e.g. no cache
    /// directory), the client runs uncached rather than failing.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_or_default(opts.config_ref())?;

        let token = opts.token.clone().or_else(|| config.github_token.clone());
        let raw_client = GitHubClient::with_host(token, opts.api_host.clone())?;

        let client = if opts.no_cache {
            CachedGitHubClient::without_cache(raw_client)
        } else {
            match FileStorage::open() {
                Ok(storage) => CachedGitHubClient::new(raw_client, RepoCache::new(storage)),
                Err(err) => {
                    log::warn!("Cache unavailable, running uncached: {}", err);
                    CachedGitHubClient::without_cache(raw_client)
                }
            }
        };

        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(|name| OutputFormat::from_str(name, true).ok())
            })
            .unwrap_or_default();

        let projects_dir = opts
            .projects_dir
            .clone()
            .or_else(|| config.projects_dir.clone());

        Ok(Self {
            config,
            client: Arc::new(client),
            format,
            projects_dir,
        })
    }

    /// The projects directory, erroring when configured nowhere
    pub fn require_projects_dir(&self) -> Result<&Path> {
        self.projects_dir
            .as_deref()
            .ok_or_else(|| ConfigError::MissingProjectsDir.into())
    }

    /// Markdown project files in the projects directory, sorted by file
    /// name for a stable default order
    pub fn discover_projects(&self) -> Result<Vec<PathBuf>> {
        let dir = self.require_projects_dir()?;

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
            })
            .collect();
        paths.sort();

        Ok(paths)
    }

    /// A fresh registry over this context's client
    pub fn registry(&self) -> ProjectRegistry<GitHubClient, FileStorage> {
        ProjectRegistry::new(Arc::clone(&self.client))
    }
}

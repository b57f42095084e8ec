//! Cache management commands

use std::time::Duration;

use crate::cache::FileStorage;
use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::RepoIdentity;
use crate::error::{Error, Result};

fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

/// Show cache statistics, or the entry for one repository
pub fn status(opts: &GlobalOptions, repo_spec: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match repo_spec {
        Some(spec) => {
            let repo = RepoIdentity::parse(spec)
                .ok_or_else(|| Error::Other(format!("Not a GitHub repository: {}", spec)))?;
            let status = ctx.client.cache_status(&repo);

            if let OutputFormat::Json = ctx.format {
                let json = serde_json::json!({
                    "repository": repo.to_string(),
                    "cached": status.cached,
                    "valid": status.valid,
                    "age_seconds": status.age.map(|age| age.as_secs()),
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else if status.cached {
                let validity = if status.valid { "valid" } else { "stale" };
                let age = status.age.map(format_age).unwrap_or_default();
                println!("{}: cached ({}, age {})", repo, validity, age);
            } else {
                println!("{}: not cached", repo);
            }
        }
        None => {
            let stats = ctx.client.cache_stats();
            let path = FileStorage::open()?.path().display().to_string();

            if let OutputFormat::Json = ctx.format {
                let json = serde_json::json!({
                    "entries": stats.entries,
                    "valid_entries": stats.valid_entries,
                    "stale_entries": stats.stale_entries,
                    "path": path,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                println!("Cache Status");
                println!("────────────────────────────────────────");
                println!("Location:      {}", path);
                println!("Entries:       {}", stats.entries);
                println!("Valid:         {}", stats.valid_entries);
                println!("Stale:         {}", stats.stale_entries);
            }
        }
    }

    Ok(())
}

/// Clear all cache entries
pub fn clear(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let removed = ctx.client.clear_cache()?;

    if let OutputFormat::Json = ctx.format {
        let json = serde_json::json!({
            "entries_removed": removed,
            "success": true,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else if removed > 0 {
        println!("Cleared {} cache entries", removed);
    } else {
        println!("Cache was already empty");
    }

    Ok(())
}

/// Print the cache file path
pub fn path() -> Result<()> {
    let storage = FileStorage::open()?;
    println!("{}", storage.path().display());
    Ok(())
}

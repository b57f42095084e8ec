//! Storage backends for the repository cache
//!
//! The cache is one JSON document under a single well-known location; a
//! backend only needs to read, replace, or remove that document.

use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::{Arc, Mutex};

use crate::error::CacheError;

type Result<T> = std::result::Result<T, CacheError>;

/// File name of the cache document inside the cache directory
const STORE_FILE: &str = "repo_cache.json";

/// A handle to the single cache document
pub trait Storage: Send + Sync {
    /// Read the whole document, `None` when it does not exist yet
    fn read(&self) -> Result<Option<String>>;

    /// Replace the whole document
    fn write(&self, contents: &str) -> Result<()>;

    /// Remove the document entirely
    fn remove(&self) -> Result<()>;
}

/// File-backed storage at the default XDG cache location
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Open storage at the default location
    /// (`~/.cache/gitfolio/repo_cache.json` on Linux)
    pub fn open() -> Result<Self> {
        Ok(Self::at(Self::cache_dir()?.join(STORE_FILE)))
    }

    /// The cache directory, honoring the `GITFOLIO_CACHE_DIR` override
    pub fn cache_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("GITFOLIO_CACHE_DIR") {
            return Ok(PathBuf::from(dir));
        }
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoCacheDir)?;
        Ok(cache_base.join("gitfolio"))
    }

    /// Storage at a specific file path (for testing)
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(CacheError::Io(format!(
                "Failed to read {}: {}",
                self.path.display(),
                err
            ))),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;
        }
        std::fs::write(&self.path, contents).map_err(|e| {
            CacheError::Io(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }

    fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CacheError::Io(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                err
            ))),
        }
    }
}

/// In-memory storage, used by tests.
///
/// Clones share the same underlying document.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStorage {
    contents: Arc<Mutex<Option<String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.contents.lock().unwrap().clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        *self.contents.lock().unwrap() = Some(contents.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self.contents.lock().unwrap() = None;
        Ok(())
    }
}

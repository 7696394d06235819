//! Session token storage.
//!
//! DESIGN
//! ======
//! The token lives under a single fixed key, like a browser cookie. The file
//! store re-reads the file on every lookup so a login or logout performed by
//! another process is visible to the next request. A missing or unreadable
//! file reads as "no token"; only writes report errors.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Key the session token is stored under.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session file {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("session file encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistent key-value storage for the session token.
pub trait TokenStore: Send + Sync {
    /// Current token, if one is stored and non-empty.
    fn token(&self) -> Option<String>;

    fn set_token(&self, token: &str) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_owned())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        let guard = self.token.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.clone().filter(|token| !token.is_empty())
    }

    fn set_token(&self, token: &str) -> Result<(), StoreError> {
        let mut guard = self.token.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.token.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// JSON file holding `{"token": "..."}`. Other keys in the file are kept.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed session file");
                BTreeMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let rendered = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, rendered).map_err(io_err)
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        self.read_entries()
            .remove(TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    fn set_token(&self, token: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries();
        entries.insert(TOKEN_KEY.to_owned(), token.to_owned());
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.read_entries();
        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(source) => Err(StoreError::Io { path: self.path.clone(), source }),
            };
        }
        self.write_entries(&entries)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

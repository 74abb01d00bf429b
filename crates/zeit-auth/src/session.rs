//! Session token storage.
//!
//! The stored state is a single opaque string under a well-known file name,
//! mirroring the one storage key the web client used. No expiry is tracked
//! locally; the server signals staleness with 401/403.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AuthError, Result};

/// File name of the stored session token within the app data directory.
pub const TOKEN_FILE: &str = "session-token";

/// Read/save/clear access to the stored session token.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// The stored token, if one exists.
    async fn token(&self) -> Option<String>;

    /// Persist a new token, replacing any previous one.
    async fn save(&self, token: &str) -> Result<()>;

    /// Remove the stored token.
    async fn clear(&self) -> Result<()>;

    /// Whether a token is currently stored.
    fn has_token(&self) -> bool;
}

/// Mask a token for display, keeping only the outer characters.
pub fn mask_token(token: &str) -> String {
    if token.len() > 8 {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    } else {
        "****".to_string()
    }
}

// ============================================================================
// FileSessionStore
// ============================================================================

/// File-backed session store for production use.
#[derive(Debug)]
pub struct FileSessionStore {
    token_path: PathBuf,
    cached: RwLock<Option<String>>,
}

impl FileSessionStore {
    /// Create a store keeping its token under `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self::with_path(data_dir.join(TOKEN_FILE))
    }

    /// Create a store with an explicit token file path.
    pub fn with_path(token_path: PathBuf) -> Self {
        Self {
            token_path,
            cached: RwLock::new(None),
        }
    }

    /// The token file path.
    pub fn token_path(&self) -> &Path {
        &self.token_path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    fn has_token(&self) -> bool {
        self.token_path.exists()
    }

    async fn token(&self) -> Option<String> {
        {
            let cache = self.cached.read().await;
            if cache.is_some() {
                return cache.clone();
            }
        }

        if !self.token_path.exists() {
            return None;
        }

        match std::fs::read_to_string(&self.token_path) {
            Ok(raw) => {
                let token = raw.trim().to_string();
                if token.is_empty() {
                    return None;
                }
                let mut cache = self.cached.write().await;
                *cache = Some(token.clone());
                Some(token)
            }
            Err(e) => {
                tracing::warn!("failed to read session token: {e}");
                None
            }
        }
    }

    async fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.token_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AuthError::Storage(format!("failed to create token directory: {e}"))
            })?;
        }

        std::fs::write(&self.token_path, token)
            .map_err(|e| AuthError::Storage(format!("failed to write token file: {e}")))?;

        let mut cache = self.cached.write().await;
        *cache = Some(token.to_string());

        tracing::info!("session token saved to {}", self.token_path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if self.token_path.exists() {
            std::fs::remove_file(&self.token_path)
                .map_err(|e| AuthError::Storage(format!("failed to delete token file: {e}")))?;
        }
        let mut cache = self.cached.write().await;
        *cache = None;
        Ok(())
    }
}

// ============================================================================
// InMemorySessionStore (for testing)
// ============================================================================

/// In-memory session store for testing.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    token: RwLock<Option<String>>,
    clear_count: AtomicU32,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
            clear_count: AtomicU32::new(0),
        }
    }

    /// How often `clear` has been called.
    pub fn clear_count(&self) -> u32 {
        self.clear_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn has_token(&self) -> bool {
        self.token
            .try_read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn save(&self, token: &str) -> Result<()> {
        let mut guard = self.token.write().await;
        *guard = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.clear_count.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.token.write().await;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_store_starts_empty() {
        let temp = tempdir().unwrap();
        let store = FileSessionStore::new(temp.path());
        assert!(!store.has_token());
        assert_eq!(store.token().await, None);
    }

    #[tokio::test]
    async fn test_file_save_and_read_token() {
        let temp = tempdir().unwrap();
        let store = FileSessionStore::new(temp.path());

        store.save("abc123").await.unwrap();
        assert!(store.has_token());
        assert_eq!(store.token().await.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_file_clear_removes_token() {
        let temp = tempdir().unwrap();
        let store = FileSessionStore::new(temp.path());

        store.save("abc123").await.unwrap();
        store.clear().await.unwrap();
        assert!(!store.has_token());
        assert_eq!(store.token().await, None);
    }

    #[tokio::test]
    async fn test_file_save_overwrites_previous_token() {
        let temp = tempdir().unwrap();
        let store = FileSessionStore::new(temp.path());

        store.save("first").await.unwrap();
        store.save("second").await.unwrap();
        assert_eq!(store.token().await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_file_whitespace_only_token_is_absent() {
        let temp = tempdir().unwrap();
        let store = FileSessionStore::new(temp.path());
        std::fs::write(store.token_path(), "  \n").unwrap();
        assert_eq!(store.token().await, None);
    }

    #[tokio::test]
    async fn test_inmemory_store_counts_clears() {
        let store = InMemorySessionStore::with_token("tok");
        assert!(store.has_token());

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.clear_count(), 2);
        assert_eq!(store.token().await, None);
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefghijkl"), "abcd...ijkl");
        assert_eq!(mask_token("short"), "****");
    }
}

//! Token storage backends
//!
//! The access token survives outside the process the way the browser
//! client kept it in a persistent key-value slot. `MemoryTokenStore`
//! covers embedded use; `FileTokenStore` persists across restarts.

use crate::error::CoreResult;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Persistent slot holding the current access token
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    async fn load(&self) -> CoreResult<Option<String>>;

    /// Replace the stored token
    async fn store(&self, token: &str) -> CoreResult<()>;

    /// Remove the stored token
    async fn clear(&self) -> CoreResult<()>;
}

/// In-memory token slot
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> CoreResult<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn store(&self, token: &str) -> CoreResult<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

/// File-backed token slot
///
/// Stores the raw token string in a single file. A missing file reads
/// as an empty slot.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> CoreResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn store(&self, token: &str) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, token).await?;
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

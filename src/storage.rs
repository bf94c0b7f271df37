//! Durable key-value storage for app state.
//!
//! Blobs are opaque strings addressed by string keys; callers own the
//! serialization format. The file-backed store keeps one file per key
//! under `~/.reelcine`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use futures::future::BoxFuture;
use thiserror::Error;

/// Errors from the persistent key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("persisted blob is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("HOME is not set; nowhere to persist state")]
    NoHome,
}

/// Asynchronous durable key-value storage.
///
/// Returned futures are `'static` so they can run as fire-and-forget
/// background tasks after the caller has moved on.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the blob stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> BoxFuture<'static, Result<Option<String>, StorageError>>;

    /// Durably store `blob` under `key`, replacing any previous value.
    fn set(&self, key: &str, blob: String) -> BoxFuture<'static, Result<(), StorageError>>;
}

/// File-per-key store rooted in the user's home directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: Option<PathBuf>,
}

impl FileStore {
    /// Store rooted at `~/.reelcine`. Missing `HOME` is deferred to the
    /// first operation so construction never fails.
    pub fn new() -> Self {
        let base_dir = std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".reelcine"));
        FileStore { base_dir }
    }

    /// Store rooted at an explicit directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        FileStore {
            base_dir: Some(base_dir),
        }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        // Keys are fixed app-chosen names; strip path separators anyway so
        // a key can never escape the base directory.
        let file_name: String = key
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.base_dir
            .as_ref()
            .map(|dir| dir.join(format!("{file_name}.json")))
            .ok_or(StorageError::NoHome)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        FileStore::new()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> BoxFuture<'static, Result<Option<String>, StorageError>> {
        let path = self.key_path(key);
        Box::pin(async move {
            let path = path?;
            match tokio::fs::read_to_string(&path).await {
                Ok(blob) => Ok(Some(blob)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(StorageError::Io(e)),
            }
        })
    }

    fn set(&self, key: &str, blob: String) -> BoxFuture<'static, Result<(), StorageError>> {
        let path = self.key_path(key);
        Box::pin(async move {
            let path = path?;
            if let Some(dir) = path.parent() {
                tokio::fs::create_dir_all(dir).await?;
            }
            tokio::fs::write(&path, blob).await?;
            Ok(())
        })
    }
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> BoxFuture<'static, Result<Option<String>, StorageError>> {
        let value = self
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned();
        Box::pin(async move { Ok(value) })
    }

    fn set(&self, key: &str, blob: String) -> BoxFuture<'static, Result<(), StorageError>> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), blob);
        Box::pin(async move { Ok(()) })
    }
}

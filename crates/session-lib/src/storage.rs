// ============================
// crates/session-lib/src/storage.rs
// ============================
//! Key-value storage abstraction with flat-file and in-memory implementations.
//!
//! The auth session cache persists exactly two string slots through this
//! seam: the raw session token and the JSON-encoded user record.
use crate::error::AppError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tokio::fs as tokio_fs;

/// Slot holding the raw session token
pub const TOKEN_KEY: &str = "token";
/// Slot holding the JSON-encoded user record
pub const USER_DATA_KEY: &str = "userData";

/// Trait for local persistent key-value backends
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a slot; absent slots read as `None`
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Write a slot, replacing any previous value
    async fn put(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Remove a slot; removing an absent slot is not an error
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Flat-file implementation: one file per key under a root directory
#[derive(Clone)]
pub struct FlatFileStore {
    root: PathBuf,
}

impl FlatFileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl KeyValueStore for FlatFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.slot_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let value = tokio_fs::read_to_string(&path).await?;
        Ok(Some(value))
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), AppError> {
        let path = self.slot_path(key);
        tokio_fs::write(&path, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let path = self.slot_path(key);

        if path.exists() {
            tokio_fs::remove_file(&path).await?;
        }

        Ok(())
    }
}

/// In-process implementation for tests and embedders without a filesystem.
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: std::sync::Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.remove(key);
        Ok(())
    }
}

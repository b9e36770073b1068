use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::domain::{Favorite, HistoryEntry};

/// Errors that can occur when reading or writing the store file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    favorites: Vec<Favorite>,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

/// Single-file JSON store for favorites and search history
///
/// Best-effort persistence: a missing or corrupt file reads as empty, and
/// writers are serialized through one lock so concurrent requests cannot
/// interleave read-modify-write cycles.
pub struct JsonStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> StoreData {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Store file corrupt ({}), starting empty", e);
                StoreData::default()
            }),
            Err(_) => StoreData::default(),
        }
    }

    async fn write(&self, data: &StoreData) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }

    pub async fn favorites(&self) -> Vec<Favorite> {
        self.read().await.favorites
    }

    /// Save a favorite, deduplicating by name. Returns whether the entry
    /// was added.
    pub async fn add_favorite(&self, favorite: Favorite) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.read().await;

        if data.favorites.iter().any(|f| f.name == favorite.name) {
            return Ok(false);
        }

        data.favorites.push(favorite);
        self.write(&data).await?;
        Ok(true)
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.read().await.history
    }

    pub async fn record_search(&self, entry: HistoryEntry) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.read().await;
        data.history.push(entry);
        self.write(&data).await
    }
}

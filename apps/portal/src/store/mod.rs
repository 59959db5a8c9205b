// Local key-value storage.
// Implements: the KeyValueStore seam (memory + file backends) and whole-collection load/save.
// Repositories never touch a backend directly; everything goes through LocalStore.

pub mod file;
pub mod memory;

use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Storage I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize collection '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// String key-value storage with the shape of a browser's local storage area.
///
/// Backends are injected into [`LocalStore`] so repositories can run against
/// [`MemoryStore`] in tests and [`FileStore`] in production.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    #[allow(dead_code)]
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// The two named collections persisted by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Jobs,
    Candidates,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Jobs => "jobs",
            Collection::Candidates => "candidates",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Whole-collection accessor over an injected backend.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueStore>,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    /// Loads every record of a collection, in stored order.
    ///
    /// An absent key or content that does not parse as a list of `T` yields an
    /// empty list. Backend failures are returned, so a read-modify-write never
    /// overwrites records it could not read.
    pub fn try_load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        let Some(raw) = self.backend.get(collection.key())? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("Collection '{collection}' is malformed, treating as empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Lenient [`try_load`](Self::try_load) for read-only listings: a backend
    /// failure is logged and reads as empty.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        self.try_load(collection).unwrap_or_else(|e| {
            warn!("Reading collection '{collection}' failed, treating as empty: {e}");
            Vec::new()
        })
    }

    /// Overwrites a collection with `records`. No merge with prior content.
    pub fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records).map_err(|source| StoreError::Serialize {
            key: collection.key().to_string(),
            source,
        })?;
        self.backend.set(collection.key(), &raw)?;
        debug!("Saved {} record(s) to '{collection}'", records.len());
        Ok(())
    }
}

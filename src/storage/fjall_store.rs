//! On-disk storage backed by fjall.

use std::path::Path;

use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};

use crate::logging::{debug, error, info, trace};

use super::{Storage, StorageError};

/// Keyspace holding store bookkeeping.
const META_KEYSPACE: &str = "_meta";
const META_CONFIG_KEY: &str = "config";

/// Keyspace holding the survey documents.
const DATA_KEYSPACE: &str = "survey";

/// Current store version.
/// Increment this when changing the on-disk layout; opening a store with a
/// different version fails.
const STORE_VERSION: u32 = 1;

/// A fjall database holding the survey's keys.
///
/// Every write is persisted with [`PersistMode::SyncAll`] before returning.
///
/// ```ignore
/// use gift_survey::storage::{FjallStore, Storage};
///
/// let mut store = FjallStore::init(".gift-survey")?;
/// store.set("theme", "dark")?;
/// assert_eq!(store.get("theme")?.as_deref(), Some("dark"));
/// ```
pub struct FjallStore {
    db: fjall::Database,
    data: Keyspace,
}

impl FjallStore {
    /// Open an existing store. Fails if `path` was never initialized or
    /// carries a different store version.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening survey store");

        if !path.exists() {
            error!(path = %path.display(), "store path does not exist");
            return Err(StorageError::NotInitialized(path.display().to_string()));
        }

        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;

        let Some(config) = meta.get(META_CONFIG_KEY)? else {
            error!(path = %path.display(), "store not initialized - no config found");
            return Err(StorageError::NotInitialized(path.display().to_string()));
        };
        let version = u32::from_le_bytes(
            config
                .as_ref()
                .try_into()
                .map_err(|_| StorageError::InvalidFormat("Invalid config format".to_string()))?,
        );
        if version != STORE_VERSION {
            error!(
                stored_version = version,
                expected_version = STORE_VERSION,
                "store version mismatch"
            );
            return Err(StorageError::InvalidFormat(format!(
                "Store version mismatch: expected {}, got {}",
                STORE_VERSION, version
            )));
        }
        trace!(version = version, "store version verified");

        let data = db.keyspace(DATA_KEYSPACE, KeyspaceCreateOptions::default)?;
        info!(path = %path.display(), "survey store opened");
        Ok(Self { db, data })
    }

    /// Create (or re-stamp) a store at `path`. Existing survey data is kept.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "initializing survey store");

        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;
        meta.insert(META_CONFIG_KEY, STORE_VERSION.to_le_bytes())?;
        let data = db.keyspace(DATA_KEYSPACE, KeyspaceCreateOptions::default)?;
        db.persist(PersistMode::SyncAll)?;

        info!(path = %path.display(), version = STORE_VERSION, "survey store initialized");
        Ok(Self { db, data })
    }

    /// Every key currently stored, in key order.
    pub fn keys(&self) -> Vec<String> {
        self.data
            .iter()
            .filter_map(|kv| kv.key().ok())
            .map(|key| String::from_utf8_lossy(&key).into_owned())
            .collect()
    }
}

impl Storage for FjallStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(bytes) = self.data.get(key)? else {
            trace!(key = key, "key not found");
            return Ok(None);
        };
        let value = String::from_utf8(bytes.to_vec())
            .map_err(|_| StorageError::InvalidUtf8(key.to_string()))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data.insert(key, value.as_bytes())?;
        self.db.persist(PersistMode::SyncAll)?;
        debug!(key = key, value_len = value.len(), "value set");
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.data.remove(key)?;
        self.db.persist(PersistMode::SyncAll)?;
        debug!(key = key, "value deleted");
        Ok(())
    }
}

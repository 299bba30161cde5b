//! String key/value storage backends.
//!
//! The survey persists three small JSON documents (progress, history and
//! theme). [`Storage`] is the seam between that typed layer and where the
//! bytes actually live:
//!
//! - [`MemoryStorage`]: a `BTreeMap`, for tests and embedding.
//! - [`FjallStore`]: an on-disk fjall database (requires the `kv` feature).

mod error;
#[cfg(feature = "kv")]
mod fjall_store;
mod memory;

pub use error::StorageError;
#[cfg(feature = "kv")]
pub use fjall_store::FjallStore;
pub use memory::MemoryStorage;

/// Key/value storage for string values.
///
/// Writes are last-write-wins; there is no cross-process coordination.
pub trait Storage {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

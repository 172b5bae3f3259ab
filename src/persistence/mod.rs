//! Key-value persistence
//!
//! Features:
//! - [`Storage`] trait shaped like the browser's Web Storage API
//! - LocalStorage backend on wasm32, one-file-per-key backend on native
//! - In-memory backend for tests and headless runs
//! - JSON helpers that treat missing or corrupt values as absent

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Failures surfaced by a storage backend
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("storage i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("web storage rejected the call: {0}")]
    Js(String),
}

/// A string-to-string store with a single writer
pub trait Storage {
    /// Value under `key`, or `None` if nothing was written
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Read and decode the JSON value under `key`.
///
/// Returns `None` when the key is missing, the backend fails, or the text
/// does not decode as `T`. Callers fall back to their defaults.
pub fn load_json<T, S>(storage: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: Storage + ?Sized,
{
    let json = match storage.get_item(key) {
        Ok(Some(json)) => json,
        Ok(None) => {
            log::info!("Nothing stored under '{}'", key);
            return None;
        }
        Err(e) => {
            log::warn!("Could not read '{}': {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding corrupt value under '{}': {}", key, e);
            None
        }
    }
}

/// Encode `value` as JSON and write it under `key`
pub fn save_json<T, S>(storage: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: Storage + ?Sized,
{
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)
}

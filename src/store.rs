use serde::Serialize;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

pub mod memory;

/// Key-value persistence provided by the host (browser local storage or
/// similar). Values are JSON documents.
#[uniffi::export(with_foreign)]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: String) -> Option<String>;

    /// Store `value` under `key`, returning whether the write succeeded
    fn set(&self, key: String, value: String) -> bool;
}

/// Serialize `value` as JSON and store it under `key`
///
/// # Errors
///
/// Returns an error if encoding fails or the store refuses the write
pub fn write_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| StorageError::serialization_failed(e.to_string()))?;
    debug!(key, bytes = json.len(), "writing record");
    if store.set(key.to_string(), json) {
        Ok(())
    } else {
        Err(StorageError::write_refused(key))
    }
}

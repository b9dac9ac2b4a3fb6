//! Durable key-value storage.
//!
//! The application only ever stores a handful of string values (a login flag
//! and JSON-serialized collections), so storage is modelled as a flat
//! string-to-string map behind the `KeyValueStore` trait. State managers take
//! the store as an injected `Arc<dyn KeyValueStore>`; tests substitute the
//! in-memory implementation.
//!
//! # Module Structure
//!
//! - `file`: one file per key inside a data directory, with locking and atomic writes
//! - `memory`: an in-process map for tests and ephemeral sessions
//!
//! Collections are written inside a small versioned envelope (see
//! [`encode_collection`]) so a future format change can be detected instead of
//! silently misread.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::constants::STORAGE_FORMAT_VERSION;
use crate::errors::{AppResult, StorageError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// String-valued key-value storage.
///
/// Writes are synchronous: when `set` or `remove` returns, a subsequent `get`
/// observes the new value.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removes the value stored under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Shared handle to a store.
pub type SharedStore = Arc<dyn KeyValueStore>;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    items: &'a [T],
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    items: Vec<T>,
}

/// Serializes a collection inside a versioned envelope.
pub fn encode_collection<T: Serialize>(items: &[T]) -> AppResult<String> {
    let envelope = EnvelopeRef {
        version: STORAGE_FORMAT_VERSION,
        items,
    };
    serde_json::to_string(&envelope).map_err(|e| StorageError::Serialization(e).into())
}

/// Parses a collection written by [`encode_collection`].
///
/// A bare JSON array (the unversioned legacy format) is accepted as well.
/// Envelopes with an unknown version are rejected.
pub fn decode_collection<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, StorageError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }

    let envelope: Envelope<T> = serde_json::from_value(value)?;
    if envelope.version != STORAGE_FORMAT_VERSION {
        return Err(StorageError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope.items)
}

/// Checks that a key is usable as a file name on every platform.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

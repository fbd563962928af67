//! # Key-Value Store
//!
//! Persistence for the handful of settings the console keeps between runs: the simulated
//! license, provider credentials and the orchestrator URL. Values are plain strings; typed
//! values go through [`JsonStoreExt`].
//!
//! Two backends implement [`KeyValueStore`]:
//!
//! 1.  **[`MemoryStore`]**: process-local map, used by tests and ephemeral sessions.
//! 2.  **[`FileStore`]**: the same map mirrored to a single JSON snapshot on disk. Every
//!     mutation rewrites the snapshot with an atomic swap (unique temp file + `fsync` + `rename`),
//!     so a crash never leaves a half-written file behind.
//!
//! # Example
//!
//! ```rust
//! use drill_store::{JsonStoreExt, KeyValueStore, MemoryStore};
//!
//! # fn main() -> Result<(), drill_store::StoreError> {
//! let store = MemoryStore::new();
//! store.set("pagerduty", "R0UT1NGKEY")?;
//! assert!(store.contains("pagerduty"));
//!
//! store.set_json("limits", &vec![1, 2, 3])?;
//! let limits: Option<Vec<u8>> = store.get_json("limits")?;
//! assert_eq!(limits, Some(vec![1, 2, 3]));
//! # Ok(())
//! # }
//! ```

mod error;
mod file;
mod memory;

pub use crate::error::{StoreError, StoreErrorExt};
pub use crate::file::{FileStore, FileStoreBuilder};
pub use crate::memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// String key-value storage shared by the console slices.
///
/// Reads are infallible and never block on I/O; writes report persistence failures.
pub trait KeyValueStore: Debug + Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Lists the stored keys in ascending order.
    fn keys(&self) -> Vec<String>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// JSON helpers available on every [`KeyValueStore`], including trait objects.
pub trait JsonStoreExt {
    /// Decodes the JSON value stored under `key`.
    ///
    /// # Errors
    /// Returns [`StoreError::Serde`] if the stored text is not valid JSON for `T`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError>;

    /// Encodes `value` as JSON and stores it under `key`.
    ///
    /// # Errors
    /// Returns [`StoreError::Serde`] if encoding fails, or the backend's write error.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> JsonStoreExt for S {
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.get(key)
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .context(format!("Decoding value of `{key}`"))
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).context(format!("Encoding value of `{key}`"))?;
        self.set(key, &raw)
    }
}

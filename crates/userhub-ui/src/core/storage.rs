//! Key/value persistence seam for browser-style local storage.
//!
//! # Design
//! - Values are raw strings so callers decide the encoding (JSON for auth, plain for language).
//! - Writes may fail (quota, private mode); reads never do, a missing value is `None`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;

/// Failure to persist a value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("storage write failed for key {key}")]
pub struct StorageError {
    /// Key being written.
    pub key: String,
    /// Backend detail.
    pub detail: String,
}

/// Minimal string key/value store.
pub trait KeyValueStorage {
    /// Read the raw value under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

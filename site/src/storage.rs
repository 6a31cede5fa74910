//! Best-effort key-value storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browsers may refuse storage entirely (private mode, strict settings) or
//! throw on individual calls (quota). Callers get an explicit `Result` and
//! decide for themselves; every caller in this crate logs and carries on with
//! in-memory state.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::fmt;

/// Which browser storage area a store is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    /// Durable `localStorage`.
    Local,
    /// Per-tab `sessionStorage`.
    Session,
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Session => "session",
        })
    }
}

/// Error returned by [`KvStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The storage area could not be opened at all.
    #[error("{0} storage is unavailable")]
    Unavailable(StorageArea),
    /// The storage area threw on access.
    #[error("{area} storage rejected access: {reason}")]
    Rejected { area: StorageArea, reason: String },
}

/// Capability-scoped string key-value store.
pub trait KvStore {
    /// Read `key`. `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing area is unavailable or throws.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing area is unavailable or throws.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing area is unavailable or throws.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store, optionally simulating a disabled storage area.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    area: StorageArea,
    available: bool,
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(area: StorageArea) -> Self {
        Self { area, available: true, entries: HashMap::new() }
    }

    /// A store whose every operation fails with [`StorageError::Unavailable`].
    #[must_use]
    pub fn unavailable(area: StorageArea) -> Self {
        Self { available: false, ..Self::new(area) }
    }

    /// Seed an entry, bypassing availability.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_owned(), value.to_owned());
        self
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.available { Ok(()) } else { Err(StorageError::Unavailable(self.area)) }
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.remove(key);
        Ok(())
    }
}

/// `localStorage` / `sessionStorage` of the current window.
#[cfg(feature = "browser")]
#[derive(Debug, Clone)]
pub struct WebStorage {
    area: StorageArea,
    inner: Option<web_sys::Storage>,
}

#[cfg(feature = "browser")]
impl WebStorage {
    /// Open `area`. Opening never fails; an unusable area reports
    /// [`StorageError::Unavailable`] on every call.
    #[must_use]
    pub fn open(area: StorageArea) -> Self {
        let inner = web_sys::window().and_then(|w| {
            let opened = match area {
                StorageArea::Local => w.local_storage(),
                StorageArea::Session => w.session_storage(),
            };
            opened.unwrap_or_else(|e| {
                log::debug!("{area} storage blocked: {}", crate::dom::js_error_text(&e));
                None
            })
        });
        Self { area, inner }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.inner.as_ref().ok_or(StorageError::Unavailable(self.area))
    }

    fn rejected(&self, e: &wasm_bindgen::JsValue) -> StorageError {
        StorageError::Rejected { area: self.area, reason: crate::dom::js_error_text(e) }
    }
}

#[cfg(feature = "browser")]
impl KvStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(|e| self.rejected(&e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|e| self.rejected(&e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(|e| self.rejected(&e))
    }
}

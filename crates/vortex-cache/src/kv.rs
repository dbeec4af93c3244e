//! Key-Value store wrapper with automatic serialization.

use crate::{CacheError, FileBackend, KvBackend, MemoryBackend};
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<B> {
    backend: B,
}

impl Cache<MemoryBackend> {
    /// Open an empty in-memory cache.
    ///
    /// # Example
    ///
    /// ```
    /// let cache = vortex_cache::Cache::in_memory();
    /// assert!(cache.keys().unwrap().is_empty());
    /// ```
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl Cache<FileBackend> {
    /// Open a file-backed cache rooted at `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_dir("~/.local/share/vortex")?;
    /// ```
    pub fn open_dir(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::new(FileBackend::open(dir)?))
    }
}

impl<B: KvBackend> Cache<B> {
    /// Wrap an existing backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`CacheError::SerializeError`] if the stored bytes don't decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("vortex_warenkorb")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("vortex_warenkorb", &cart)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Get the raw stored string, without decoding.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.backend
            .get(key)?
            .map(|bytes| {
                String::from_utf8(bytes).map_err(|e| CacheError::StoreError(e.to_string()))
            })
            .transpose()
    }

    /// Store a raw string, without encoding.
    pub fn set_raw(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        self.backend.set(key, value.as_bytes())
    }

    /// Delete a value from the cache.
    pub fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrow the underlying backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        quantity: u8,
    }

    #[test]
    fn test_typed_roundtrip() {
        let mut cache = Cache::in_memory();
        let entries = vec![
            Entry { id: "a".into(), quantity: 1 },
            Entry { id: "b".into(), quantity: 3 },
        ];

        cache.set("entries", &entries).unwrap();
        let loaded: Option<Vec<Entry>> = cache.get("entries").unwrap();
        assert_eq!(loaded, Some(entries));
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = Cache::in_memory();
        let loaded: Option<Vec<Entry>> = cache.get("nothing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_get_corrupt_is_serialize_error() {
        let mut cache = Cache::in_memory();
        cache.set_raw("entries", "{not json").unwrap();

        let err = cache.get::<Vec<Entry>>("entries").unwrap_err();
        assert!(err.is_corrupt_data());
    }

    #[test]
    fn test_raw_passthrough() {
        let mut cache = Cache::in_memory();
        cache.set("n", &42).unwrap();
        assert_eq!(cache.get_raw("n").unwrap().as_deref(), Some("42"));
    }

    #[test]
    fn test_file_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = Cache::open_dir(dir.path()).unwrap();
        cache.set("entries", &vec![Entry { id: "x".into(), quantity: 2 }]).unwrap();

        let reopened = Cache::open_dir(dir.path()).unwrap();
        let loaded: Vec<Entry> = reopened.get("entries").unwrap().unwrap();
        assert_eq!(loaded[0].quantity, 2);
        assert!(reopened.exists("entries").unwrap());
    }
}

//! Best-score persistence
//!
//! The core reads and writes a single named scalar through [`BestScoreStore`].
//! Adapters:
//! - [`MemoryStore`]: in-process, for tests and headless runs
//! - [`JsonFileStore`]: key-value JSON file with tmp-file replace (native)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm32)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use thiserror::Error;

/// Storage failures. The scene logs these and keeps playing.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored value for `{key}` is not a score: {value}")]
    BadValue { key: String, value: String },
    #[error("storage backend unavailable")]
    Unavailable,
}

/// Read/write port for the persisted best score
pub trait BestScoreStore {
    /// Stored best score, `None` if nothing has been stored yet
    fn load(&self) -> Result<Option<u32>, StoreError>;

    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Parse a stored scalar the way the browser stored it (a decimal string)
pub(crate) fn parse_score(key: &str, raw: &str) -> Result<u32, StoreError> {
    raw.trim().parse::<u32>().map_err(|_| StoreError::BadValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    /// Number of successful `save` calls
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            writes: 0,
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(7).unwrap();
        store.save(7).unwrap();
        assert_eq!(store.load().unwrap(), Some(7));
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("bestScore", "42").unwrap(), 42);
        assert_eq!(parse_score("bestScore", " 3\n").unwrap(), 3);
        let err = parse_score("bestScore", "null").unwrap_err();
        assert!(matches!(err, StoreError::BadValue { .. }));
        assert!(err.to_string().contains("bestScore"));
    }
}

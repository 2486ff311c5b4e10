//! Browser LocalStorage store (wasm32)

use super::{BestScoreStore, StoreError, parse_score};
use crate::consts::BEST_SCORE_KEY;
use crate::platform;

/// Scalar stored as a decimal string under a LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self {
            key: BEST_SCORE_KEY.to_string(),
        }
    }
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        platform::local_storage().ok_or(StoreError::Unavailable)
    }
}

impl BestScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(raw)) => parse_score(&self.key, &raw).map(Some),
            Ok(None) => Ok(None),
            Err(_) => Err(StoreError::Unavailable),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key, &score.to_string())
            .map_err(|_| StoreError::Unavailable)?;
        log::info!("Best score saved ({})", score);
        Ok(())
    }
}

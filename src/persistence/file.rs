//! JSON key-value file store (native)
//!
//! The file holds one JSON object, like a LocalStorage origin. Writes go to a
//! sibling `.tmp` file first and then replace the real one, so a crash never
//! leaves half a file behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{BestScoreStore, StoreError, parse_score};
use crate::consts::BEST_SCORE_KEY;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: BEST_SCORE_KEY.to_string(),
        }
    }

    /// Store the score under a different key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl BestScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let map = self.read_map()?;
        match map.get(&self.key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| StoreError::BadValue {
                    key: self.key.clone(),
                    value: n.to_string(),
                }),
            Some(Value::String(s)) => parse_score(&self.key, s).map(Some),
            Some(other) => Err(StoreError::BadValue {
                key: self.key.clone(),
                value: other.to_string(),
            }),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(self.key.clone(), Value::from(score));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&map)?)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Best score {} written to {}", score, self.path.display());
        Ok(())
    }
}

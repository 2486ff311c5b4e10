//! Best-score record
//!
//! Read once when a run starts, committed once when it ends. Only a strictly
//! higher score replaces the stored value.

use crate::persistence::BestScoreStore;

/// Cached view of the persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Check if a finished run beats the record
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.value
    }

    /// Read the stored value. Missing or unreadable values count as 0.
    pub fn load<S: BestScoreStore>(store: &S) -> Self {
        match store.load() {
            Ok(value) => Self::new(value.unwrap_or(0)),
            Err(e) => {
                log::warn!("Could not read best score, showing 0: {}", e);
                Self::default()
            }
        }
    }

    /// Commit `score` if it beats the record.
    ///
    /// Returns true when a new record was written. The cached value is updated
    /// even if the write fails so the HUD stays consistent for this session.
    pub fn commit<S: BestScoreStore>(&mut self, store: &mut S, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        match store.save(score) {
            Ok(()) => {
                log::info!("New best score: {}", score);
                true
            }
            Err(e) => {
                log::warn!("Could not save best score {}: {}", score, e);
                false
            }
        }
    }
}

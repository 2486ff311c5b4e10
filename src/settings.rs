//! Game settings and tuning
//!
//! Defaults reproduce the reference game. Persisted as JSON: a file on
//! native, LocalStorage on the web.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{DifficultyTier, PromotionRule};

/// Problems loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
    #[error("settings storage unavailable")]
    Unavailable,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Obstacles ===
    /// Pairs in the recycle pool
    pub obstacle_pairs: usize,
    /// Width of one obstacle sprite
    pub obstacle_width: f32,
    /// Group velocity (negative = leftward)
    pub obstacle_velocity_x: f32,

    // === Player ===
    pub gravity: f32,
    pub flap_velocity: f32,
    pub player_width: f32,
    pub player_height: f32,

    // === Timing ===
    pub restart_delay_ms: u64,
    pub resume_countdown: u32,
    pub countdown_step_ms: u64,

    // === Difficulty ===
    pub promotion_rule: PromotionRule,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            obstacle_pairs: OBSTACLE_PAIRS,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_velocity_x: OBSTACLE_VELOCITY_X,

            gravity: PLAYER_GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,

            restart_delay_ms: RESTART_DELAY_MS,
            resume_countdown: RESUME_COUNTDOWN,
            countdown_step_ms: COUNTDOWN_STEP_MS,

            promotion_rule: PromotionRule::ExactScore,
        }
    }
}

impl Settings {
    /// Where the player spawns: a tenth of the way in, vertically centered
    pub fn start_position(&self) -> Vec2 {
        Vec2::new(self.canvas_width / 10.0, self.canvas_height / 2.0)
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }

    pub fn countdown_step(&self) -> Duration {
        Duration::from_millis(self.countdown_step_ms)
    }

    /// Reject settings the spawn planner or scheduler cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid =
            |msg: String| -> Result<(), SettingsError> { Err(SettingsError::Invalid(msg)) };

        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return invalid(format!(
                "canvas must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            ));
        }
        let widest_opening = DifficultyTier::ALL
            .iter()
            .map(|t| t.params().vertical_opening.max)
            .max()
            .unwrap_or(0);
        let needed = MARGIN_TOP + MARGIN_BOTTOM + widest_opening;
        if (self.canvas_height as i32) < needed {
            return invalid(format!(
                "canvas height {} cannot fit a {}px opening between the margins (need {})",
                self.canvas_height, widest_opening, needed
            ));
        }
        if self.obstacle_pairs == 0 {
            return invalid("obstacle pool needs at least one pair".to_string());
        }
        if self.obstacle_width <= 0.0 {
            return invalid(format!("obstacle width must be positive, got {}", self.obstacle_width));
        }
        if self.obstacle_velocity_x >= 0.0 {
            return invalid(format!(
                "obstacles must scroll left, got velocity {}",
                self.obstacle_velocity_x
            ));
        }
        if self.countdown_step_ms == 0 {
            return invalid("countdown step must be longer than 0ms".to_string());
        }
        Ok(())
    }

    /// Parse and validate settings. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&text)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "flap_run_settings";

    /// Settings stored in the browser, or the defaults if there are none
    /// or they no longer validate
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = crate::platform::local_storage()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored.as_deref().map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Store settings in the browser
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), SettingsError> {
        let storage = crate::platform::local_storage().ok_or(SettingsError::Unavailable)?;
        let json = serde_json::to_string(self)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| SettingsError::Unavailable)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let s = Settings::default();
        assert_eq!(s.canvas_width, 400.0);
        assert_eq!(s.canvas_height, 600.0);
        assert_eq!(s.obstacle_pairs, 4);
        assert_eq!(s.obstacle_velocity_x, -200.0);
        assert_eq!(s.start_position(), Vec2::new(40.0, 300.0));
        assert_eq!(s.restart_delay(), Duration::from_millis(1000));
        assert_eq!(s.resume_countdown, 3);
        assert_eq!(s.promotion_rule, PromotionRule::ExactScore);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{ "canvas_height": 800, "promotion_rule": "Threshold" }"#)
            .unwrap();
        assert_eq!(s.canvas_height, 800.0);
        assert_eq!(s.canvas_width, 400.0);
        assert_eq!(s.promotion_rule, PromotionRule::Threshold);
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings {
            obstacle_pairs: 6,
            ..Default::default()
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_short_canvas_rejected() {
        let err = Settings::from_json(r#"{ "canvas_height": 250 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert!(err.to_string().contains("opening"));
    }

    #[test]
    fn test_bad_values_rejected() {
        for json in [
            r#"{ "obstacle_pairs": 0 }"#,
            r#"{ "obstacle_velocity_x": 10 }"#,
            r#"{ "obstacle_width": 0 }"#,
            r#"{ "countdown_step_ms": 0 }"#,
        ] {
            assert!(
                matches!(Settings::from_json(json), Err(SettingsError::Invalid(_))),
                "{json} should be rejected"
            );
        }
        assert!(matches!(Settings::from_json("[1, 2"), Err(SettingsError::Json(_))));
    }
}

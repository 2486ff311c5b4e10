//! Browser bindings (wasm32)
//!
//! The host page owns the canvas and calls [`WebGame::frame`] once per
//! animation frame. Physics runs in the built-in
//! [`HeadlessEngine`](crate::headless::HeadlessEngine), the best
//! score lives in LocalStorage and the page reads positions back to draw them.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::headless::HeadlessGame;
use crate::persistence::LocalStorageStore;
use crate::platform;
use crate::settings::Settings;
use crate::sim::{Engine, RunPhase, TickInput};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    platform::init_logging();
    log::info!("Flap Run starting...");
}

/// One game instance driven by the host page
#[wasm_bindgen]
pub struct WebGame {
    game: HeadlessGame<LocalStorageStore>,
    /// Commands queued since the last frame
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a game from the stored settings and start the first run
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebGame, JsValue> {
        Self::with_settings(Settings::load())
    }

    fn with_settings(settings: Settings) -> Result<WebGame, JsValue> {
        let game = HeadlessGame::new(settings, LocalStorageStore::new(), platform::clock_seed())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebGame {
            game,
            input: TickInput::default(),
        })
    }

    /// Replace the settings, store them and start over
    pub fn apply_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        if let Err(e) = settings.save() {
            log::warn!("Settings not stored: {}", e);
        }
        *self = Self::with_settings(settings)?;
        Ok(())
    }

    /// Queue a flap for the next frame (pointer down or space)
    pub fn flap(&mut self) {
        self.input.flap = true;
    }

    pub fn pause(&mut self) {
        self.input.pause = true;
    }

    /// "Continue" from the pause menu
    pub fn resume(&mut self) {
        self.input.resume = true;
    }

    /// "Exit" from the pause menu
    pub fn exit(&mut self) {
        self.input.exit = true;
    }

    /// Advance by `dt_ms` milliseconds. Returns the number of pairs recycled.
    pub fn frame(&mut self, dt_ms: f64) -> u32 {
        let dt = Duration::from_secs_f64(dt_ms.max(0.0) / 1000.0);
        let input = std::mem::take(&mut self.input);
        self.game.frame(&input, dt).len() as u32
    }

    pub fn score(&self) -> u32 {
        self.game.scene().run().score
    }

    pub fn best_score(&self) -> u32 {
        self.game.scene().best_score()
    }

    /// Seconds left in the resume countdown, if one is running
    pub fn countdown(&self) -> Option<u32> {
        self.game.scene().hud().countdown
    }

    pub fn score_text(&self) -> String {
        self.game.scene().hud().score_text()
    }

    pub fn best_text(&self) -> String {
        self.game.scene().hud().best_text()
    }

    pub fn countdown_text(&self) -> Option<String> {
        self.game.scene().hud().countdown_text()
    }

    pub fn tier(&self) -> String {
        self.game.scene().run().tier.as_str().to_string()
    }

    pub fn is_paused(&self) -> bool {
        self.game.scene().run().is_paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game.scene().phase() == RunPhase::Ending
    }

    /// Player box as `[x, y, width, height]`
    pub fn player(&self) -> Vec<f32> {
        let b = self.game.engine().player_bounds();
        vec![b.left(), b.top(), b.right() - b.left(), b.bottom() - b.top()]
    }

    /// Player tint as 0xRRGGBB, if any
    pub fn player_tint(&self) -> Option<u32> {
        self.game.engine().tint()
    }

    /// Obstacle origins as `[upper_x, upper_y, lower_x, lower_y]` per pair
    pub fn obstacles(&self) -> Vec<f32> {
        self.game
            .engine()
            .obstacles()
            .iter()
            .flat_map(|p| [p.upper.x, p.upper.y, p.lower.x, p.lower.y])
            .collect()
    }
}

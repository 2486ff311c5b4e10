//! Flap Run - side-scrolling arcade core
//!
//! Core modules:
//! - `sim`: Obstacle pool, spawn planner, progress tracking and the play scene
//! - `best_score`: Best-score gate (commit only when beaten)
//! - `persistence`: Best-score storage port and its adapters
//! - `platform`: Browser/native platform abstraction (logging)
//! - `settings`: Data-driven tuning and canvas configuration
//! - `headless`: Minimal stand-in engine for driving the core without a renderer
//! - `web`: Browser bindings over the headless engine (wasm32)

pub mod best_score;
pub mod headless;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_score::BestScore;
pub use settings::{Settings, SettingsError};

/// Game configuration constants (reference instance)
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Obstacle pairs kept alive and recycled for the whole run
    pub const OBSTACLE_PAIRS: usize = 4;
    /// Sprite width of one obstacle half (origin at its left edge)
    pub const OBSTACLE_WIDTH: f32 = 26.0;
    /// Group velocity applied to every obstacle (pixels/s, leftward)
    pub const OBSTACLE_VELOCITY_X: f32 = -200.0;

    /// Gap must stay this far from the top and bottom canvas edges
    pub const MARGIN_TOP: i32 = 20;
    pub const MARGIN_BOTTOM: i32 = 20;

    /// Player defaults
    pub const PLAYER_GRAVITY: f32 = 600.0;
    pub const FLAP_VELOCITY: f32 = 300.0;
    /// Body size after the 2.5x sprite scale (16px frame, body trimmed by 8px)
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;

    /// Scores at which the difficulty tier is promoted
    pub const NORMAL_TIER_SCORE: u32 = 10;
    pub const HARD_TIER_SCORE: u32 = 20;

    /// Delay between game over and the automatic restart (ms)
    pub const RESTART_DELAY_MS: u64 = 1000;
    /// Resume countdown: number of steps and step length (ms)
    pub const RESUME_COUNTDOWN: u32 = 3;
    pub const COUNTDOWN_STEP_MS: u64 = 1000;

    /// Tint applied to the player on game over
    pub const GAME_OVER_TINT: u32 = 0xff0000;

    /// Key of the best score in the key-value store
    pub const BEST_SCORE_KEY: &str = "bestScore";
}

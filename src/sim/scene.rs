//! Seams between the core and the 2D engine
//!
//! The engine owns sprites, motion and collision detection. The core only
//! sees it through [`Engine`], and the engine drives the core through
//! [`Scene`].

use std::time::Duration;

use glam::Vec2;

use super::obstacle::ObstaclePair;
use super::terminal::Bounds;

/// Calls the core makes into the engine
pub trait Engine {
    /// Current bounding box of the player sprite
    fn player_bounds(&self) -> Bounds;

    /// Put the player back at `position` with zero velocity
    fn reset_player(&mut self, position: Vec2);

    /// Override the player's vertical velocity (negative is up)
    fn set_player_velocity_y(&mut self, velocity_y: f32);

    /// Tint the player sprite, `None` clears the tint
    fn tint_player(&mut self, tint: Option<u32>);

    /// Current positions of the obstacle sprites in pool slot `index`
    fn obstacle_pair(&self, index: usize) -> ObstaclePair;

    /// Move the obstacle sprites in pool slot `index`
    fn place_obstacle_pair(&mut self, index: usize, pair: &ObstaclePair);

    /// Horizontal velocity shared by every obstacle sprite
    fn set_obstacle_velocity_x(&mut self, velocity_x: f32);

    fn pause_physics(&mut self);

    fn resume_physics(&mut self);
}

/// Lifecycle hooks the engine calls on a scene
pub trait Scene<E: Engine> {
    /// Build (or rebuild) the scene's state
    fn create(&mut self, engine: &mut E);

    /// Once per animation frame
    fn update(&mut self, engine: &mut E, dt: Duration);

    fn pause(&mut self, engine: &mut E);

    fn resume(&mut self, engine: &mut E);
}

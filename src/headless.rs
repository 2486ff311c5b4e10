//! Headless arcade engine
//!
//! Just enough physics to drive a [`PlayScene`](crate::sim::PlayScene)
//! without a renderer: gravity on the player, a flap velocity override,
//! a shared horizontal velocity for obstacles, world-bounds clamping and
//! box overlap for collisions.

use std::time::Duration;

use glam::Vec2;

use crate::persistence::BestScoreStore;
use crate::settings::{Settings, SettingsError};
use crate::sim::{Bounds, Engine, ObstaclePair, PlayScene, RecycleEvent, Scene, TickInput, tick};

/// Height of one obstacle sprite (tall enough to cover any canvas)
pub const OBSTACLE_HEIGHT: f32 = 640.0;

#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    canvas: Vec2,
    gravity: f32,
    player_pos: Vec2,
    player_vel: Vec2,
    player_size: Vec2,
    tint: Option<u32>,
    obstacle_width: f32,
    obstacles: Vec<ObstaclePair>,
    obstacle_velocity_x: f32,
    paused: bool,
}

impl HeadlessEngine {
    pub fn new(settings: &Settings) -> Self {
        Self {
            canvas: Vec2::new(settings.canvas_width, settings.canvas_height),
            gravity: settings.gravity,
            player_pos: settings.start_position(),
            player_vel: Vec2::ZERO,
            player_size: settings.player_size(),
            tint: None,
            obstacle_width: settings.obstacle_width,
            obstacles: vec![ObstaclePair::default(); settings.obstacle_pairs],
            obstacle_velocity_x: 0.0,
            paused: true,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn tint(&self) -> Option<u32> {
        self.tint
    }

    pub fn player_position(&self) -> Vec2 {
        self.player_pos
    }

    pub fn player_velocity(&self) -> Vec2 {
        self.player_vel
    }

    pub fn obstacles(&self) -> &[ObstaclePair] {
        &self.obstacles
    }

    /// Sprite boxes for one pair: upper hangs above its origin, lower stands below
    pub fn obstacle_bounds(&self, pair: &ObstaclePair) -> [Bounds; 2] {
        let size = Vec2::new(self.obstacle_width, OBSTACLE_HEIGHT);
        [
            Bounds::from_origin(pair.upper - Vec2::new(0.0, OBSTACLE_HEIGHT), size),
            Bounds::from_origin(pair.lower, size),
        ]
    }

    /// Next pair the player still has to get through
    pub fn next_pair(&self) -> Option<&ObstaclePair> {
        let player_left = self.player_pos.x;
        self.obstacles
            .iter()
            .filter(|p| p.x() + self.obstacle_width >= player_left)
            .min_by(|a, b| a.x().total_cmp(&b.x()))
    }

    /// Integrate one frame. Returns true if the player overlaps an obstacle.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.paused {
            return false;
        }
        let dt = dt.as_secs_f32();

        self.player_vel.y += self.gravity * dt;
        self.player_pos += self.player_vel * dt;
        // Collide with world bounds
        let max_y = self.canvas.y - self.player_size.y;
        if self.player_pos.y <= 0.0 {
            self.player_pos.y = 0.0;
            self.player_vel.y = 0.0;
        } else if self.player_pos.y >= max_y {
            self.player_pos.y = max_y;
            self.player_vel.y = 0.0;
        }

        let dx = self.obstacle_velocity_x * dt;
        for pair in &mut self.obstacles {
            pair.upper.x += dx;
            pair.lower.x += dx;
        }

        let player = self.player_bounds();
        self.obstacles
            .iter()
            .flat_map(|pair| self.obstacle_bounds(pair))
            .any(|b| player.overlaps(&b))
    }
}

impl Engine for HeadlessEngine {
    fn player_bounds(&self) -> Bounds {
        Bounds::from_origin(self.player_pos, self.player_size)
    }

    fn reset_player(&mut self, position: Vec2) {
        self.player_pos = position;
        self.player_vel = Vec2::ZERO;
    }

    fn set_player_velocity_y(&mut self, velocity_y: f32) {
        self.player_vel.y = velocity_y;
    }

    fn tint_player(&mut self, tint: Option<u32>) {
        self.tint = tint;
    }

    fn obstacle_pair(&self, index: usize) -> ObstaclePair {
        self.obstacles[index]
    }

    fn place_obstacle_pair(&mut self, index: usize, pair: &ObstaclePair) {
        self.obstacles[index] = *pair;
    }

    fn set_obstacle_velocity_x(&mut self, velocity_x: f32) {
        self.obstacle_velocity_x = velocity_x;
    }

    fn pause_physics(&mut self) {
        self.paused = true;
    }

    fn resume_physics(&mut self) {
        self.paused = false;
    }
}

/// A play scene wired to a headless engine, one `frame` per display frame
#[derive(Debug)]
pub struct HeadlessGame<S: BestScoreStore> {
    scene: PlayScene<S>,
    engine: HeadlessEngine,
}

impl<S: BestScoreStore> HeadlessGame<S> {
    /// Validate the settings and start the first run
    pub fn new(settings: Settings, store: S, seed: u64) -> Result<Self, SettingsError> {
        let mut engine = HeadlessEngine::new(&settings);
        let mut scene = PlayScene::new(settings, store, seed)?;
        scene.create(&mut engine);
        Ok(Self { scene, engine })
    }

    pub fn scene(&self) -> &PlayScene<S> {
        &self.scene
    }

    pub fn engine(&self) -> &HeadlessEngine {
        &self.engine
    }

    /// Move the world, report any hit, then apply input and tick the scene
    pub fn frame(&mut self, input: &TickInput, dt: Duration) -> Vec<RecycleEvent> {
        if self.engine.advance(dt) {
            self.scene.on_collision(&mut self.engine);
        }
        tick(&mut self.scene, &mut self.engine, input, dt)
    }
}

//! Play scene and per-frame tick
//!
//! Core game loop: the engine moves everything, the scene checks for the end
//! of the run, recycles obstacles that left the screen and keeps score.

use std::time::Duration;

use rand_pcg::Pcg32;

use super::difficulty::DifficultyTier;
use super::obstacle::{ObstaclePool, RecycleEvent};
use super::scene::{Engine, Scene};
use super::state::{RngState, RunPhase, RunState};
use super::terminal::{TerminalCause, check_terminal};
use super::timer::{Scheduler, Task, TaskId};
use crate::best_score::BestScore;
use crate::consts::GAME_OVER_TINT;
use crate::persistence::BestScoreStore;
use crate::settings::{Settings, SettingsError};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer down or space
    pub flap: bool,
    /// Pause button
    pub pause: bool,
    /// "Continue" in the pause menu
    pub resume: bool,
    /// "Exit" in the pause menu
    pub exit: bool,
}

/// What the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub best_score: u32,
    /// Seconds left before play resumes, while counting down
    pub countdown: Option<u32>,
}

impl Hud {
    pub fn score_text(&self) -> String {
        format!("Your score: {}", self.score)
    }

    pub fn best_text(&self) -> String {
        format!("Best score: {}", self.best_score)
    }

    pub fn countdown_text(&self) -> Option<String> {
        self.countdown.map(|n| format!("Fly in: {}", n))
    }
}

/// The scene a run is played in
#[derive(Debug)]
pub struct PlayScene<S: BestScoreStore> {
    settings: Settings,
    store: S,
    rng_state: RngState,
    rng: Pcg32,
    pool: ObstaclePool,
    run: RunState,
    phase: RunPhase,
    best: BestScore,
    timers: Scheduler,
    countdown_task: Option<TaskId>,
    last_cause: Option<TerminalCause>,
    /// Completed runs since the scene was built
    runs_finished: u32,
}

impl<S: BestScoreStore> PlayScene<S> {
    /// Build an idle scene. Nothing happens until the engine calls `create`.
    ///
    /// Settings are checked here so a bad pool size or countdown step fails
    /// before the first run instead of in the middle of one.
    pub fn new(settings: Settings, store: S, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        let pool = ObstaclePool::new(settings.obstacle_pairs, settings.obstacle_width);
        let best = BestScore::load(&store);
        Ok(Self {
            settings,
            store,
            rng_state,
            rng,
            pool,
            run: RunState::new(),
            phase: RunPhase::Stopped,
            best,
            timers: Scheduler::new(),
            countdown_task: None,
            last_cause: None,
            runs_finished: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn pool(&self) -> &ObstaclePool {
        &self.pool
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn best_score(&self) -> u32 {
        self.best.value()
    }

    pub fn last_cause(&self) -> Option<TerminalCause> {
        self.last_cause
    }

    pub fn runs_finished(&self) -> u32 {
        self.runs_finished
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.run.score,
            best_score: self.best.value(),
            countdown: match self.phase {
                RunPhase::Resuming { remaining } => Some(remaining),
                _ => None,
            },
        }
    }

    /// Start a fresh run: clean state, obstacles laid out from x = 0.
    ///
    /// Cancels anything still scheduled by the previous run.
    pub fn start_run<E: Engine>(&mut self, engine: &mut E) {
        self.timers.clear();
        self.countdown_task = None;

        self.run = RunState::new();
        self.rng = self.rng_state.to_rng();
        let stream = self.rng_state.stream;
        self.rng_state.advance();
        self.best = BestScore::load(&self.store);

        engine.reset_player(self.settings.start_position());
        engine.tint_player(None);

        self.pool.populate(DifficultyTier::Easy, self.settings.canvas_height, &mut self.rng);
        for (i, pair) in self.pool.pairs().iter().enumerate() {
            engine.place_obstacle_pair(i, pair);
        }
        engine.set_obstacle_velocity_x(self.settings.obstacle_velocity_x);
        engine.resume_physics();

        self.phase = RunPhase::Active;
        log::info!(
            "Run started (seed {}, stream {}, best score {})",
            self.rng_state.seed,
            stream,
            self.best.value()
        );
    }

    /// One frame: fire due timers, then check the run and recycle obstacles.
    ///
    /// Returns the pairs recycled this frame in pool order.
    pub fn step<E: Engine>(&mut self, engine: &mut E, dt: Duration) -> Vec<RecycleEvent> {
        for (id, task) in self.timers.advance(dt) {
            self.run_task(engine, id, task);
        }

        if self.phase != RunPhase::Active {
            return Vec::new();
        }

        if let Some(cause) = check_terminal(&engine.player_bounds(), self.settings.canvas_height) {
            self.game_over(engine, cause);
            return Vec::new();
        }

        for i in 0..self.pool.len() {
            self.pool.set(i, engine.obstacle_pair(i));
        }
        let events = self.pool.recycle(
            &mut self.run,
            self.settings.promotion_rule,
            self.settings.canvas_height,
            &mut self.rng,
        );
        for event in &events {
            engine.place_obstacle_pair(event.index, &event.pair);
        }
        events
    }

    fn run_task<E: Engine>(&mut self, engine: &mut E, id: TaskId, task: Task) {
        match task {
            Task::Restart => {
                if self.phase == RunPhase::Ending {
                    log::info!("Restarting after game over");
                    self.start_run(engine);
                }
            }
            Task::CountdownStep => {
                if self.countdown_task != Some(id) {
                    return;
                }
                if let RunPhase::Resuming { remaining } = self.phase {
                    let remaining = remaining.saturating_sub(1);
                    if remaining == 0 {
                        self.finish_resume(engine);
                    } else {
                        self.phase = RunPhase::Resuming { remaining };
                    }
                }
            }
        }
    }

    fn finish_resume<E: Engine>(&mut self, engine: &mut E) {
        if let Some(id) = self.countdown_task.take() {
            self.timers.cancel(id);
        }
        self.phase = RunPhase::Active;
        self.run.is_paused = false;
        engine.resume_physics();
        log::info!("Resumed");
    }

    /// Freeze the run, record the score and schedule the restart
    fn game_over<E: Engine>(&mut self, engine: &mut E, cause: TerminalCause) {
        engine.pause_physics();
        engine.tint_player(Some(GAME_OVER_TINT));

        self.phase = RunPhase::Ending;
        self.last_cause = Some(cause);
        self.runs_finished += 1;
        log::info!("Game over: player {} with score {}", cause, self.run.score);

        self.best.commit(&mut self.store, self.run.score);
        self.timers.schedule_once(self.settings.restart_delay(), Task::Restart);
    }

    /// Flap if the run is live. Returns whether the flap was applied.
    pub fn flap<E: Engine>(&mut self, engine: &mut E) -> bool {
        if self.phase != RunPhase::Active {
            return false;
        }
        engine.set_player_velocity_y(-self.settings.flap_velocity);
        true
    }

    /// Engine-reported hit between the player and an obstacle
    pub fn on_collision<E: Engine>(&mut self, engine: &mut E) {
        if self.phase == RunPhase::Active {
            self.game_over(engine, TerminalCause::Collision);
        }
    }

    /// Leave the run from the pause menu. Pending timers are dropped.
    pub fn exit<E: Engine>(&mut self, engine: &mut E) {
        if self.phase == RunPhase::Stopped {
            return;
        }
        self.timers.clear();
        self.countdown_task = None;
        self.run.is_paused = false;
        self.phase = RunPhase::Stopped;
        engine.pause_physics();
        log::info!("Run exited at score {}", self.run.score);
    }
}

impl<S: BestScoreStore, E: Engine> Scene<E> for PlayScene<S> {
    fn create(&mut self, engine: &mut E) {
        self.start_run(engine);
    }

    fn update(&mut self, engine: &mut E, dt: Duration) {
        self.step(engine, dt);
    }

    fn pause(&mut self, engine: &mut E) {
        match self.phase {
            RunPhase::Active => {}
            RunPhase::Resuming { .. } => {
                // Paused again mid-countdown: the countdown starts over on resume
                if let Some(id) = self.countdown_task.take() {
                    self.timers.cancel(id);
                }
            }
            _ => return,
        }
        self.phase = RunPhase::Paused;
        self.run.is_paused = true;
        engine.pause_physics();
        log::info!("Paused at score {}", self.run.score);
    }

    fn resume(&mut self, engine: &mut E) {
        if self.phase != RunPhase::Paused {
            return;
        }
        let remaining = self.settings.resume_countdown;
        if remaining == 0 {
            self.finish_resume(engine);
            return;
        }
        self.phase = RunPhase::Resuming { remaining };
        self.countdown_task = Some(
            self.timers
                .schedule_repeating(self.settings.countdown_step(), Task::CountdownStep),
        );
    }
}

/// Apply one frame of input, then advance the scene
pub fn tick<S: BestScoreStore, E: Engine>(
    scene: &mut PlayScene<S>,
    engine: &mut E,
    input: &TickInput,
    dt: Duration,
) -> Vec<RecycleEvent> {
    if input.exit {
        scene.exit(engine);
    }
    if input.pause {
        scene.pause(engine);
    }
    if input.resume {
        scene.resume(engine);
    }
    if input.flap {
        scene.flap(engine);
    }
    scene.step(engine, dt)
}

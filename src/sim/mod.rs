//! Deterministic simulation module
//!
//! All gameplay logic lives here. The external engine owns motion and
//! rendering; this module only decides where obstacles go and when a run ends:
//! - Seeded RNG only
//! - Stable iteration order (pool order)
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod obstacle;
pub mod scene;
pub mod spawn;
pub mod state;
pub mod terminal;
pub mod tick;
pub mod timer;

pub use difficulty::{DifficultyTier, SpawnRange, TierParams};
pub use obstacle::{ObstaclePair, ObstaclePool, RecycleEvent};
pub use scene::{Engine, Scene};
pub use spawn::place_pair;
pub use state::{PromotionRule, RngState, RunPhase, RunState};
pub use terminal::{Bounds, TerminalCause, check_terminal};
pub use tick::{Hud, PlayScene, TickInput, tick};
pub use timer::{Scheduler, Task, TaskId};

//! Flap Run headless entry point
//!
//! Drives the play scene with the headless engine and a simple autopilot,
//! logging every run. Usage: `flap-run [settings.json] [seed]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::Duration;

    use flap_run::headless::HeadlessGame;
    use flap_run::persistence::JsonFileStore;
    use flap_run::sim::{Engine, RunPhase, TickInput};
    use flap_run::{Settings, platform};

    /// Runs to play before exiting
    const RUNS: u32 = 3;
    /// Hard cap on simulated time (10 minutes at 60 fps)
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    const FRAME: Duration = Duration::from_micros(16_667);

    platform::init_logging();
    log::info!("Flap Run (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(platform::clock_seed);

    let store = JsonFileStore::new("flap-run-save.json");
    let mut game = match HeadlessGame::new(settings, store, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    let mut frames = 0u64;
    while game.scene().runs_finished() < RUNS && frames < MAX_FRAMES {
        frames += 1;

        // Autopilot: flap when sinking below the middle of the next gap
        let mut input = TickInput::default();
        if game.scene().phase() == RunPhase::Active {
            let engine = game.engine();
            let target = engine
                .next_pair()
                .map(|p| p.gap_center())
                .unwrap_or(game.scene().settings().canvas_height / 2.0);
            input.flap = engine.player_bounds().bottom() > target + 10.0
                && engine.player_velocity().y >= 0.0;
        }

        for event in game.frame(&input, FRAME) {
            if let Some(tier) = event.promoted {
                log::info!("Score {}: difficulty now {}", event.score, tier);
            }
        }
    }

    log::info!(
        "Played {} runs in {:.1}s of game time, best score {}",
        game.scene().runs_finished(),
        frames as f32 * FRAME.as_secs_f32(),
        game.scene().best_score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point is `flap_run::web`, exported from the library
}

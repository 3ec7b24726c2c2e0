//! Sky Vanguard headless demo
//!
//! Flies a seeded scripted sortie at a simulated 60 Hz and logs the HUD feed.
//! Usage: `sky-vanguard [SEED] [DIFFICULTY]`

use clap::Parser;
use sky_vanguard::Settings;
use sky_vanguard::sim::{
    Difficulty, ENERGY_MAX, HudObserver, PcgSource, PlaneId, RunState, RunStatus, TickInput, step,
};

#[derive(Parser, Debug)]
#[command(name = "sky-vanguard")]
#[command(about = "Fly a seeded scripted sortie and print the final run state")]
struct Args {
    /// RNG seed for the session
    #[arg(default_value_t = 0x5eed)]
    seed: u64,
    /// Difficulty tier: easy, normal or hard
    difficulty: Option<Difficulty>,
}

/// Simulated frame interval (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Two minutes of play
const FRAME_LIMIT: u32 = 60 * 120;
/// Frames spent strafing in each direction
const STRAFE_FRAMES: u32 = 90;

/// HUD observer that writes changes to the log
#[derive(Default)]
struct LogHud {
    energy_full: bool,
}

impl HudObserver for LogHud {
    fn score_changed(&mut self, score: u32) {
        log::debug!("score {score}");
    }

    fn level_changed(&mut self, level: u32) {
        log::info!("HUD: level {level}");
    }

    fn energy_changed(&mut self, energy: u32) {
        self.energy_full = energy >= ENERGY_MAX;
        log::debug!("energy {energy}/{ENERGY_MAX}");
    }

    fn health_changed(&mut self, health: f32, max_health: f32) {
        log::debug!("hull {health:.1}/{max_health:.1}");
    }

    fn status_changed(&mut self, status: RunStatus) {
        log::info!("HUD: status {status:?}");
    }

    fn active_plane_changed(&mut self, plane: PlaneId) {
        log::info!("HUD: now flying {}", plane.def().name);
    }
}

/// Strafe back and forth while holding fire
fn scripted_input(frame: u32) -> TickInput {
    let leftward = (frame / STRAFE_FRAMES) % 2 == 0;
    TickInput {
        left: leftward,
        right: !leftward,
        fire: true,
        ..TickInput::default()
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args = Args::parse();
    let seed = args.seed;
    let mut settings = Settings::default();
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    let config = match settings.run_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("cannot start run: {err}");
            std::process::exit(2);
        }
    };

    log::info!(
        "Sky Vanguard demo: seed {seed}, {} difficulty, loadout {:?}",
        config.difficulty,
        config.loadout
    );

    let mut rng = PcgSource::new(seed);
    let mut hud = LogHud::default();
    let mut frames_drawn = 0u32;
    let mut render = |_: &RunState| frames_drawn += 1;
    let mut state = RunState::new(config.difficulty, config.loadout);
    let mut next_slot = 1;

    for frame in 0..FRAME_LIMIT {
        let now = frame as f64 * FRAME_MS;
        if !step(&mut state, &scripted_input(frame), now, &mut rng, &mut hud, &mut render) {
            break;
        }
        if hud.energy_full {
            match state.switch_to_slot(next_slot, &mut hud) {
                Ok(()) => next_slot = (next_slot + 1) % config.loadout.len(),
                Err(err) => log::warn!("switch refused: {err}"),
            }
            hud.energy_full = false;
        }
    }

    log::info!("Rendered {frames_drawn} frames");
    println!(
        "status {:?} | score {} | level {} | energy {}/{} | flying {}",
        state.status, state.score, state.level, state.energy, ENERGY_MAX, state.active_plane
    );
    match state.snapshot_json() {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot failed: {err}"),
    }
}

//! Sky Vanguard - combat simulation for a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, traits, spawning, collisions)
//! - `settings`: Host-side run configuration
//! - `briefing`: Flavor-text briefing contract with a guaranteed fallback

pub mod briefing;
pub mod settings;
pub mod sim;

pub use briefing::{Briefing, BriefingSource, Language, fetch_briefing};
pub use settings::{RunConfig, Settings, SettingsError};

/// Play-field geometry and tuning constants
pub mod consts {
    /// Play field dimensions (pixels)
    pub const PLAY_WIDTH: f32 = 600.0;
    pub const PLAY_HEIGHT: f32 = 800.0;
    /// Player spawns this far above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;

    /// Largest frame delta fed to time-based mechanics (seconds)
    pub const MAX_FRAME_DT: f64 = 0.05;

    /// Lateral muzzle offset per unit of shot spread
    pub const SHOT_OFFSET_SCALE: f32 = 4.0;
    /// Projectiles are culled this far outside the play field
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 50.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 35.0;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    pub const ENEMY_FIRE_RATE: f64 = 1500.0; // ms at level 0
    pub const ENEMY_SHOT_SPEED: f32 = 3.5;
    pub const ENEMY_SHOT_DAMAGE: f32 = 5.0;
    pub const CONTACT_DAMAGE: f32 = 25.0;

    /// Kamikaze homing gains (per frame)
    pub const KAMIKAZE_STEERING: f32 = 0.05;
    pub const KAMIKAZE_ACCEL: f32 = 0.05;

    /// Super holds station below this line and fires a fan
    pub const SUPER_HOLD_Y: f32 = 100.0;
    pub const SUPER_FIRE_RATE: f64 = 1800.0;
    pub const SUPER_SPREAD: [f32; 3] = [-1.5, 0.0, 1.5];
    pub const SUPER_SHOT_SPEED: f32 = 5.0;
    pub const SUPER_SHOT_DAMAGE: f32 = 8.0;

    /// Particle bursts
    pub const PARTICLE_COUNT: usize = 15;
    pub const PARTICLE_JITTER: f32 = 8.0;
    pub const PARTICLE_DECAY: f32 = 0.025;

    /// Score needed per level
    pub const LEVEL_SCORE_STEP: u32 = 2000;
    /// Score per energy cell
    pub const ENERGY_SCORE_STEP: u32 = 100;
}

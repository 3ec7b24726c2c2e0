//! Combat simulation module
//!
//! All gameplay logic lives here:
//! - Single owner: the host passes `RunState` into `step` once per frame
//! - Injected randomness only
//! - No rendering or platform dependencies

pub mod behavior;
pub mod collision;
pub mod difficulty;
pub mod hooks;
pub mod planes;
pub mod rng;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use behavior::{apply_kill_effects, move_speed, try_fire, update_heat};
pub use collision::{contains_point, out_of_bounds, overlaps, resolve_projectiles};
pub use difficulty::{Difficulty, DifficultyMultipliers};
pub use hooks::{HudObserver, RenderSink};
pub use planes::{
    DEFAULT_LOADOUT, ENERGY_MAX, OverheatTrait, PLANE_DEFS, PierceTrait, PlaneDef, PlaneId,
    PlaneState, PlaneStates, SpeedBoostTrait, SplashTrait,
};
pub use rng::{PcgSource, RandomSource, SequenceSource};
pub use scoring::{credit_score, level_for_score};
pub use spawn::{choose_archetype, population_cap, spawn_enemy};
pub use state::{
    ColorToken, EnemyArchetype, Entity, EntityKind, Particle, Projectile, ProjectileOwner,
    RunState, RunStatus, SwitchError,
};
pub use tick::{TickInput, step};

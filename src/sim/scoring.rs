//! Score, level and energy bookkeeping for confirmed kills

use super::behavior::apply_kill_effects;
use super::hooks::HudObserver;
use super::planes::ENERGY_MAX;
use super::rng::RandomSource;
use super::state::{Entity, RunState};
use crate::consts::{ENERGY_SCORE_STEP, LEVEL_SCORE_STEP};

/// Level implied by a total score
pub fn level_for_score(score: u32) -> u32 {
    score / LEVEL_SCORE_STEP + 1
}

/// Add `gain` to the score and derive level and energy from it
///
/// The level is recomputed from the total rather than incremented.
pub fn credit_score(state: &mut RunState, gain: u32, hud: &mut impl HudObserver) {
    state.score = state.score.saturating_add(gain);
    hud.score_changed(state.score);

    let next_level = level_for_score(state.score);
    if next_level != state.level {
        log::info!("Level up: {} -> {} (score {})", state.level, next_level, state.score);
        state.level = next_level;
        hud.level_changed(next_level);
    }

    let cells = gain / ENERGY_SCORE_STEP;
    state.energy = (state.energy + cells).min(ENERGY_MAX);
    hud.energy_changed(state.energy);
}

/// Handle a destroyed enemy: explosion, score, and the active craft's kill hook
pub fn enemy_killed(
    state: &mut RunState,
    enemy: &Entity,
    now: f64,
    rng: &mut impl RandomSource,
    hud: &mut impl HudObserver,
) {
    let Some(archetype) = enemy.archetype else {
        return;
    };
    state.spawn_particles(enemy.center(), archetype.color(), rng);
    credit_score(state, archetype.score_value(), hud);

    let def = state.active_def();
    apply_kill_effects(def, &mut state.plane_states[state.active_plane], now);
}

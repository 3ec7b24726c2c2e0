//! Enemy spawn director
//!
//! At most one enemy per frame. Rarer archetypes are gated by level and by
//! how many of them are already alive.

use glam::Vec2;

use super::state::{EnemyArchetype, Entity, EntityKind, RunState};
use super::rng::RandomSource;
use crate::consts::*;

/// Live enemy ceiling for a level
pub fn population_cap(level: u32) -> usize {
    4 + level as usize
}

/// Pick an archetype for a uniform `roll` in `[0, 1)`
///
/// Checked from rarest to most common; the first gate that passes wins.
pub fn choose_archetype(roll: f32, level: u32, elite_count: usize, super_count: usize) -> EnemyArchetype {
    if level >= 4 && roll < 0.05 && super_count < 1 {
        EnemyArchetype::Super
    } else if level >= 3 && roll < 0.15 && elite_count < 3 {
        EnemyArchetype::Elite
    } else if level >= 2 && roll < 0.35 {
        EnemyArchetype::Kamikaze
    } else {
        EnemyArchetype::Grunt
    }
}

/// Spawn one enemy if the field has room; returns what was spawned
pub fn spawn_enemy(
    state: &mut RunState,
    now: f64,
    rng: &mut impl RandomSource,
) -> Option<EnemyArchetype> {
    let level = state.level;
    if state.enemies.len() >= population_cap(level) {
        return None;
    }

    let mults = state.difficulty.multipliers();
    let roll = rng.next_f32();
    let archetype = choose_archetype(
        roll,
        level,
        state.archetype_count(EnemyArchetype::Elite),
        state.archetype_count(EnemyArchetype::Super),
    );

    let jitter = rng.next_f32();
    let level_f = level as f32;
    let (health, speed_y) = match archetype {
        EnemyArchetype::Grunt => (
            (1.0 + level_f) * mults.enemy_health,
            (ENEMY_BASE_SPEED + jitter) * mults.enemy_speed,
        ),
        EnemyArchetype::Kamikaze => (1.0, ENEMY_BASE_SPEED * 2.2 * mults.enemy_speed),
        EnemyArchetype::Elite => (
            (6.0 + level_f) * mults.enemy_health,
            ENEMY_BASE_SPEED * 0.7 * mults.enemy_speed,
        ),
        EnemyArchetype::Super => (
            (12.0 + level_f) * mults.enemy_health,
            (ENEMY_BASE_SPEED + jitter) * mults.enemy_speed,
        ),
    };

    let size = archetype.size();
    let x = rng.next_f32() * (PLAY_WIDTH - size);
    let vel_x = (rng.next_f32() - 0.5) * 2.0;

    let id = state.next_entity_id();
    state.enemies.push(Entity {
        id,
        pos: Vec2::new(x, -size),
        size: Vec2::splat(size),
        vel: Vec2::new(vel_x, speed_y),
        health,
        max_health: health,
        kind: EntityKind::Enemy,
        archetype: Some(archetype),
        last_shot: now,
    });
    log::debug!("Spawned {:?} #{} at x={:.1} (level {})", archetype, id, x, level);

    Some(archetype)
}

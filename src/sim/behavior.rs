//! Per-craft trait mechanics for the active plane
//!
//! Everything here is driven by the optional capabilities on `PlaneDef`;
//! no craft is special-cased by id.

use glam::Vec2;

use super::planes::{PlaneDef, PlaneState};
use super::state::{ColorToken, Entity, EntityIds, Projectile, ProjectileOwner};
use crate::consts::SHOT_OFFSET_SCALE;

/// Heat level at which the lockout starts
const OVERHEAT_THRESHOLD: f32 = 1.0;
/// Heat never accumulates past this
const HEAT_CAP: f32 = 1.2;

/// Decay heat and report whether the overheat lockout is active
pub fn update_heat(def: &PlaneDef, state: &mut PlaneState, now: f64, dt: f32) -> bool {
    match def.overheat {
        Some(overheat) => {
            let overheated = state.overheat_until > now;
            if !overheated && state.heat > 0.0 {
                state.heat = (state.heat - overheat.decay_per_second * dt).max(0.0);
            }
        }
        None => {
            state.heat = 0.0;
            state.overheat_until = 0.0;
        }
    }
    state.overheat_until > now
}

/// Current movement speed in pixels per frame
pub fn move_speed(def: &PlaneDef, state: &PlaneState, now: f64, overheated: bool) -> f32 {
    let mut speed = def.speed;
    if let Some(boost) = def.speed_boost {
        if state.speed_boost_until > now {
            speed *= boost.mult;
        }
    }
    if let Some(overheat) = def.overheat {
        if overheated {
            speed *= overheat.slow_mult;
        }
    }
    speed
}

/// Fire the active craft if its cooldown and heat allow it
///
/// Returns one projectile per shot-spread entry, or nothing when locked out.
pub fn try_fire(
    def: &PlaneDef,
    state: &mut PlaneState,
    player: &mut Entity,
    now: f64,
    color: ColorToken,
    ids: &mut EntityIds,
) -> Vec<Projectile> {
    if state.overheat_until > now {
        return Vec::new();
    }
    if now - state.last_shot <= def.fire_rate {
        return Vec::new();
    }

    let muzzle_x = player.pos.x + player.size.x / 2.0;
    let pierce = def.pierce.map_or(0, |p| p.count);
    let spreads: &[f32] = if def.shot_spread.is_empty() {
        &[0.0]
    } else {
        def.shot_spread
    };

    let projectiles = spreads
        .iter()
        .map(|&spread| Projectile {
            id: ids.next_id(),
            pos: Vec2::new(muzzle_x + spread * SHOT_OFFSET_SCALE, player.pos.y),
            vel: Vec2::new(spread, -def.bullet_speed),
            damage: def.bullet_damage,
            owner: ProjectileOwner::Player,
            pierce,
            splash: def.splash,
            color,
        })
        .collect();

    state.last_shot = now;
    player.last_shot = now;

    if let Some(overheat) = def.overheat {
        state.heat = (state.heat + overheat.per_shot).min(HEAT_CAP);
        if state.heat >= OVERHEAT_THRESHOLD {
            state.overheat_until = now + overheat.duration * 1000.0;
            state.heat = OVERHEAT_THRESHOLD;
        }
    }

    projectiles
}

/// Reward a confirmed kill credited to the active craft
pub fn apply_kill_effects(def: &PlaneDef, state: &mut PlaneState, now: f64) {
    if let Some(boost) = def.speed_boost {
        state.speed_boost_until = now + boost.duration * 1000.0;
    }
}

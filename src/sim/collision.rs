//! Collision detection and damage resolution
//!
//! Entities are axis-aligned boxes anchored at their top-left corner;
//! projectiles are points.

use glam::Vec2;

use super::hooks::HudObserver;
use super::rng::RandomSource;
use super::scoring::enemy_killed;
use super::state::{Entity, ProjectileOwner, RunState};
use crate::consts::*;

/// Strict point-in-box test (points on the edge miss)
pub fn contains_point(entity: &Entity, point: Vec2) -> bool {
    point.x > entity.pos.x
        && point.x < entity.pos.x + entity.size.x
        && point.y > entity.pos.y
        && point.y < entity.pos.y + entity.size.y
}

/// Strict box-box overlap
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

/// True once a point is more than the margin outside the play field
pub fn out_of_bounds(pos: Vec2) -> bool {
    pos.x < -OUT_OF_BOUNDS_MARGIN
        || pos.x > PLAY_WIDTH + OUT_OF_BOUNDS_MARGIN
        || pos.y < -OUT_OF_BOUNDS_MARGIN
        || pos.y > PLAY_HEIGHT + OUT_OF_BOUNDS_MARGIN
}

/// Advance every projectile and apply its hits
///
/// Projectiles are visited back to front so removal never skips one.
/// A player projectile damages at most one enemy directly per frame, then
/// splashes around the impact point and either pierces or is consumed.
pub fn resolve_projectiles(
    state: &mut RunState,
    now: f64,
    rng: &mut impl RandomSource,
    hud: &mut impl HudObserver,
) {
    let damage_taken_mult = state.active_def().damage_taken_mult;

    let mut i = state.projectiles.len();
    while i > 0 {
        i -= 1;

        let projectile = &mut state.projectiles[i];
        projectile.pos += projectile.vel;
        if out_of_bounds(projectile.pos) {
            state.projectiles.swap_remove(i);
            continue;
        }

        let impact = projectile.pos;
        let damage = projectile.damage;
        let color = projectile.color;
        let splash = projectile.splash;
        let owner = projectile.owner;

        match owner {
            ProjectileOwner::Player => {
                let Some(hit) = state.enemies.iter().rposition(|e| contains_point(e, impact))
                else {
                    continue;
                };

                let target = &mut state.enemies[hit];
                target.health = (target.health - damage).max(0.0);
                let destroyed = target.health <= 0.0;
                state.spawn_particles(impact, color, rng);
                if destroyed {
                    let enemy = state.enemies.remove(hit);
                    enemy_killed(state, &enemy, now, rng, hud);
                }

                if let Some(splash) = splash {
                    let radius_sq = splash.radius * splash.radius;
                    let splash_damage = damage * splash.damage_mult;
                    let mut k = state.enemies.len();
                    while k > 0 {
                        k -= 1;
                        let other = &mut state.enemies[k];
                        let center = other.center();
                        if center.distance_squared(impact) > radius_sq {
                            continue;
                        }
                        other.health = (other.health - splash_damage).max(0.0);
                        let destroyed = other.health <= 0.0;
                        state.spawn_particles(center, color, rng);
                        if destroyed {
                            let enemy = state.enemies.remove(k);
                            enemy_killed(state, &enemy, now, rng, hud);
                        }
                    }
                }

                let projectile = &mut state.projectiles[i];
                if projectile.pierce > 0 {
                    projectile.pierce -= 1;
                } else {
                    state.projectiles.swap_remove(i);
                }
            }
            ProjectileOwner::Enemy => {
                if !contains_point(&state.player, impact) {
                    continue;
                }
                state.damage_player(damage * damage_taken_mult, hud);
                state.spawn_particles(impact, color, rng);
                state.projectiles.swap_remove(i);
            }
        }
    }
}

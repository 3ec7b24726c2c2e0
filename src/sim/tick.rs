//! Per-frame simulation step
//!
//! One call advances the run by one display frame. The host decides the
//! cadence and keeps calling while `step` returns true.

use std::collections::HashMap;

use glam::Vec2;

use super::behavior::{move_speed, try_fire, update_heat};
use super::collision::{overlaps, resolve_projectiles};
use super::hooks::{HudObserver, RenderSink};
use super::rng::RandomSource;
use super::spawn::spawn_enemy;
use super::state::{
    ColorToken, EnemyArchetype, Entity, Projectile, ProjectileOwner, RunState, RunStatus,
};
use crate::consts::*;

/// Held controls for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl TickInput {
    /// Map a key-held table (browser key names) onto controls
    pub fn from_held_keys(keys: &HashMap<String, bool>) -> Self {
        let held = |names: &[&str]| {
            names
                .iter()
                .any(|name| keys.get(*name).copied().unwrap_or(false))
        };
        Self {
            left: held(&["ArrowLeft", "a"]),
            right: held(&["ArrowRight", "d"]),
            up: held(&["ArrowUp", "w"]),
            down: held(&["ArrowDown", "s"]),
            fire: held(&[" ", "Enter"]),
        }
    }
}

/// Advance the run by one frame at timestamp `now` (ms)
///
/// Returns false without touching the state unless the run is playing.
/// Rendering happens last, after every mutation for the frame.
pub fn step(
    state: &mut RunState,
    input: &TickInput,
    now: f64,
    rng: &mut impl RandomSource,
    hud: &mut impl HudObserver,
    render: &mut impl RenderSink,
) -> bool {
    if state.status != RunStatus::Playing {
        return false;
    }

    let def = state.active_def();
    let active = state.active_plane;

    // Hitbox follows the active craft
    if state.player.size.x != def.size {
        state.player.recenter(def.size);
    }

    let prev = state.last_tick.unwrap_or(now);
    let dt = ((now - prev) / 1000.0).clamp(0.0, MAX_FRAME_DT) as f32;
    state.last_tick = Some(now);

    let overheated = update_heat(def, &mut state.plane_states[active], now, dt);
    let speed = move_speed(def, &state.plane_states[active], now, overheated);

    move_player(&mut state.player, input, speed);

    if input.fire {
        let fired = try_fire(
            def,
            &mut state.plane_states[active],
            &mut state.player,
            now,
            ColorToken::PlayerBullet,
            &mut state.ids,
        );
        state.projectiles.extend(fired);
    }

    resolve_projectiles(state, now, rng, hud);
    spawn_enemy(state, now, rng);
    update_enemies(state, now, rng, hud);
    update_particles(state);

    render.render(state);
    true
}

fn move_player(player: &mut Entity, input: &TickInput, speed: f32) {
    let mut delta = Vec2::ZERO;
    if input.left {
        delta.x -= speed;
    }
    if input.right {
        delta.x += speed;
    }
    if input.up {
        delta.y -= speed;
    }
    if input.down {
        delta.y += speed;
    }
    player.pos += delta;
    player.pos.x = player.pos.x.clamp(0.0, PLAY_WIDTH - player.size.x);
    player.pos.y = player.pos.y.clamp(0.0, PLAY_HEIGHT - player.size.y);
}

/// A shot pattern an enemy fires this frame
struct Volley {
    origin: Vec2,
    spread: &'static [f32],
    speed_y: f32,
    damage: f32,
    color: ColorToken,
}

/// Enemy AI, movement and contact damage
fn update_enemies(
    state: &mut RunState,
    now: f64,
    rng: &mut impl RandomSource,
    hud: &mut impl HudObserver,
) {
    let mults = state.difficulty.multipliers();
    let fire_scale = mults.enemy_fire as f64;
    let level = state.level;
    let contact_damage = CONTACT_DAMAGE * state.active_def().damage_taken_mult;

    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;

        let player_center = state.player.center();
        let enemy = &mut state.enemies[i];
        let Some(archetype) = enemy.archetype else {
            continue;
        };
        let origin = Vec2::new(enemy.pos.x + enemy.size.x / 2.0, enemy.pos.y + enemy.size.y);
        let mut volley = None;

        match archetype {
            EnemyArchetype::Kamikaze => {
                let dx = player_center.x - enemy.center().x;
                enemy.vel.x = dx * KAMIKAZE_STEERING * mults.enemy_speed;
                enemy.vel.y += KAMIKAZE_ACCEL * mults.enemy_speed;
            }
            EnemyArchetype::Super => {
                if enemy.pos.y > SUPER_HOLD_Y {
                    enemy.vel.y = 0.0;
                    if now - enemy.last_shot > SUPER_FIRE_RATE * fire_scale {
                        volley = Some(Volley {
                            origin,
                            spread: &SUPER_SPREAD,
                            speed_y: SUPER_SHOT_SPEED * mults.enemy_speed,
                            damage: SUPER_SHOT_DAMAGE,
                            color: archetype.color(),
                        });
                        enemy.last_shot = now;
                    }
                }
            }
            EnemyArchetype::Grunt | EnemyArchetype::Elite => {
                let interval = ENEMY_FIRE_RATE / (level as f64 * 0.1 + 1.0) * fire_scale;
                if now - enemy.last_shot > interval {
                    volley = Some(Volley {
                        origin,
                        spread: &[0.0],
                        speed_y: (ENEMY_SHOT_SPEED + level as f32 * 0.4) * mults.enemy_speed,
                        damage: ENEMY_SHOT_DAMAGE,
                        color: archetype.color(),
                    });
                    enemy.last_shot = now;
                }
            }
        }

        enemy.pos += enemy.vel;
        if enemy.pos.x <= 0.0 || enemy.pos.x >= PLAY_WIDTH - enemy.size.x {
            enemy.vel.x = -enemy.vel.x;
        }
        let escaped = enemy.pos.y > PLAY_HEIGHT;

        if let Some(volley) = volley {
            for &vx in volley.spread {
                let id = state.next_entity_id();
                state.projectiles.push(Projectile {
                    id,
                    pos: volley.origin,
                    vel: Vec2::new(vx, volley.speed_y),
                    damage: volley.damage,
                    owner: ProjectileOwner::Enemy,
                    pierce: 0,
                    splash: None,
                    color: volley.color,
                });
            }
        }

        if escaped {
            state.enemies.remove(i);
            continue;
        }

        if overlaps(&state.enemies[i], &state.player) {
            let enemy = state.enemies.remove(i);
            state.damage_player(contact_damage, hud);
            state.spawn_particles(enemy.center(), archetype.color(), rng);
        }
    }
}

/// Drift and fade cosmetic particles
fn update_particles(state: &mut RunState) {
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life -= PARTICLE_DECAY;
    }
    state.particles.retain(|p| p.life > 0.0);
}

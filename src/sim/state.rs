//! Run state and core simulation types
//!
//! Everything the frame step mutates lives in `RunState`. The host owns the
//! only instance and hands it to `step` once per frame.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::hooks::HudObserver;
use super::planes::{ENERGY_MAX, PlaneDef, PlaneId, PlaneStates, SplashTrait};
use super::rng::RandomSource;
use crate::consts::*;

/// Overall phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Home screen, waiting for the host to start a run
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Frozen until resumed
    Paused,
    /// Run ended
    GameOver,
}

/// Render color tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    Player,
    PlayerBullet,
    Grunt,
    Kamikaze,
    Elite,
    Super,
}

impl ColorToken {
    pub fn hex(&self) -> &'static str {
        match self {
            ColorToken::Player => "#38bdf8",
            ColorToken::PlayerBullet => "#0ea5e9",
            ColorToken::Grunt => "#2dd4bf",
            ColorToken::Kamikaze => "#fb923c",
            ColorToken::Elite => "#a78bfa",
            ColorToken::Super => "#f43f5e",
        }
    }
}

/// Enemy behavior subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyArchetype {
    Grunt,
    Kamikaze,
    Elite,
    Super,
}

impl EnemyArchetype {
    /// Score credited when destroyed
    pub fn score_value(self) -> u32 {
        match self {
            EnemyArchetype::Grunt | EnemyArchetype::Kamikaze => 100,
            EnemyArchetype::Elite => 400,
            EnemyArchetype::Super => 1000,
        }
    }

    /// Square hitbox edge length
    pub fn size(self) -> f32 {
        let scale = match self {
            EnemyArchetype::Grunt => 1.0,
            EnemyArchetype::Kamikaze => 0.9,
            EnemyArchetype::Elite => 1.8,
            EnemyArchetype::Super => 2.0,
        };
        ENEMY_SIZE * scale
    }

    /// Hull, bullet and explosion color
    pub fn color(self) -> ColorToken {
        match self {
            EnemyArchetype::Grunt => ColorToken::Grunt,
            EnemyArchetype::Kamikaze => ColorToken::Kamikaze,
            EnemyArchetype::Elite => ColorToken::Elite,
            EnemyArchetype::Super => ColorToken::Super,
        }
    }
}

/// Entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Player,
    Enemy,
}

/// The player craft or an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub kind: EntityKind,
    /// Set for enemies only
    pub archetype: Option<EnemyArchetype>,
    /// Timestamp (ms) of the last shot fired
    pub last_shot: f64,
}

impl Entity {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Resize around the current center
    pub fn recenter(&mut self, size: f32) {
        let center = self.center();
        self.size = Vec2::splat(size);
        self.pos = center - self.size / 2.0;
    }

    pub fn is_archetype(&self, archetype: EnemyArchetype) -> bool {
        self.archetype == Some(archetype)
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// A bullet in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub owner: ProjectileOwner,
    /// Extra hits this projectile survives
    pub pierce: u32,
    pub splash: Option<SplashTrait>,
    pub color: ColorToken,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases every frame
    pub life: f32,
    pub color: ColorToken,
}

/// Monotonic id allocator shared by every entity list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Reason a craft switch was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchError {
    NotPlaying { status: RunStatus },
    NotInLoadout { plane: PlaneId },
    NoSuchSlot { slot: usize },
    AlreadyActive { plane: PlaneId },
    EnergyNotFull { energy: u32 },
}

impl fmt::Display for SwitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPlaying { status } => write!(f, "cannot switch while {:?}", status),
            Self::NotInLoadout { plane } => write!(f, "{} is not in the loadout", plane),
            Self::NoSuchSlot { slot } => write!(f, "loadout has no slot {}", slot),
            Self::AlreadyActive { plane } => write!(f, "{} is already active", plane),
            Self::EnergyNotFull { energy } => {
                write!(f, "energy {}/{} is not full", energy, ENERGY_MAX)
            }
        }
    }
}

impl std::error::Error for SwitchError {}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// `score / 2000 + 1`
    pub level: u32,
    pub status: RunStatus,
    pub difficulty: Difficulty,
    pub loadout: [PlaneId; 3],
    pub active_plane: PlaneId,
    pub plane_states: PlaneStates,
    /// 0..=ENERGY_MAX
    pub energy: u32,
    /// Timestamp (ms) of the previous frame
    pub last_tick: Option<f64>,
    pub ids: EntityIds,
}

impl RunState {
    /// Start a run on the first craft of `loadout`
    pub fn new(difficulty: Difficulty, loadout: [PlaneId; 3]) -> Self {
        log::info!(
            "Run start: difficulty={}, loadout={}/{}/{}",
            difficulty,
            loadout[0],
            loadout[1],
            loadout[2]
        );
        Self::fresh(difficulty, loadout, RunStatus::Playing)
    }

    /// Return-to-home reset: same as a new run but parked on the start screen
    pub fn home(difficulty: Difficulty, loadout: [PlaneId; 3]) -> Self {
        Self::fresh(difficulty, loadout, RunStatus::Start)
    }

    fn fresh(difficulty: Difficulty, loadout: [PlaneId; 3], status: RunStatus) -> Self {
        let plane_states = PlaneStates::new(difficulty);
        let starter = loadout[0];
        let def = starter.def();
        let starter_state = &plane_states[starter];

        let player = Entity {
            id: 0,
            pos: Vec2::new(
                PLAY_WIDTH / 2.0 - def.size / 2.0,
                PLAY_HEIGHT - PLAYER_SPAWN_OFFSET,
            ),
            size: Vec2::splat(def.size),
            vel: Vec2::ZERO,
            health: starter_state.health,
            max_health: starter_state.max_health,
            kind: EntityKind::Player,
            archetype: None,
            last_shot: starter_state.last_shot,
        };

        Self {
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            level: 1,
            status,
            difficulty,
            loadout,
            active_plane: starter,
            plane_states,
            energy: 0,
            last_tick: None,
            ids: EntityIds::default(),
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next_id()
    }

    pub fn active_def(&self) -> &'static PlaneDef {
        self.active_plane.def()
    }

    pub fn archetype_count(&self, archetype: EnemyArchetype) -> usize {
        self.enemies
            .iter()
            .filter(|e| e.is_archetype(archetype))
            .count()
    }

    /// Toggle between playing and paused; other phases are left alone
    pub fn toggle_pause(&mut self, hud: &mut impl HudObserver) {
        let next = match self.status {
            RunStatus::Playing => RunStatus::Paused,
            RunStatus::Paused => RunStatus::Playing,
            _ => return,
        };
        self.status = next;
        hud.status_changed(next);
    }

    /// Apply damage to the player, ending the run when health reaches zero
    pub fn damage_player(&mut self, amount: f32, hud: &mut impl HudObserver) {
        let health = (self.player.health - amount).max(0.0);
        self.player.health = health;
        self.plane_states[self.active_plane].health = health;
        hud.health_changed(health, self.player.max_health);

        if health <= 0.0 && self.status != RunStatus::GameOver {
            log::info!("Game over: score={}, level={}", self.score, self.level);
            self.status = RunStatus::GameOver;
            hud.status_changed(RunStatus::GameOver);
        }
    }

    /// Emit a burst of cosmetic particles at `pos`
    pub fn spawn_particles(&mut self, pos: Vec2, color: ColorToken, rng: &mut impl RandomSource) {
        for _ in 0..PARTICLE_COUNT {
            let vel = Vec2::new(
                (rng.next_f32() - 0.5) * PARTICLE_JITTER,
                (rng.next_f32() - 0.5) * PARTICLE_JITTER,
            );
            let id = self.next_entity_id();
            self.particles.push(Particle {
                id,
                pos,
                vel,
                life: 1.0,
                color,
            });
        }
    }

    /// Switch the active craft to the one in loadout slot `slot`
    pub fn switch_to_slot(
        &mut self,
        slot: usize,
        hud: &mut impl HudObserver,
    ) -> Result<(), SwitchError> {
        let plane = *self
            .loadout
            .get(slot)
            .ok_or(SwitchError::NoSuchSlot { slot })?;
        self.switch_plane(plane, hud)
    }

    /// Swap the active craft, spending a full energy bar
    ///
    /// The outgoing craft's health and cooldown are stored in its
    /// `PlaneState`; the incoming craft resumes from its own stored state.
    pub fn switch_plane(
        &mut self,
        plane: PlaneId,
        hud: &mut impl HudObserver,
    ) -> Result<(), SwitchError> {
        if self.status != RunStatus::Playing {
            return Err(SwitchError::NotPlaying {
                status: self.status,
            });
        }
        if !self.loadout.contains(&plane) {
            return Err(SwitchError::NotInLoadout { plane });
        }
        if plane == self.active_plane {
            return Err(SwitchError::AlreadyActive { plane });
        }
        if self.energy < ENERGY_MAX {
            return Err(SwitchError::EnergyNotFull {
                energy: self.energy,
            });
        }

        let outgoing = &mut self.plane_states[self.active_plane];
        outgoing.health = self.player.health;
        outgoing.last_shot = self.player.last_shot;

        self.energy = 0;
        hud.energy_changed(self.energy);

        log::info!("Switching craft: {} -> {}", self.active_plane, plane);
        self.active_plane = plane;
        hud.active_plane_changed(plane);

        let incoming = &self.plane_states[plane];
        self.player.recenter(plane.def().size);
        self.player.health = incoming.health;
        self.player.max_health = incoming.max_health;
        self.player.last_shot = incoming.last_shot;
        hud.health_changed(self.player.health, self.player.max_health);

        Ok(())
    }

    /// Serialize the run for observers and debugging
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::planes::DEFAULT_LOADOUT;
    use crate::sim::rng::SequenceSource;

    #[derive(Default)]
    struct Recorder {
        energy: Vec<u32>,
        health: Vec<f32>,
        status: Vec<RunStatus>,
        planes: Vec<PlaneId>,
    }

    impl HudObserver for Recorder {
        fn energy_changed(&mut self, energy: u32) {
            self.energy.push(energy);
        }
        fn health_changed(&mut self, health: f32, _max_health: f32) {
            self.health.push(health);
        }
        fn status_changed(&mut self, status: RunStatus) {
            self.status.push(status);
        }
        fn active_plane_changed(&mut self, plane: PlaneId) {
            self.planes.push(plane);
        }
    }

    #[test]
    fn test_new_run_spawns_starter() {
        let state = RunState::new(Difficulty::Easy, DEFAULT_LOADOUT);
        assert_eq!(state.status, RunStatus::Playing);
        assert_eq!(state.active_plane, PlaneId::Vanguard);
        assert_eq!(state.player.size, Vec2::splat(40.0));
        assert_eq!(state.player.pos, Vec2::new(280.0, 700.0));
        assert_eq!(state.player.health, 180.0);
        assert_eq!(state.player.max_health, 180.0);
        assert_eq!(state.level, 1);
        assert_eq!(state.energy, 0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_home_reset_parks_on_start() {
        let state = RunState::home(Difficulty::Normal, DEFAULT_LOADOUT);
        assert_eq!(state.status, RunStatus::Start);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = RunState::new(Difficulty::Normal, DEFAULT_LOADOUT);
        let mut hud = Recorder::default();
        state.toggle_pause(&mut hud);
        assert_eq!(state.status, RunStatus::Paused);
        state.toggle_pause(&mut hud);
        assert_eq!(state.status, RunStatus::Playing);

        state.status = RunStatus::GameOver;
        state.toggle_pause(&mut hud);
        assert_eq!(state.status, RunStatus::GameOver);
        assert_eq!(hud.status, vec![RunStatus::Paused, RunStatus::Playing]);
    }

    #[test]
    fn test_switch_requires_full_energy() {
        let mut state = RunState::new(Difficulty::Normal, DEFAULT_LOADOUT);
        let mut hud = Recorder::default();
        state.energy = ENERGY_MAX - 1;
        assert_eq!(
            state.switch_plane(PlaneId::Aegis, &mut hud),
            Err(SwitchError::EnergyNotFull { energy: 9 })
        );
        assert_eq!(state.active_plane, PlaneId::Vanguard);
        assert_eq!(state.energy, ENERGY_MAX - 1);
    }

    #[test]
    fn test_switch_rejections() {
        let mut state = RunState::new(Difficulty::Normal, DEFAULT_LOADOUT);
        let mut hud = Recorder::default();
        state.energy = ENERGY_MAX;

        assert_eq!(
            state.switch_plane(PlaneId::Nova, &mut hud),
            Err(SwitchError::NotInLoadout { plane: PlaneId::Nova })
        );
        assert_eq!(
            state.switch_plane(PlaneId::Vanguard, &mut hud),
            Err(SwitchError::AlreadyActive {
                plane: PlaneId::Vanguard
            })
        );
        assert_eq!(
            state.switch_to_slot(3, &mut hud),
            Err(SwitchError::NoSuchSlot { slot: 3 })
        );

        state.status = RunStatus::Paused;
        assert_eq!(
            state.switch_plane(PlaneId::Aegis, &mut hud),
            Err(SwitchError::NotPlaying {
                status: RunStatus::Paused
            })
        );
        assert_eq!(state.energy, ENERGY_MAX);
    }

    #[test]
    fn test_switch_preserves_outgoing_health() {
        let mut state = RunState::new(Difficulty::Normal, DEFAULT_LOADOUT);
        let mut hud = Recorder::default();
        state.player.health = 57.5;
        state.player.last_shot = 1234.0;
        state.energy = ENERGY_MAX;
        let center = state.player.center();

        state.switch_to_slot(2, &mut hud).unwrap();

        assert_eq!(state.active_plane, PlaneId::Aegis);
        assert_eq!(state.energy, 0);
        assert_eq!(state.plane_states[PlaneId::Vanguard].health, 57.5);
        assert_eq!(state.plane_states[PlaneId::Vanguard].last_shot, 1234.0);
        assert_eq!(state.player.health, 190.0);
        assert_eq!(state.player.max_health, 190.0);
        assert_eq!(state.player.size, Vec2::splat(44.0));
        assert_eq!(state.player.center(), center);
        assert_eq!(hud.energy, vec![0]);
        assert_eq!(hud.planes, vec![PlaneId::Aegis]);

        // Switching back restores the stored health
        state.energy = ENERGY_MAX;
        state.switch_plane(PlaneId::Vanguard, &mut hud).unwrap();
        assert_eq!(state.player.health, 57.5);
        assert_eq!(state.player.last_shot, 1234.0);
    }

    #[test]
    fn test_damage_player_clamps_and_ends_run() {
        let mut state = RunState::new(Difficulty::Normal, DEFAULT_LOADOUT);
        let mut hud = Recorder::default();
        state.player.health = 20.0;
        state.damage_player(31.25, &mut hud);
        assert_eq!(state.player.health, 0.0);
        assert_eq!(state.plane_states[PlaneId::Vanguard].health, 0.0);
        assert_eq!(state.status, RunStatus::GameOver);
        assert_eq!(hud.status, vec![RunStatus::GameOver]);

        // Further hits do not re-announce game over
        state.damage_player(5.0, &mut hud);
        assert_eq!(hud.status.len(), 1);
    }

    #[test]
    fn test_particle_burst() {
        let mut state = RunState::new(Difficulty::Normal, DEFAULT_LOADOUT);
        let mut rng = SequenceSource::constant(1.0);
        state.spawn_particles(Vec2::new(10.0, 20.0), ColorToken::Elite, &mut rng);
        assert_eq!(state.particles.len(), PARTICLE_COUNT);
        for p in &state.particles {
            assert_eq!(p.vel, Vec2::new(4.0, 4.0));
            assert_eq!(p.life, 1.0);
            assert_eq!(p.color, ColorToken::Elite);
        }
    }

    #[test]
    fn test_color_tokens_map_to_hex() {
        assert_eq!(ColorToken::Player.hex(), "#38bdf8");
        assert_eq!(ColorToken::PlayerBullet.hex(), "#0ea5e9");
        assert_eq!(EnemyArchetype::Grunt.color().hex(), "#2dd4bf");
        assert_eq!(EnemyArchetype::Kamikaze.color().hex(), "#fb923c");
        assert_eq!(EnemyArchetype::Elite.color().hex(), "#a78bfa");
        assert_eq!(EnemyArchetype::Super.color().hex(), "#f43f5e");
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = RunState::new(Difficulty::Hard, DEFAULT_LOADOUT);
        let json = state.snapshot_json().unwrap();
        assert!(json.contains("\"status\":\"playing\""));
        assert!(json.contains("\"difficulty\":\"hard\""));
        let back: RunState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.player, state.player);
    }
}

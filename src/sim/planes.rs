//! Playable craft catalog and per-craft runtime state
//!
//! Every craft shares a common set of base stats. Special mechanics are
//! optional capabilities attached to a definition, so "does this plane
//! overheat?" is answered by `def.overheat.is_some()`.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;

/// Energy cells required before the active craft can be switched
pub const ENERGY_MAX: u32 = 10;

/// Identifier of a playable craft
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PlaneId {
    Vanguard,
    Strider,
    Tempest,
    Aegis,
    Nova,
    Specter,
}

/// Loadout used when the host has no complete selection
pub const DEFAULT_LOADOUT: [PlaneId; 3] = [PlaneId::Vanguard, PlaneId::Tempest, PlaneId::Aegis];

impl PlaneId {
    pub const ALL: [PlaneId; 6] = [
        PlaneId::Vanguard,
        PlaneId::Strider,
        PlaneId::Tempest,
        PlaneId::Aegis,
        PlaneId::Nova,
        PlaneId::Specter,
    ];

    /// Static definition for this craft
    pub fn def(self) -> &'static PlaneDef {
        &PLANE_DEFS[self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaneId::Vanguard => "vanguard",
            PlaneId::Strider => "strider",
            PlaneId::Tempest => "tempest",
            PlaneId::Aegis => "aegis",
            PlaneId::Nova => "nova",
            PlaneId::Specter => "specter",
        }
    }
}

impl fmt::Display for PlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaneId {
    type Err = UnknownPlane;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.to_lowercase();
        PlaneId::ALL
            .into_iter()
            .find(|id| id.as_str() == tag)
            .ok_or_else(|| UnknownPlane(s.to_string()))
    }
}

/// Tag that does not name a craft in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlane(pub String);

impl fmt::Display for UnknownPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown plane id '{}'", self.0)
    }
}

impl std::error::Error for UnknownPlane {}

/// Area damage around a projectile's impact point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplashTrait {
    pub radius: f32,
    /// Fraction of the direct-hit damage dealt to each enemy in range
    pub damage_mult: f32,
}

/// Projectiles survive this many extra hits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PierceTrait {
    pub count: u32,
}

/// Heat builds per shot; crossing 1.0 locks firing and slows movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverheatTrait {
    pub per_shot: f32,
    pub decay_per_second: f32,
    /// Lockout length in seconds
    pub duration: f64,
    pub slow_mult: f32,
}

/// Temporary move-speed bonus granted on each kill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBoostTrait {
    pub mult: f32,
    /// Boost length in seconds
    pub duration: f64,
}

/// Immutable definition of a playable craft
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneDef {
    pub id: PlaneId,
    pub name: &'static str,
    pub role: &'static str,
    pub trait_blurb: &'static str,
    pub max_health: f32,
    /// Square hitbox edge length
    pub size: f32,
    /// Pixels per frame
    pub speed: f32,
    /// Minimum milliseconds between shots
    pub fire_rate: f64,
    pub bullet_speed: f32,
    pub bullet_damage: f32,
    /// One projectile per entry; the value is its lateral offset and x velocity
    pub shot_spread: &'static [f32],
    pub damage_taken_mult: f32,
    pub splash: Option<SplashTrait>,
    pub pierce: Option<PierceTrait>,
    pub overheat: Option<OverheatTrait>,
    pub speed_boost: Option<SpeedBoostTrait>,
}

/// The catalog, in `PlaneId` declaration order
pub static PLANE_DEFS: [PlaneDef; 6] = [
    PlaneDef {
        id: PlaneId::Vanguard,
        name: "Vanguard",
        role: "Balanced frontline fighter",
        trait_blurb: "Stable output and reliable handling.",
        max_health: 120.0,
        size: 40.0,
        speed: 6.0,
        fire_rate: 210.0,
        bullet_speed: 10.5,
        bullet_damage: 1.0,
        shot_spread: &[0.0],
        damage_taken_mult: 1.0,
        splash: None,
        pierce: None,
        overheat: None,
        speed_boost: None,
    },
    PlaneDef {
        id: PlaneId::Strider,
        name: "Strider",
        role: "High-speed interceptor",
        trait_blurb: "Dual shots; kills trigger a short speed boost.",
        max_health: 85.0,
        size: 36.0,
        speed: 7.9,
        fire_rate: 200.0,
        bullet_speed: 12.0,
        bullet_damage: 0.55,
        shot_spread: &[-0.6, 0.6],
        damage_taken_mult: 1.2,
        splash: None,
        pierce: None,
        overheat: None,
        speed_boost: Some(SpeedBoostTrait {
            mult: 1.35,
            duration: 1.6,
        }),
    },
    PlaneDef {
        id: PlaneId::Tempest,
        name: "Tempest",
        role: "Rapid-fire skirmisher",
        trait_blurb: "Sustained fire causes overheat.",
        max_health: 100.0,
        size: 38.0,
        speed: 6.4,
        fire_rate: 135.0,
        bullet_speed: 10.5,
        bullet_damage: 0.7,
        shot_spread: &[0.0],
        damage_taken_mult: 1.0,
        splash: None,
        pierce: None,
        overheat: Some(OverheatTrait {
            per_shot: 0.2,
            decay_per_second: 0.5,
            duration: 2.0,
            slow_mult: 0.55,
        }),
        speed_boost: None,
    },
    PlaneDef {
        id: PlaneId::Aegis,
        name: "Aegis",
        role: "Heavy armor bulwark",
        trait_blurb: "Takes reduced damage.",
        max_health: 190.0,
        size: 44.0,
        speed: 4.2,
        fire_rate: 300.0,
        bullet_speed: 9.0,
        bullet_damage: 1.5,
        shot_spread: &[0.0],
        damage_taken_mult: 0.65,
        splash: None,
        pierce: None,
        overheat: None,
        speed_boost: None,
    },
    PlaneDef {
        id: PlaneId::Nova,
        name: "Nova",
        role: "High-damage artillery",
        trait_blurb: "Shells splash nearby targets.",
        max_health: 110.0,
        size: 42.0,
        speed: 5.0,
        fire_rate: 420.0,
        bullet_speed: 9.5,
        bullet_damage: 2.7,
        shot_spread: &[0.0],
        damage_taken_mult: 1.0,
        splash: Some(SplashTrait {
            radius: 60.0,
            damage_mult: 0.65,
        }),
        pierce: None,
        overheat: None,
        speed_boost: None,
    },
    PlaneDef {
        id: PlaneId::Specter,
        name: "Specter",
        role: "Long-range striker",
        trait_blurb: "Piercing shots, fragile hull.",
        max_health: 80.0,
        size: 36.0,
        speed: 6.9,
        fire_rate: 300.0,
        bullet_speed: 15.0,
        bullet_damage: 1.25,
        shot_spread: &[0.0],
        damage_taken_mult: 1.25,
        splash: None,
        pierce: Some(PierceTrait { count: 2 }),
        overheat: None,
        speed_boost: None,
    },
];

/// Mutable per-craft state, kept for every craft so switching preserves it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneState {
    pub health: f32,
    pub max_health: f32,
    /// Timestamp (ms) of the last shot fired by this craft
    pub last_shot: f64,
    pub heat: f32,
    pub overheat_until: f64,
    pub speed_boost_until: f64,
}

impl PlaneState {
    /// Fresh state for `def` with health scaled by the difficulty tier
    pub fn new(def: &PlaneDef, difficulty: Difficulty) -> Self {
        let scale = difficulty.multipliers().player_base_health / 100.0;
        let max_health = (def.max_health * scale).round();
        Self {
            health: max_health,
            max_health,
            last_shot: 0.0,
            heat: 0.0,
            overheat_until: 0.0,
            speed_boost_until: 0.0,
        }
    }
}

/// State for every craft in the catalog, indexed by `PlaneId`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneStates([PlaneState; 6]);

impl PlaneStates {
    /// Fresh states for the whole catalog at the given difficulty
    pub fn new(difficulty: Difficulty) -> Self {
        Self(PlaneId::ALL.map(|id| PlaneState::new(id.def(), difficulty)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlaneId, &PlaneState)> {
        PlaneId::ALL.into_iter().zip(self.0.iter())
    }
}

impl Index<PlaneId> for PlaneStates {
    type Output = PlaneState;

    fn index(&self, id: PlaneId) -> &PlaneState {
        &self.0[id as usize]
    }
}

impl IndexMut<PlaneId> for PlaneStates {
    fn index_mut(&mut self, id: PlaneId) -> &mut PlaneState {
        &mut self.0[id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_ids() {
        for id in PlaneId::ALL {
            assert_eq!(id.def().id, id);
        }
    }

    #[test]
    fn test_trait_capabilities() {
        assert!(PlaneId::Tempest.def().overheat.is_some());
        assert!(PlaneId::Nova.def().splash.is_some());
        assert_eq!(PlaneId::Specter.def().pierce, Some(PierceTrait { count: 2 }));
        assert!(PlaneId::Strider.def().speed_boost.is_some());
        assert_eq!(PlaneId::Strider.def().shot_spread.len(), 2);

        let vanguard = PlaneId::Vanguard.def();
        assert!(vanguard.splash.is_none());
        assert!(vanguard.pierce.is_none());
        assert!(vanguard.overheat.is_none());
        assert!(vanguard.speed_boost.is_none());
    }

    #[test]
    fn test_states_scale_with_difficulty() {
        let easy = PlaneStates::new(Difficulty::Easy);
        let normal = PlaneStates::new(Difficulty::Normal);
        let hard = PlaneStates::new(Difficulty::Hard);

        assert_eq!(easy.iter().count(), PlaneId::ALL.len());
        assert_eq!(normal[PlaneId::Vanguard].max_health, 120.0);
        assert_eq!(easy[PlaneId::Vanguard].max_health, 180.0);
        assert_eq!(hard[PlaneId::Vanguard].max_health, 96.0);
        // 85 * 1.5 = 127.5 rounds up
        assert_eq!(easy[PlaneId::Strider].max_health, 128.0);

        for (_, state) in hard.iter() {
            assert_eq!(state.health, state.max_health);
            assert_eq!(state.last_shot, 0.0);
            assert_eq!(state.heat, 0.0);
            assert_eq!(state.overheat_until, 0.0);
            assert_eq!(state.speed_boost_until, 0.0);
        }
    }

    #[test]
    fn test_parse_plane_id() {
        assert_eq!("nova".parse::<PlaneId>(), Ok(PlaneId::Nova));
        assert_eq!("Specter".parse::<PlaneId>(), Ok(PlaneId::Specter));
        assert!("phantom".parse::<PlaneId>().is_err());
    }
}

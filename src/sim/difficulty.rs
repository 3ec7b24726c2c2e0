//! Difficulty tiers and the multiplier bundle each one implies

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Difficulty tier selected before a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Scaling applied to enemies and to the player's starting health
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyMultipliers {
    /// Enemy health scale
    pub enemy_health: f32,
    /// Enemy fire interval scale (larger = slower fire)
    pub enemy_fire: f32,
    /// Enemy movement and bullet speed scale
    pub enemy_speed: f32,
    /// Player starting health, as a percentage of each plane's base health
    pub player_base_health: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn multipliers(self) -> DifficultyMultipliers {
        let (enemy_health, enemy_fire, enemy_speed, player_base_health) = match self {
            Difficulty::Easy => (0.7, 1.5, 0.8, 150.0),
            Difficulty::Normal => (1.0, 1.0, 1.0, 100.0),
            Difficulty::Hard => (1.3, 0.8, 1.2, 80.0),
        };
        DifficultyMultipliers {
            enemy_health,
            enemy_fire,
            enemy_speed,
            player_base_health,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// Tag that does not name a difficulty tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty tier '{}'", self.0)
    }
}

impl std::error::Error for UnknownDifficulty {}

//! Run configuration chosen in the hangar before launch
//!
//! Serialized as JSON so hosts can keep it wherever they like.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::briefing::Language;
use crate::sim::{DEFAULT_LOADOUT, Difficulty, PlaneId};

/// Number of craft a run carries
pub const LOADOUT_SIZE: usize = 3;

/// Why a configuration cannot start a run
#[derive(Debug)]
pub enum SettingsError {
    Json(serde_json::Error),
    LoadoutSize { selected: usize },
    DuplicatePlane { plane: PlaneId },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Json(err) => write!(f, "malformed settings: {err}"),
            SettingsError::LoadoutSize { selected } => {
                write!(f, "loadout needs exactly {LOADOUT_SIZE} craft, {selected} selected")
            }
            SettingsError::DuplicatePlane { plane } => {
                write!(f, "craft '{plane}' selected more than once")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Json(err)
    }
}

/// Validated configuration handed to the simulation at run start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub difficulty: Difficulty,
    pub loadout: [PlaneId; LOADOUT_SIZE],
    pub language: Language,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            loadout: DEFAULT_LOADOUT,
            language: Language::default(),
        }
    }
}

/// Hangar selections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Presentation only; forwarded to the briefing collaborator
    pub language: Language,
    /// Selected craft in pick order (0 to 3 entries)
    pub loadout: Vec<PlaneId>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            language: Language::default(),
            loadout: DEFAULT_LOADOUT.to_vec(),
        }
    }
}

impl Settings {
    /// Select or deselect a craft
    ///
    /// Deselects when already chosen; otherwise appends while fewer than
    /// three are chosen. Returns whether the selection changed.
    pub fn toggle_plane(&mut self, plane: PlaneId) -> bool {
        if let Some(idx) = self.loadout.iter().position(|&p| p == plane) {
            self.loadout.remove(idx);
            return true;
        }
        if self.loadout.len() < LOADOUT_SIZE {
            self.loadout.push(plane);
            return true;
        }
        false
    }

    /// Whether the launch button should be enabled
    pub fn can_start(&self) -> bool {
        self.loadout.len() == LOADOUT_SIZE
    }

    /// Validate the selection for a run start
    pub fn run_config(&self) -> Result<RunConfig, SettingsError> {
        let loadout: [PlaneId; LOADOUT_SIZE] =
            self.loadout
                .as_slice()
                .try_into()
                .map_err(|_| SettingsError::LoadoutSize {
                    selected: self.loadout.len(),
                })?;
        for (i, plane) in loadout.iter().enumerate() {
            if loadout[..i].contains(plane) {
                return Err(SettingsError::DuplicatePlane { plane: *plane });
            }
        }
        Ok(RunConfig {
            difficulty: self.difficulty,
            loadout,
            language: self.language,
        })
    }

    /// Configuration for a return to the home screen
    ///
    /// An incomplete or invalid selection falls back to the default loadout.
    pub fn home_config(&self) -> RunConfig {
        match self.run_config() {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using default loadout");
                RunConfig {
                    difficulty: self.difficulty,
                    loadout: DEFAULT_LOADOUT,
                    language: self.language,
                }
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load stored settings, falling back to defaults when absent or malformed
    pub fn load_or_default(stored: Option<&str>) -> Self {
        match stored.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Some(Err(err)) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_can_start() {
        let settings = Settings::default();
        assert!(settings.can_start());
        let config = settings.run_config().unwrap();
        assert_eq!(config.loadout, DEFAULT_LOADOUT);
        assert_eq!(config.difficulty, Difficulty::Normal);
        assert_eq!(config.language, Language::Zh);
    }

    #[test]
    fn test_toggle_plane() {
        let mut settings = Settings::default();
        // Full hangar refuses a fourth craft
        assert!(!settings.toggle_plane(PlaneId::Nova));
        assert_eq!(settings.loadout.len(), 3);

        assert!(settings.toggle_plane(PlaneId::Tempest));
        assert_eq!(settings.loadout, vec![PlaneId::Vanguard, PlaneId::Aegis]);
        assert!(!settings.can_start());

        assert!(settings.toggle_plane(PlaneId::Nova));
        assert_eq!(
            settings.loadout,
            vec![PlaneId::Vanguard, PlaneId::Aegis, PlaneId::Nova]
        );
        assert!(settings.can_start());
    }

    #[test]
    fn test_run_config_rejects_short_loadout() {
        let settings = Settings {
            loadout: vec![PlaneId::Nova],
            ..Settings::default()
        };
        assert!(matches!(
            settings.run_config(),
            Err(SettingsError::LoadoutSize { selected: 1 })
        ));
    }

    #[test]
    fn test_run_config_rejects_duplicates() {
        let settings = Settings {
            loadout: vec![PlaneId::Nova, PlaneId::Aegis, PlaneId::Nova],
            ..Settings::default()
        };
        assert!(matches!(
            settings.run_config(),
            Err(SettingsError::DuplicatePlane {
                plane: PlaneId::Nova
            })
        ));
    }

    #[test]
    fn test_home_config_falls_back() {
        let settings = Settings {
            difficulty: Difficulty::Hard,
            language: Language::En,
            loadout: vec![PlaneId::Specter],
        };
        let config = settings.home_config();
        assert_eq!(config.loadout, DEFAULT_LOADOUT);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.language, Language::En);
    }

    #[test]
    fn test_json_tags() {
        let json = r#"{"difficulty":"hard","language":"en","loadout":["specter","nova","strider"]}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.language, Language::En);
        assert_eq!(
            settings.loadout,
            vec![PlaneId::Specter, PlaneId::Nova, PlaneId::Strider]
        );

        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"difficulty":"easy"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.loadout, DEFAULT_LOADOUT.to_vec());
    }

    #[test]
    fn test_unknown_tags_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{"difficulty":"nightmare"}"#),
            Err(SettingsError::Json(_))
        ));
        assert!(Settings::from_json(r#"{"loadout":["zeppelin"]}"#).is_err());
        assert_eq!(Settings::load_or_default(Some("not json")), Settings::default());
        assert_eq!(Settings::load_or_default(None), Settings::default());
    }
}

//! Game settings and tuning
//!
//! Loaded from a JSON file; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_WIDTH, FINAL_LEVEL, STARTING_LIVES};
use crate::error::SettingsError;

/// Lane generation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneTuning {
    /// Base speed range (px per tick) before the level bias
    pub min_speed: i32,
    pub max_speed: i32,
    /// Speed added per level
    pub level_speed_factor: f32,
    /// Base obstacles per row before adding the level number
    pub min_count: u32,
    pub max_count: u32,
    /// Constant added to every inter-obstacle gap
    pub spacing_bias: f32,
}

impl Default for LaneTuning {
    fn default() -> Self {
        Self {
            min_speed: -5,
            max_speed: 5,
            level_speed_factor: 0.5,
            min_count: 1,
            max_count: 2,
            spacing_bias: 60.0,
        }
    }
}

/// Session rules and tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lives at the start of every run
    pub starting_lives: u32,
    /// Clearing this level completes the game
    pub final_level: u32,
    /// Fixed run seed (random when absent)
    pub seed: Option<u64>,
    /// Constant rightward push on the actor
    pub drift_enabled: bool,
    pub lanes: LaneTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            final_level: FINAL_LEVEL,
            seed: None,
            drift_enabled: true,
            lanes: LaneTuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Read settings, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.starting_lives == 0 {
            return Err(SettingsError::Invalid(
                "starting_lives must be at least 1".into(),
            ));
        }
        if self.final_level == 0 {
            return Err(SettingsError::Invalid("final_level must be at least 1".into()));
        }
        let lanes = &self.lanes;
        if lanes.min_speed > lanes.max_speed {
            return Err(SettingsError::Invalid(format!(
                "lanes.min_speed ({}) exceeds lanes.max_speed ({})",
                lanes.min_speed, lanes.max_speed
            )));
        }
        if lanes.min_count > lanes.max_count {
            return Err(SettingsError::Invalid(format!(
                "lanes.min_count ({}) exceeds lanes.max_count ({})",
                lanes.min_count, lanes.max_count
            )));
        }
        if lanes.level_speed_factor < 0.0 {
            return Err(SettingsError::Invalid(
                "lanes.level_speed_factor must not be negative".into(),
            ));
        }
        if !(0.0..=CANVAS_WIDTH).contains(&lanes.spacing_bias) {
            return Err(SettingsError::Invalid(format!(
                "lanes.spacing_bias must be between 0 and {CANVAS_WIDTH}"
            )));
        }
        Ok(())
    }
}

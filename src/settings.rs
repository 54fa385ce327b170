//! Game settings and preferences
//!
//! Stored as JSON next to the binary (or wherever the host points). Missing
//! fields fall back to their defaults, so partial files are fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield and physics balance
    pub tuning: Tuning,
    /// Seed for obstacle placement (same seed, same run)
    pub seed: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            seed: 0x5EED_F1A9,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        self.validate()?;
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let volumes = [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("music_volume", self.music_volume),
        ];
        for (field, value) in volumes {
            if !value.is_finite() {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a number",
                });
            }
        }
        self.tuning.validate()
    }
}

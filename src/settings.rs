//! Session settings
//!
//! Loaded from a JSON file by the native driver. Every field has a default, so
//! a partial file (or none at all) is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

/// Tuning for the scripted demo player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotSettings {
    /// Jump when a ground hazard's left edge is this close
    pub jump_distance: f32,
    /// Duck when a flying monster is this close
    pub duck_distance: f32,
    /// Throw at a monster or bin whose left edge is within this range
    pub throw_distance: f32,
    /// Minimum ticks between throws
    pub throw_cooldown_ticks: u32,
}

impl Default for AutopilotSettings {
    fn default() -> Self {
        Self {
            jump_distance: 110.0,
            duck_distance: 140.0,
            throw_distance: 260.0,
            throw_cooldown_ticks: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Fixed seed for a reproducible session; random when absent
    pub seed: Option<u64>,
    pub autopilot: AutopilotSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            seed: None,
            autopilot: AutopilotSettings::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        check_viewport(self.screen_width, self.screen_height)
    }
}

/// Both viewport dimensions must be positive
pub fn check_viewport(width: f32, height: f32) -> Result<(), SettingsError> {
    // Written to reject NaN as well
    if !(width > 0.0 && height > 0.0) {
        return Err(SettingsError::InvalidViewport { width, height });
    }
    Ok(())
}

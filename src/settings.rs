//! Cabinet settings
//!
//! Screen geometry and run seed, passed explicitly into the simulation and
//! the I/O layers instead of living in process-wide globals.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::REFERENCE_WIDTH;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid screen dimensions {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },
}

/// Cabinet settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen width in pixels (toroidal x extent)
    pub screen_width: f32,
    /// Screen height in pixels (toroidal y extent)
    pub screen_height: f32,
    /// RNG seed for obstacle placement and shapes
    pub seed: u64,
    /// Serial device the controller board is attached to
    pub input_device: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            seed: 0x5EED_A57E,
            input_device: "/dev/ttyUSB0".to_string(),
        }
    }
}

impl Settings {
    /// Settings for a given screen size, defaults elsewhere
    pub fn with_screen(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
    }

    /// Screen size as a vector
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Layout scale relative to the reference cabinet (never above 1.0)
    pub fn scale_factor(&self) -> f32 {
        (self.screen_width / REFERENCE_WIDTH).min(1.0)
    }

    /// Reject sizes the toroidal wrap cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.screen_width) && ok(self.screen_height) {
            Ok(())
        } else {
            Err(SettingsError::InvalidDimensions {
                width: self.screen_width,
                height: self.screen_height,
            })
        }
    }

    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
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

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

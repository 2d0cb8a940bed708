//! Game tuning
//!
//! Loaded from a JSON blob supplied by the host page. Missing fields fall back
//! to the built-in defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::difficulty::{DifficultyError, DifficultyTable};

/// Why a settings blob was rejected
#[derive(Debug)]
pub enum SettingsError {
    /// Not valid JSON for `Settings`
    Parse(serde_json::Error),
    /// Difficulty bands leave some levels uncovered
    Difficulty(DifficultyError),
    /// Padding or button size is negative or not finite
    InvalidGeometry(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
            SettingsError::Difficulty(e) => write!(f, "invalid difficulty table: {}", e),
            SettingsError::InvalidGeometry(field) => write!(f, "invalid {}", field),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Difficulty(e) => Some(e),
            SettingsError::InvalidGeometry(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<DifficultyError> for SettingsError {
    fn from(e: DifficultyError) -> Self {
        SettingsError::Difficulty(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gap between the button and the container edges (px)
    pub padding: f32,
    /// Hit → next level delay (ms)
    pub level_advance_delay_ms: u64,
    /// Miss flash duration (ms)
    pub miss_feedback_ms: u64,
    /// Button size assumed before the host measures it (px)
    pub default_button_width: f32,
    pub default_button_height: f32,
    /// Level → movement tuning
    pub difficulty: DifficultyTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            padding: PADDING,
            level_advance_delay_ms: LEVEL_ADVANCE_DELAY_MS,
            miss_feedback_ms: MISS_FEEDBACK_MS,
            default_button_width: DEFAULT_BUTTON_WIDTH,
            default_button_height: DEFAULT_BUTTON_HEIGHT,
            difficulty: DifficultyTable::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings (padding {}px)", settings.padding);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(SettingsError::InvalidGeometry("padding"));
        }
        let sizes = [self.default_button_width, self.default_button_height];
        if sizes.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(SettingsError::InvalidGeometry("default button size"));
        }
        self.difficulty.validate()?;
        Ok(())
    }

    /// Default button size as (width, height)
    pub fn default_button_size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.default_button_width, self.default_button_height)
    }
}

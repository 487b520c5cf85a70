//! Picker configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default edge length of the square widget, in pixels.
pub const DEFAULT_SIZE: u32 = 200;
/// Default number of wheel sectors (one per degree).
pub const DEFAULT_SECTORS: u32 = 360;
/// Upper bound on sectors; finer wheels are indistinguishable on screen.
pub const MAX_SECTORS: u32 = 3600;

/// Errors raised when a configuration cannot produce a usable picker.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Picker size must be at least 1 pixel")]
    ZeroSize,
    #[error("Picker needs at least one sector")]
    ZeroSectors,
    #[error("Too many sectors: {0} (max {MAX_SECTORS})")]
    TooManySectors(u32),
    #[error("Invalid picker config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static configuration of one picker instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    /// Edge length of the square surface, in pixels.
    pub size: u32,
    /// Number of equal wedges drawn in the wheel.
    pub number_of_sectors: u32,
    /// Style hook forwarded to renderers (SVG `class`, egui id salt).
    pub class_name: Option<String>,
    /// Whether to draw the selected color in a swatch at the center.
    pub center_rect: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            number_of_sectors: DEFAULT_SECTORS,
            class_name: None,
            center_rect: false,
        }
    }
}

impl PickerConfig {
    /// Create a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edge length.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the number of sectors.
    pub fn with_sectors(mut self, number_of_sectors: u32) -> Self {
        self.number_of_sectors = number_of_sectors;
        self
    }

    /// Set the style hook.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Enable or disable the center swatch.
    pub fn with_center_rect(mut self, center_rect: bool) -> Self {
        self.center_rect = center_rect;
        self
    }

    /// Reject configurations that cannot be laid out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.number_of_sectors == 0 {
            return Err(ConfigError::ZeroSectors);
        }
        if self.number_of_sectors > MAX_SECTORS {
            return Err(ConfigError::TooManySectors(self.number_of_sectors));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

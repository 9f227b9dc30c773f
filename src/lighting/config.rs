//! Streaming configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::core::error::Error;

/// Tunables for the light streaming pipeline.
///
/// `cell_size` must be a power-of-two whole number of world units so the
/// observer movement check stays a per-axis shift.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Coarse cell edge length in world units.
    pub cell_size: f32,
    /// Global multiplier applied to every streamed light's color.
    pub intensity_multiplier: f32,
    /// Global multiplier applied to every streamed light's falloff radius.
    pub scattering: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            cell_size: 8.0,
            intensity_multiplier: 1.0,
            scattering: 1.0,
        }
    }
}

impl LightingConfig {
    /// Check that the configuration is usable.
    ///
    /// Multipliers are not validated here; negative values are clamped at
    /// pack time instead of rejected.
    pub fn validate(&self) -> Result<()> {
        let cell = self.cell_size;
        if !(cell >= 1.0 && cell.fract() == 0.0 && (cell as u32).is_power_of_two()) {
            return Err(Error::Config(format!(
                "cell_size must be a power-of-two whole number >= 1, got {cell}"
            )));
        }
        Ok(())
    }

    /// Per-axis shift equivalent to dividing by `cell_size`.
    ///
    /// Only meaningful after [`validate`](Self::validate) has passed.
    pub fn cell_shift(&self) -> u32 {
        (self.cell_size as u32).trailing_zeros()
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

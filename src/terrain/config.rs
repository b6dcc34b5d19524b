//! Terrain generation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{KeyframeCurve, TerrainError};
use crate::bands::{default_bands, validate_bands, TerrainBand};
use crate::mesh::{check_dimensions, AxisConvention};
use crate::noise::{FractalNoiseConfig, NoiseSource};
use crate::texture::TextureMode;

/// Errors that can occur while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Immutable description of one terrain generation pass.
///
/// Valid ranges:
/// - `x_size`, `y_size`: > 0, equal under [`AxisConvention::Transposed`]
/// - `max_height`: finite
/// - `perlin_scale`: finite and > 0
/// - `bands`: at least one band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Number of quads along x.
    pub x_size: u32,
    /// Number of quads along y (world Z).
    pub y_size: u32,
    /// World height reached when the curve returns 1.0.
    pub max_height: f32,
    /// Grid cells per noise unit; larger values give smoother terrain.
    pub perlin_scale: f32,
    pub axis_convention: AxisConvention,
    pub texture_mode: TextureMode,
    pub noise: NoiseSource,
    pub height_curve: KeyframeCurve,
    pub bands: Vec<TerrainBand>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            x_size: 64,
            y_size: 64,
            max_height: 12.0,
            perlin_scale: 18.5,
            noise: NoiseSource::default(),
            height_curve: KeyframeCurve::default(),
            axis_convention: AxisConvention::default(),
            texture_mode: TextureMode::default(),
            bands: default_bands(),
        }
    }
}

impl TerrainConfig {
    /// Creates a configuration of the given size with default settings.
    pub fn with_size(x_size: u32, y_size: u32) -> Self {
        Self {
            x_size,
            y_size,
            ..Default::default()
        }
    }

    /// Island-style preset: flattened lowlands and multi-octave detail.
    pub fn island(size: u32, seed: u32) -> Self {
        Self {
            x_size: size,
            y_size: size,
            max_height: 20.0,
            perlin_scale: 32.0,
            noise: NoiseSource::Fractal {
                config: FractalNoiseConfig::hills(seed),
                offset: [0.0, 0.0],
            },
            height_curve: KeyframeCurve::lowland_flatten(),
            ..Default::default()
        }
    }

    /// Parses a configuration from TOML. Missing fields take default values.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks every parameter; reports the first violation.
    ///
    /// Order: dimensions, scale, height, bands, curve.
    pub fn validate(&self) -> Result<(), TerrainError> {
        check_dimensions(self.x_size, self.y_size, self.axis_convention)?;

        if !(self.perlin_scale.is_finite() && self.perlin_scale > 0.0) {
            return Err(TerrainError::InvalidScale(self.perlin_scale));
        }

        if !self.max_height.is_finite() {
            return Err(TerrainError::InvalidHeight(self.max_height));
        }

        validate_bands(&self.bands)?;

        if self.height_curve.keys().is_empty() {
            return Err(TerrainError::config("height curve needs at least one key"));
        }

        Ok(())
    }
}

//! Terrain band classification.
//!
//! A band table is an ordered list of `(threshold, color)` pairs. A height
//! belongs to the first band whose threshold lies strictly above it; heights
//! at or above every threshold fall through to the last band.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::terrain::TerrainError;

/// A named height band with the color used to paint it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainBand {
    pub name: String,
    /// Exclusive upper bound of normalized heights covered by this band.
    pub height: f32,
    /// RGBA color.
    pub color: [u8; 4],
}

impl TerrainBand {
    pub fn new(name: impl Into<String>, height: f32, color: [u8; 4]) -> Self {
        Self {
            name: name.into(),
            height,
            color,
        }
    }
}

/// Default band table: deep water up to snow caps.
pub fn default_bands() -> Vec<TerrainBand> {
    vec![
        TerrainBand::new("deep water", 0.25, [18, 52, 120, 255]),
        TerrainBand::new("shallow water", 0.35, [42, 98, 176, 255]),
        TerrainBand::new("sand", 0.42, [216, 200, 138, 255]),
        TerrainBand::new("grass", 0.58, [88, 156, 62, 255]),
        TerrainBand::new("forest", 0.7, [44, 102, 46, 255]),
        TerrainBand::new("rock", 0.85, [110, 98, 88, 255]),
        TerrainBand::new("snow", 1.0, [240, 244, 250, 255]),
    ]
}

/// Returns the band a normalized height falls into.
///
/// The comparison is strict: a height equal to a band's threshold belongs to
/// the next band.
pub fn classify(height: f32, bands: &[TerrainBand]) -> Result<&TerrainBand, TerrainError> {
    let last = bands
        .last()
        .ok_or_else(|| TerrainError::config("terrain bands are empty"))?;

    Ok(bands.iter().find(|band| height < band.height).unwrap_or(last))
}

/// Checks a band table before generation.
pub fn validate_bands(bands: &[TerrainBand]) -> Result<(), TerrainError> {
    if bands.is_empty() {
        return Err(TerrainError::config("terrain bands are empty"));
    }

    for band in bands {
        if !band.height.is_finite() {
            return Err(TerrainError::config(format!(
                "band '{}' has non-finite threshold {}",
                band.name, band.height
            )));
        }
    }

    if let Some(pair) = bands.windows(2).find(|pair| pair[1].height < pair[0].height) {
        warn!(
            before = %pair[0].name,
            after = %pair[1].name,
            "terrain bands are not in ascending threshold order; later bands may be unreachable"
        );
    }

    Ok(())
}

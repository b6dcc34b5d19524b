//! Noise generation module for terrain synthesis.
//!
//! Classic Perlin noise and its multi-octave fBm variant, both from the
//! `noise` crate. Samplers produce a [`NoiseGrid`] with values in [0, 1].

mod fractal;
mod grid;
mod perlin;

pub use fractal::{FractalNoise, FractalNoiseConfig};
pub use grid::NoiseGrid;
pub use perlin::PerlinNoise;

use serde::{Deserialize, Serialize};

use crate::terrain::TerrainError;

/// A deterministic coherent 2D noise function sampled over a grid.
pub trait NoiseSampler: Send + Sync {
    /// Returns the noise value at `(x, y)` in [0, 1].
    fn noise_2d(&self, x: f64, y: f64) -> f32;

    /// Samples a `rows` x `cols` grid where cell `(r, c)` reads the noise at
    /// `(c / scale, r / scale)`. Larger scales give smoother terrain.
    fn sample(&self, rows: usize, cols: usize, scale: f32) -> Result<NoiseGrid, TerrainError> {
        if rows == 0 || cols == 0 {
            return Err(TerrainError::dimension(format!(
                "noise grid must be at least 1x1, got {}x{}",
                rows, cols
            )));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(TerrainError::InvalidScale(scale));
        }

        let scale = scale as f64;
        let mut values = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let sample_x = col as f64 / scale;
                let sample_y = row as f64 / scale;
                values.push(self.noise_2d(sample_x, sample_y).clamp(0.0, 1.0));
            }
        }

        Ok(NoiseGrid::from_values(rows, cols, values))
    }
}

/// Serializable choice of noise algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoiseSource {
    /// Single-octave classic Perlin noise.
    Perlin {
        #[serde(default)]
        seed: u32,
        #[serde(default)]
        offset: [f64; 2],
    },
    /// Multi-octave fractal noise.
    Fractal {
        #[serde(default)]
        offset: [f64; 2],
        #[serde(default)]
        config: FractalNoiseConfig,
    },
}

impl Default for NoiseSource {
    fn default() -> Self {
        NoiseSource::Perlin {
            seed: 0,
            offset: [0.0, 0.0],
        }
    }
}

impl NoiseSource {
    /// Builds the sampler described by this source.
    pub fn sampler(&self) -> Box<dyn NoiseSampler> {
        match self {
            NoiseSource::Perlin { seed, offset } => {
                Box::new(PerlinNoise::new(*seed).with_offset(offset[0], offset[1]))
            }
            NoiseSource::Fractal { config, offset } => {
                Box::new(FractalNoise::new(config.clone()).with_offset(offset[0], offset[1]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f32);

    impl NoiseSampler for Constant {
        fn noise_2d(&self, _x: f64, _y: f64) -> f32 {
            self.0
        }
    }

    #[test]
    fn test_sample_dimensions() {
        let grid = Constant(0.25).sample(3, 5, 2.0).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.values().len(), 15);
    }

    #[test]
    fn test_sample_clamps_out_of_range_values() {
        let high = Constant(1.7).sample(2, 2, 1.0).unwrap();
        assert!(high.values().iter().all(|&v| v == 1.0));

        let low = Constant(-0.3).sample(2, 2, 1.0).unwrap();
        assert!(low.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_rejects_bad_scale() {
        let sampler = Constant(0.5);
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = sampler.sample(2, 2, scale).unwrap_err();
            assert!(matches!(err, TerrainError::InvalidScale(_)), "scale {scale}");
        }
    }

    #[test]
    fn test_rejects_empty_grid() {
        let err = Constant(0.5).sample(0, 4, 1.0).unwrap_err();
        assert!(matches!(err, TerrainError::InvalidDimension(_)));
    }

    #[test]
    fn test_source_builds_matching_sampler() {
        let source = NoiseSource::default();
        let direct = PerlinNoise::new(0);
        let boxed = source.sampler();
        assert_eq!(boxed.noise_2d(1.3, 2.7), direct.noise_2d(1.3, 2.7));
    }
}

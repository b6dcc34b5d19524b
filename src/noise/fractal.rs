//! Multi-octave fractal Brownian motion (fBm) noise generation.

use ::noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::NoiseSampler;

/// Configuration for multi-octave fractal noise generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalNoiseConfig {
    /// Number of noise octaves (1-8 typical).
    pub octaves: u8,
    /// Base frequency multiplier applied on top of the grid scale.
    pub frequency: f32,
    /// Frequency multiplier per octave (typically 2.0).
    pub lacunarity: f32,
    /// Amplitude decay per octave (0.4-0.6 typical).
    pub persistence: f32,
    /// Random seed for reproducible generation.
    pub seed: u32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            frequency: 1.0,
            lacunarity: 2.0,
            persistence: 0.5,
            seed: 42,
        }
    }
}

impl FractalNoiseConfig {
    /// Creates a new noise configuration with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Rolling hills: few octaves, fast amplitude falloff.
    pub fn hills(seed: u32) -> Self {
        Self {
            octaves: 3,
            frequency: 1.0,
            lacunarity: 2.0,
            persistence: 0.4,
            seed,
        }
    }

    /// Rugged terrain with strong high-frequency detail.
    pub fn mountains(seed: u32) -> Self {
        Self {
            octaves: 6,
            frequency: 1.2,
            lacunarity: 2.1,
            persistence: 0.55,
            seed,
        }
    }
}

/// Fractal noise sampler remapped from [-1, 1] to [0, 1].
#[derive(Debug, Clone)]
pub struct FractalNoise {
    config: FractalNoiseConfig,
    fbm: Fbm<Perlin>,
    offset: [f64; 2],
}

impl FractalNoise {
    pub fn new(config: FractalNoiseConfig) -> Self {
        // Octave sources are seeded `seed..seed + octaves`; keep that range in u32.
        let seed = config.seed.min(u32::MAX - Fbm::<Perlin>::MAX_OCTAVES as u32);
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(config.octaves as usize)
            .set_frequency(config.frequency as f64)
            .set_lacunarity(config.lacunarity as f64)
            .set_persistence(config.persistence as f64);

        Self {
            config,
            fbm,
            offset: [0.0, 0.0],
        }
    }

    /// Shifts every sample coordinate by `(x, y)` in noise space.
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = [x, y];
        self
    }

    pub fn config(&self) -> &FractalNoiseConfig {
        &self.config
    }
}

impl NoiseSampler for FractalNoise {
    fn noise_2d(&self, x: f64, y: f64) -> f32 {
        if self.config.octaves == 0 {
            return 0.5;
        }

        // Fbm normalizes the octave sum back into [-1, 1]
        let v = self.fbm.get([x + self.offset[0], y + self.offset[1]]);
        ((v + 1.0) * 0.5) as f32
    }
}

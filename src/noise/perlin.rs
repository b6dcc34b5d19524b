//! Classic 2D Perlin noise.

use ::noise::{NoiseFn, Perlin};

use super::NoiseSampler;

/// Seeded classic Perlin noise remapped to [0, 1].
///
/// Integer lattice points always evaluate to 0.5, so a scale of 1.0 yields a
/// flat grid.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    perlin: Perlin,
    offset: [f64; 2],
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            offset: [0.0, 0.0],
        }
    }

    /// Shifts every sample coordinate by `(x, y)` in noise space.
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = [x, y];
        self
    }
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NoiseSampler for PerlinNoise {
    fn noise_2d(&self, x: f64, y: f64) -> f32 {
        // noise-rs Perlin is roughly [-1, 1]
        let v = self.perlin.get([x + self.offset[0], y + self.offset[1]]);
        ((v + 1.0) * 0.5) as f32
    }
}

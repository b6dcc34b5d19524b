//! Height curves remapping normalized noise to normalized elevation.

use serde::{Deserialize, Serialize};

use super::TerrainError;

/// Maps a noise value in [0, 1] to a height factor.
///
/// The generator only samples the curve; any `Fn(f32) -> f32` works.
pub trait HeightCurve {
    fn evaluate(&self, t: f32) -> f32;
}

impl<F> HeightCurve for F
where
    F: Fn(f32) -> f32,
{
    fn evaluate(&self, t: f32) -> f32 {
        self(t)
    }
}

/// A single control point of a [`KeyframeCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
}

impl CurveKey {
    pub fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// Piecewise cubic Hermite curve through keyframes.
///
/// Evaluation clamps to the first/last key outside the key range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct KeyframeCurve {
    keys: Vec<CurveKey>,
}

impl KeyframeCurve {
    /// Builds a curve, sorting keys by time.
    pub fn new(mut keys: Vec<CurveKey>) -> Result<Self, TerrainError> {
        if keys.is_empty() {
            return Err(TerrainError::config("height curve needs at least one key"));
        }
        for key in &keys {
            let finite = key.time.is_finite()
                && key.value.is_finite()
                && key.in_tangent.is_finite()
                && key.out_tangent.is_finite();
            if !finite {
                return Err(TerrainError::config(format!(
                    "height curve key {:?} is not finite",
                    key
                )));
            }
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { keys })
    }

    /// Identity mapping over [0, 1].
    pub fn linear() -> Self {
        Self {
            keys: vec![CurveKey::new(0.0, 0.0, 1.0, 1.0), CurveKey::new(1.0, 1.0, 1.0, 1.0)],
        }
    }

    /// Smooth S-curve from 0 to 1 with flat ends.
    pub fn ease_in_out() -> Self {
        Self {
            keys: vec![CurveKey::new(0.0, 0.0, 0.0, 0.0), CurveKey::new(1.0, 1.0, 0.0, 0.0)],
        }
    }

    /// Flattens low terrain (water) and exaggerates peaks.
    pub fn lowland_flatten() -> Self {
        Self {
            keys: vec![
                CurveKey::new(0.0, 0.0, 0.0, 0.0),
                CurveKey::new(0.35, 0.02, 0.0, 0.2),
                CurveKey::new(1.0, 1.0, 2.2, 2.2),
            ],
        }
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }
}

impl Default for KeyframeCurve {
    fn default() -> Self {
        Self::linear()
    }
}

impl TryFrom<Vec<CurveKey>> for KeyframeCurve {
    type Error = TerrainError;

    fn try_from(keys: Vec<CurveKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<KeyframeCurve> for Vec<CurveKey> {
    fn from(curve: KeyframeCurve) -> Self {
        curve.keys
    }
}

impl HeightCurve for KeyframeCurve {
    fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return t,
        };
        if t.is_nan() || t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t, so k0.time <= t < k1.time.
        let idx = self.keys.partition_point(|k| k.time <= t);
        let k0 = &self.keys[idx - 1];
        let k1 = &self.keys[idx];

        let dt = k1.time - k0.time;
        let s = (t - k0.time) / dt;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * k0.value + h10 * dt * k0.out_tangent + h01 * k1.value + h11 * dt * k1.in_tangent
    }
}

//! Terrain configuration and shared types.
//!
//! Provides the generation configuration, the height curve abstraction and
//! the error type used across the pipeline.

mod config;
mod curve;
mod error;

pub use config::{ConfigError, TerrainConfig};
pub use curve::{CurveKey, HeightCurve, KeyframeCurve};
pub use error::TerrainError;

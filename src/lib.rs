//! Procedural heightmap terrain generator.
//!
//! This crate samples 2D coherent noise over a regular grid and turns it into
//! a renderable terrain mesh (positions, UVs, normals, indices) plus a color
//! texture painted from configurable height bands.

pub mod bands;
pub mod export;
pub mod mesh;
pub mod noise;
pub mod pipeline;
pub mod terrain;
pub mod texture;

pub use crate::bands::{classify, TerrainBand};
pub use crate::mesh::{AxisConvention, MeshData};
pub use crate::noise::{FractalNoiseConfig, NoiseGrid, NoiseSampler, NoiseSource};
pub use crate::pipeline::{generate, generate_with_curve, GeneratedTerrain, StageId, TerrainGenerator};
pub use crate::terrain::{HeightCurve, KeyframeCurve, TerrainConfig, TerrainError};
pub use crate::texture::{TextureImage, TextureMode};

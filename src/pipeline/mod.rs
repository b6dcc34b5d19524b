//! Pipeline module for orchestrating terrain generation.
//!
//! Validates the configuration, samples noise once, then derives the
//! texture and mesh from the shared grid.

mod generator;

pub use generator::{
    generate, generate_with_curve, GeneratedTerrain, StageId, TerrainGenerator,
};

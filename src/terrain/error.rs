//! Errors raised while validating or running terrain generation.

use thiserror::Error;

/// Errors that can occur during terrain generation.
///
/// Generation is deterministic, so every variant describes a configuration
/// problem that will recur until the offending parameter is fixed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Invalid noise scale: {0} (must be finite and > 0)")]
    InvalidScale(f32),
    #[error("Invalid max height: {0} (must be finite)")]
    InvalidHeight(f32),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TerrainError {
    pub(crate) fn dimension(msg: impl Into<String>) -> Self {
        TerrainError::InvalidDimension(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        TerrainError::Configuration(msg.into())
    }
}

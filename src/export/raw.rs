//! RAW heightmap export for game engine terrain importers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::noise::NoiseGrid;

/// Errors that can occur during RAW export.
#[derive(Error, Debug)]
pub enum RawExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// RAW export format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RawFormat {
    /// 16-bit unsigned integer, little-endian.
    #[default]
    R16LittleEndian,
    /// 16-bit unsigned integer, big-endian.
    R16BigEndian,
    /// 32-bit float, little-endian (high precision).
    R32Float,
}

/// Exports the noise grid as a headerless RAW heightmap, row by row.
///
/// Noise values already lie in [0, 1], so R16 formats map them straight to
/// `0..=65535`.
pub fn export_noise_raw(grid: &NoiseGrid, path: &Path, format: RawFormat) -> Result<(), RawExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for &v in grid.values() {
        match format {
            RawFormat::R16LittleEndian => writer.write_all(&to_u16(v).to_le_bytes())?,
            RawFormat::R16BigEndian => writer.write_all(&to_u16(v).to_be_bytes())?,
            RawFormat::R32Float => writer.write_all(&v.to_le_bytes())?,
        }
    }

    writer.flush()?;
    Ok(())
}

fn to_u16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * 65535.0).round() as u16
}

/// Returns the expected file size for a RAW export.
pub fn expected_file_size(rows: usize, cols: usize, format: RawFormat) -> u64 {
    let pixels = rows as u64 * cols as u64;
    match format {
        RawFormat::R16LittleEndian | RawFormat::R16BigEndian => pixels * 2,
        RawFormat::R32Float => pixels * 4,
    }
}

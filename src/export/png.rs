//! PNG export for terrain textures and heightmaps.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};
use thiserror::Error;

use crate::noise::NoiseGrid;
use crate::texture::TextureImage;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Image dimension {0} exceeds u32")]
    TooLarge(usize),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Exports the terrain color texture as an 8-bit RGBA PNG.
pub fn export_texture_png(
    texture: &TextureImage,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let img = texture.to_rgba_image();

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        texture.width(),
        texture.height(),
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(())
}

/// Exports the noise grid as a 16-bit grayscale heightmap PNG.
///
/// Grid rows map to image rows; values in [0, 1] span the full 16-bit range.
pub fn export_heightmap_png(
    grid: &NoiseGrid,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let width = u32::try_from(grid.cols()).map_err(|_| PngExportError::TooLarge(grid.cols()))?;
    let height = u32::try_from(grid.rows()).map_err(|_| PngExportError::TooLarge(grid.rows()))?;

    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(width, height);
    for (row, values) in grid.iter_rows().enumerate() {
        for (col, &v) in values.iter().enumerate() {
            let value = (v.clamp(0.0, 1.0) * 65535.0) as u16;
            img.put_pixel(col as u32, row as u32, Luma([value]));
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    // Convert u16 slice to bytes for the encoder
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, width, height, image::ExtendedColorType::L16)?;

    Ok(())
}

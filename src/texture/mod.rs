//! Color texture synthesis from a noise grid.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::bands::{classify, TerrainBand};
use crate::noise::NoiseGrid;
use crate::terrain::TerrainError;

/// How grid values are turned into colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureMode {
    /// Paint each cell with its terrain band color.
    #[default]
    Bands,
    /// Black-to-white ramp by raw noise value.
    Grayscale,
}

/// A flat RGBA image stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl TextureImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels in row-major order; `pixels().len() == width * height`.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if `x >= width` or `y >= height`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for {}x{} texture",
            x,
            y,
            self.width,
            self.height
        );
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Converts into an `image` buffer for encoding or host upload.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for (dst, src) in img.pixels_mut().zip(&self.pixels) {
            dst.0 = *src;
        }
        img
    }
}

/// Builds the terrain texture, one pixel per grid cell.
///
/// Row `r`, column `c` of the grid lands at pixel index `r * cols + c`.
pub fn build_texture(
    grid: &NoiseGrid,
    bands: &[TerrainBand],
    mode: TextureMode,
) -> Result<TextureImage, TerrainError> {
    let width = u32::try_from(grid.cols())
        .map_err(|_| TerrainError::dimension("texture width exceeds u32"))?;
    let height = u32::try_from(grid.rows())
        .map_err(|_| TerrainError::dimension("texture height exceeds u32"))?;

    let pixels = match mode {
        TextureMode::Bands => grid
            .values()
            .iter()
            .map(|&v| classify(v, bands).map(|band| band.color))
            .collect::<Result<Vec<_>, _>>()?,
        TextureMode::Grayscale => grid.values().iter().map(|&v| gray(v)).collect(),
    };

    Ok(TextureImage {
        width,
        height,
        pixels,
    })
}

fn gray(v: f32) -> [u8; 4] {
    let level = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [level, level, level, 255]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseSampler;

    struct Ramp;

    impl NoiseSampler for Ramp {
        // value grows with column: 0.0, 0.25, 0.5, 0.75, 1.0 at scale 4
        fn noise_2d(&self, x: f64, _y: f64) -> f32 {
            x as f32
        }
    }

    fn bands() -> Vec<TerrainBand> {
        vec![
            TerrainBand::new("water", 0.3, [0, 0, 255, 255]),
            TerrainBand::new("land", 0.6, [0, 255, 0, 255]),
            TerrainBand::new("peak", 1.0, [255, 255, 255, 255]),
        ]
    }

    #[test]
    fn test_texture_size_matches_grid() {
        let grid = Ramp.sample(3, 5, 4.0).unwrap();
        let tex = build_texture(&grid, &bands(), TextureMode::Bands).unwrap();
        assert_eq!(tex.width(), 5);
        assert_eq!(tex.height(), 3);
        assert_eq!(tex.pixels().len(), 15);
    }

    #[test]
    fn test_band_colors_follow_row_major_layout() {
        let grid = Ramp.sample(2, 5, 4.0).unwrap();
        let tex = build_texture(&grid, &bands(), TextureMode::Bands).unwrap();

        let expected = [
            [0, 0, 255, 255],
            [0, 0, 255, 255],
            [0, 255, 0, 255],
            [255, 255, 255, 255],
            [255, 255, 255, 255],
        ];
        for row in 0..2 {
            for col in 0..5 {
                assert_eq!(tex.pixel(col, row), expected[col as usize]);
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_column_past_width_panics() {
        let grid = Ramp.sample(3, 5, 4.0).unwrap();
        let tex = build_texture(&grid, &bands(), TextureMode::Bands).unwrap();
        tex.pixel(5, 0);
    }

    #[test]
    fn test_grayscale_mode() {
        let grid = Ramp.sample(1, 5, 4.0).unwrap();
        let tex = build_texture(&grid, &[], TextureMode::Grayscale).unwrap();
        assert_eq!(tex.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(tex.pixel(2, 0), [128, 128, 128, 255]);
        assert_eq!(tex.pixel(4, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_empty_bands_fail() {
        let grid = Ramp.sample(2, 2, 1.0).unwrap();
        let err = build_texture(&grid, &[], TextureMode::Bands).unwrap_err();
        assert!(matches!(err, TerrainError::Configuration(_)));
    }

    #[test]
    fn test_to_rgba_image() {
        let grid = Ramp.sample(2, 3, 2.0).unwrap();
        let tex = build_texture(&grid, &bands(), TextureMode::Bands).unwrap();
        let img = tex.to_rgba_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, tex.pixel(2, 1));
    }
}

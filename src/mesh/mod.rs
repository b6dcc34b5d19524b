//! Regular-grid terrain mesh construction.
//!
//! Vertices are laid out row by row (`i = y * (x_size + 1) + x`) with the
//! height on the Y axis and the grid's y index on world Z. Each grid cell
//! becomes two triangles wound so that a flat terrain faces `+Y`.

mod normals;

pub use normals::compute_vertex_normals;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::noise::NoiseGrid;
use crate::terrain::{HeightCurve, TerrainError};

/// Which noise-grid axis the vertex loops read for height and UVs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisConvention {
    /// Vertex `(x, y)` reads grid row `x`, column `y`, with UV `(y / y_size, x / x_size)`.
    ///
    /// Reproduces the legacy terrain layout; only square grids are accepted.
    #[default]
    Transposed,
    /// Vertex `(x, y)` reads grid row `y`, column `x`, with UV `(x / x_size, y / y_size)`.
    RowMajor,
}

/// Vertex, UV, normal, and index buffers for a terrain mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Minimum and maximum vertex height.
    pub fn height_range(&self) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;

        for p in &self.positions {
            min = min.min(p.y);
            max = max.max(p.y);
        }

        (min, max)
    }

    /// Raw bytes of the position buffer (tightly packed `f32` triples).
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the index buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Checks mesh dimensions and returns the vertex count.
pub(crate) fn check_dimensions(
    x_size: u32,
    y_size: u32,
    convention: AxisConvention,
) -> Result<usize, TerrainError> {
    if x_size == 0 || y_size == 0 {
        return Err(TerrainError::dimension(format!(
            "x_size and y_size must be > 0, got {}x{}",
            x_size, y_size
        )));
    }
    if convention == AxisConvention::Transposed && x_size != y_size {
        return Err(TerrainError::dimension(format!(
            "transposed axis convention needs a square grid, got {}x{}",
            x_size, y_size
        )));
    }

    let vertices = (x_size as u64 + 1) * (y_size as u64 + 1);
    if vertices > u32::MAX as u64 {
        return Err(TerrainError::dimension(format!(
            "{} vertices do not fit 32-bit indices",
            vertices
        )));
    }

    usize::try_from(vertices)
        .map_err(|_| TerrainError::dimension("vertex count exceeds addressable memory"))
}

/// Builds the terrain mesh from a noise grid of `(y_size + 1) x (x_size + 1)` cells.
///
/// Height is `curve(noise) * max_height`.
pub fn build_mesh(
    grid: &NoiseGrid,
    x_size: u32,
    y_size: u32,
    max_height: f32,
    curve: &dyn HeightCurve,
    convention: AxisConvention,
) -> Result<MeshData, TerrainError> {
    let vertex_count = check_dimensions(x_size, y_size, convention)?;
    if grid.rows() != y_size as usize + 1 || grid.cols() != x_size as usize + 1 {
        return Err(TerrainError::dimension(format!(
            "noise grid is {}x{}, expected {}x{}",
            grid.rows(),
            grid.cols(),
            y_size + 1,
            x_size + 1
        )));
    }

    let mut positions = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for y in 0..=y_size {
        for x in 0..=x_size {
            let (noise, uv) = match convention {
                AxisConvention::Transposed => (
                    grid.get(x as usize, y as usize),
                    Vec2::new(y as f32 / y_size as f32, x as f32 / x_size as f32),
                ),
                AxisConvention::RowMajor => (
                    grid.get(y as usize, x as usize),
                    Vec2::new(x as f32 / x_size as f32, y as f32 / y_size as f32),
                ),
            };

            let height = curve.evaluate(noise) * max_height;
            positions.push(Vec3::new(x as f32, height, y as f32));
            uvs.push(uv);
        }
    }

    let indices = grid_indices(x_size, y_size);
    let normals = compute_vertex_normals(&positions, &indices);

    Ok(MeshData {
        positions,
        uvs,
        normals,
        indices,
    })
}

/// Triangle indices for an `x_size` x `y_size` quad grid, six per quad.
pub fn grid_indices(x_size: u32, y_size: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(x_size as usize * y_size as usize * 6);
    let row = x_size + 1;

    let mut vi = 0u32;
    for _ in 0..y_size {
        for _ in 0..x_size {
            indices.extend_from_slice(&[vi, vi + row, vi + 1, vi + 1, vi + row, vi + row + 1]);
            vi += 1;
        }
        // skip the last vertex of each row
        vi += 1;
    }

    indices
}

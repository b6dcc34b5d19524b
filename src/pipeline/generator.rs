//! Terrain generation orchestration.

use std::time::Instant;

use tracing::{debug, debug_span};

use crate::mesh::{build_mesh, MeshData};
use crate::noise::NoiseGrid;
use crate::terrain::{HeightCurve, TerrainConfig, TerrainError};
use crate::texture::{build_texture, TextureImage};

/// Unique identifier for generation stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Noise grid sampling.
    Noise,
    /// Color texture from the noise grid.
    Texture,
    /// Vertex, UV, normal and index buffers.
    Mesh,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Noise => "noise",
            StageId::Texture => "texture",
            StageId::Mesh => "mesh",
        }
    }

    /// All stages in execution order.
    pub fn all() -> [StageId; 3] {
        [StageId::Noise, StageId::Texture, StageId::Mesh]
    }
}

/// Everything produced by one generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTerrain {
    pub noise: NoiseGrid,
    pub mesh: MeshData,
    pub texture: TextureImage,
}

impl GeneratedTerrain {
    /// Drops the noise grid and returns the renderable outputs.
    pub fn into_parts(self) -> (MeshData, TextureImage) {
        (self.mesh, self.texture)
    }
}

/// Runs the noise → texture → mesh pipeline for a configuration.
///
/// The generator holds no state between runs; each call allocates fresh
/// buffers and hands them to the caller.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    config: TerrainConfig,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Generates terrain using the configured keyframe curve.
    pub fn run(&self) -> Result<GeneratedTerrain, TerrainError> {
        self.execute(&self.config.height_curve, |_, _, _| {}, |_, _, _| {})
    }

    /// Generates terrain with a caller-supplied height curve.
    pub fn run_with_curve(&self, curve: &dyn HeightCurve) -> Result<GeneratedTerrain, TerrainError> {
        self.execute(curve, |_, _, _| {}, |_, _, _| {})
    }

    /// Generates terrain, reporting `(stage_name, index, total)` around each stage.
    pub fn run_with_callbacks<F1, F2>(
        &self,
        on_stage_start: F1,
        on_stage_complete: F2,
    ) -> Result<GeneratedTerrain, TerrainError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        self.execute(&self.config.height_curve, on_stage_start, on_stage_complete)
    }

    fn execute<F1, F2>(
        &self,
        curve: &dyn HeightCurve,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<GeneratedTerrain, TerrainError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let config = &self.config;
        config.validate()?;

        let _span = debug_span!("generate", x_size = config.x_size, y_size = config.y_size).entered();
        let total = StageId::all().len();
        let rows = config.y_size as usize + 1;
        let cols = config.x_size as usize + 1;

        on_stage_start(StageId::Noise.name(), 0, total);
        let start = Instant::now();
        let noise = config.noise.sampler().sample(rows, cols, config.perlin_scale)?;
        let (min, max) = noise.value_range();
        debug!(rows, cols, min, max, elapsed = ?start.elapsed(), "sampled noise grid");
        on_stage_complete(StageId::Noise.name(), 0, total);

        on_stage_start(StageId::Texture.name(), 1, total);
        let start = Instant::now();
        let texture = build_texture(&noise, &config.bands, config.texture_mode)?;
        debug!(
            width = texture.width(),
            height = texture.height(),
            mode = ?config.texture_mode,
            elapsed = ?start.elapsed(),
            "built texture"
        );
        on_stage_complete(StageId::Texture.name(), 1, total);

        on_stage_start(StageId::Mesh.name(), 2, total);
        let start = Instant::now();
        let mesh = build_mesh(
            &noise,
            config.x_size,
            config.y_size,
            config.max_height,
            curve,
            config.axis_convention,
        )?;
        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            convention = ?config.axis_convention,
            elapsed = ?start.elapsed(),
            "built mesh"
        );
        on_stage_complete(StageId::Mesh.name(), 2, total);

        Ok(GeneratedTerrain {
            noise,
            mesh,
            texture,
        })
    }
}

/// Generates a terrain mesh and its color texture.
pub fn generate(config: &TerrainConfig) -> Result<(MeshData, TextureImage), TerrainError> {
    TerrainGenerator::new(config.clone()).run().map(GeneratedTerrain::into_parts)
}

/// Like [`generate`], but remaps heights through `curve` instead of the configured one.
pub fn generate_with_curve(
    config: &TerrainConfig,
    curve: &dyn HeightCurve,
) -> Result<(MeshData, TextureImage), TerrainError> {
    TerrainGenerator::new(config.clone())
        .run_with_curve(curve)
        .map(GeneratedTerrain::into_parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::TerrainBand;
    use crate::mesh::AxisConvention;
    use crate::noise::{FractalNoiseConfig, NoiseSource};
    use glam::Vec3;

    fn small_config() -> TerrainConfig {
        TerrainConfig {
            x_size: 8,
            y_size: 8,
            max_height: 10.0,
            perlin_scale: 3.7,
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = small_config();
        let (mesh1, tex1) = generate(&config).unwrap();
        let (mesh2, tex2) = generate(&config).unwrap();

        assert_eq!(mesh1, mesh2);
        assert_eq!(tex1, tex2);
    }

    #[test]
    fn test_fractal_generation_is_deterministic() {
        let config = TerrainConfig {
            noise: NoiseSource::Fractal {
                config: FractalNoiseConfig::mountains(77),
                offset: [3.0, -1.5],
            },
            ..small_config()
        };
        let a = TerrainGenerator::new(config.clone()).run().unwrap();
        let b = TerrainGenerator::new(config).run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_island_preset_has_relief() {
        let config = TerrainConfig::island(64, 7);
        let (mesh, tex) = generate(&config).unwrap();

        let mut colors = tex.pixels().to_vec();
        colors.sort_unstable();
        colors.dedup();
        assert!(colors.len() > 1, "island painted a single band");

        let (min, max) = mesh.height_range();
        assert!(max - min > 0.1 * config.max_height, "height range [{}, {}]", min, max);
    }

    #[test]
    fn test_output_sizes() {
        let config = TerrainConfig {
            x_size: 12,
            y_size: 5,
            axis_convention: AxisConvention::RowMajor,
            ..small_config()
        };
        let (mesh, tex) = generate(&config).unwrap();

        assert_eq!(mesh.positions.len(), 13 * 6);
        assert_eq!(mesh.uvs.len(), mesh.positions.len());
        assert_eq!(mesh.indices.len(), 6 * 12 * 5);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));

        assert_eq!(tex.width(), 13);
        assert_eq!(tex.height(), 6);
        assert_eq!(tex.pixels().len(), 13 * 6);
    }

    #[test]
    fn test_two_by_two_topology() {
        let config = TerrainConfig {
            x_size: 2,
            y_size: 2,
            ..small_config()
        };
        let (mesh, _) = generate(&config).unwrap();
        assert_eq!(&mesh.indices[..6], &[0, 3, 1, 1, 3, 4]);
    }

    #[test]
    fn test_validation_errors() {
        let config = TerrainConfig {
            x_size: 0,
            ..small_config()
        };
        assert!(matches!(generate(&config), Err(TerrainError::InvalidDimension(_))));

        let config = TerrainConfig {
            perlin_scale: 0.0,
            ..small_config()
        };
        assert!(matches!(generate(&config), Err(TerrainError::InvalidScale(_))));

        let config = TerrainConfig {
            bands: Vec::new(),
            ..small_config()
        };
        assert!(matches!(generate(&config), Err(TerrainError::Configuration(_))));
    }

    #[test]
    fn test_failed_validation_skips_all_stages() {
        let config = TerrainConfig {
            perlin_scale: -2.0,
            ..small_config()
        };
        let mut started = 0;
        let result = TerrainGenerator::new(config).run_with_callbacks(|_, _, _| started += 1, |_, _, _| {});
        assert!(result.is_err());
        assert_eq!(started, 0);
    }

    #[test]
    fn test_texture_uses_bands() {
        let config = TerrainConfig {
            bands: vec![TerrainBand::new("only", 1.0, [9, 8, 7, 255])],
            ..small_config()
        };
        let (_, tex) = generate(&config).unwrap();
        assert!(tex.pixels().iter().all(|&p| p == [9, 8, 7, 255]));
    }

    #[test]
    fn test_custom_curve() {
        let flat = |_t: f32| 0.0;
        let (mesh, _) = generate_with_curve(&small_config(), &flat).unwrap();

        assert!(mesh.positions.iter().all(|p| p.y == 0.0));
        assert!(mesh.normals.iter().all(|n| (*n - Vec3::Y).length() < 1e-6));
    }

    #[test]
    fn test_heights_bounded_by_max_height() {
        let (mesh, _) = generate(&small_config()).unwrap();
        let (min, max) = mesh.height_range();
        assert!(min >= -1e-4 && max <= 10.0 + 1e-4);
    }

    #[test]
    fn test_run_keeps_noise_grid() {
        let terrain = TerrainGenerator::new(small_config()).run().unwrap();
        assert_eq!(terrain.noise.rows(), 9);
        assert_eq!(terrain.noise.cols(), 9);
    }

    #[test]
    fn test_pipeline_with_callbacks() {
        let mut started = Vec::new();
        let mut completed = Vec::new();

        TerrainGenerator::new(small_config())
            .run_with_callbacks(
                |name, i, total| started.push((name.to_string(), i, total)),
                |name, _, _| completed.push(name.to_string()),
            )
            .unwrap();

        assert_eq!(
            started,
            vec![
                ("noise".to_string(), 0, 3),
                ("texture".to_string(), 1, 3),
                ("mesh".to_string(), 2, 3),
            ]
        );
        assert_eq!(completed, vec!["noise", "texture", "mesh"]);
    }

    #[test]
    fn test_stage_id_name() {
        assert_eq!(StageId::Noise.name(), "noise");
        assert_eq!(StageId::Mesh.name(), "mesh");
    }
}

//! Terragen CLI - Procedural heightmap terrain generator.
//!
//! Generates a terrain mesh (OBJ) and its color texture (PNG) from 2D
//! coherent noise, optionally exporting the raw heightmap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use terragen::export::{
    export_heightmap_png, export_mesh_obj, export_noise_raw, export_texture_png,
    PngExportOptions, RawFormat,
};
use terragen::noise::{FractalNoiseConfig, NoiseSource};
use terragen::{AxisConvention, TerrainConfig, TerrainGenerator, TextureMode};

/// Procedural heightmap terrain generator.
#[derive(Parser)]
#[command(name = "terragen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Generation parameters shared by all subcommands. Flags override the file.
#[derive(clap::Args)]
struct ConfigArgs {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of quads along x.
    #[arg(long)]
    x_size: Option<u32>,

    /// Number of quads along y.
    #[arg(long)]
    y_size: Option<u32>,

    /// Height reached where the curve evaluates to 1.0.
    #[arg(long)]
    max_height: Option<f32>,

    /// Noise scale (grid cells per noise unit, > 0).
    #[arg(short, long)]
    scale: Option<f32>,

    /// Noise seed.
    #[arg(long)]
    seed: Option<u32>,

    /// Use multi-octave fractal noise instead of single-octave Perlin.
    #[arg(long)]
    fractal: bool,

    /// Number of fractal octaves (implies --fractal).
    #[arg(long)]
    octaves: Option<u8>,

    /// Read the noise grid row-major instead of the legacy transposed layout.
    #[arg(long)]
    row_major: bool,

    /// Paint a black-to-white ramp instead of terrain bands.
    #[arg(long)]
    grayscale: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a terrain mesh and texture.
    Generate {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "terrain")]
        name: String,

        /// Also export the raw heightmap in this format.
        #[arg(long)]
        heightmap: Option<HeightmapFormat>,
    },

    /// Print the resolved configuration and the mesh it would produce.
    Info {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum HeightmapFormat {
    /// 16-bit grayscale PNG.
    Png,
    /// 16-bit RAW little-endian.
    Raw,
    /// 32-bit float RAW (high precision).
    RawFloat,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            output,
            name,
            heightmap,
        } => {
            let config = resolve_config(&config);
            run_generate(config, &output, &name, heightmap);
        }
        Commands::Info { config } => {
            let config = resolve_config(&config);
            run_info(&config);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn resolve_config(args: &ConfigArgs) -> TerrainConfig {
    let mut config = match &args.config {
        Some(path) => match TerrainConfig::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded configuration");
                config
            }
            Err(e) => {
                eprintln!("Error loading {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => TerrainConfig::default(),
    };

    if let Some(x_size) = args.x_size {
        config.x_size = x_size;
    }
    if let Some(y_size) = args.y_size {
        config.y_size = y_size;
    }
    if let Some(max_height) = args.max_height {
        config.max_height = max_height;
    }
    if let Some(scale) = args.scale {
        config.perlin_scale = scale;
    }
    if args.row_major {
        config.axis_convention = AxisConvention::RowMajor;
    }
    if args.grayscale {
        config.texture_mode = TextureMode::Grayscale;
    }

    if args.fractal || args.octaves.is_some() {
        let (mut fractal, offset) = match &config.noise {
            NoiseSource::Fractal { config, offset } => (config.clone(), *offset),
            NoiseSource::Perlin { offset, .. } => (FractalNoiseConfig::default(), *offset),
        };
        if let Some(octaves) = args.octaves {
            fractal.octaves = octaves;
        }
        if let Some(seed) = args.seed {
            fractal.seed = seed;
        }
        config.noise = NoiseSource::Fractal {
            config: fractal,
            offset,
        };
    } else if let Some(new_seed) = args.seed {
        match &mut config.noise {
            NoiseSource::Perlin { seed, .. } => *seed = new_seed,
            NoiseSource::Fractal { config, .. } => config.seed = new_seed,
        }
    }

    if config.axis_convention == AxisConvention::Transposed && config.x_size != config.y_size {
        warn!(
            x_size = config.x_size,
            y_size = config.y_size,
            "non-square terrain needs --row-major"
        );
    }

    config
}

fn run_generate(config: TerrainConfig, output: &Path, name: &str, heightmap: Option<HeightmapFormat>) {
    println!("Terragen - Procedural Terrain Generator");
    println!("=======================================");
    println!("Grid: {}x{} quads", config.x_size, config.y_size);
    println!("Max height: {}", config.max_height);
    println!("Noise scale: {}", config.perlin_scale);
    println!("Output: {}", output.display());

    let start = Instant::now();
    let generator = TerrainGenerator::new(config);
    let terrain = match generator.run_with_callbacks(
        |stage, i, total| info!("[{}/{}] Starting: {}", i + 1, total, stage),
        |stage, i, total| info!("[{}/{}] Completed: {}", i + 1, total, stage),
    ) {
        Ok(terrain) => terrain,
        Err(e) => {
            eprintln!("Error during generation: {}", e);
            std::process::exit(1);
        }
    };
    println!("Generation completed in {:.2?}", start.elapsed());

    let (min_h, max_h) = terrain.mesh.height_range();
    println!(
        "Mesh: {} vertices, {} triangles, height range [{:.3}, {:.3}]",
        terrain.mesh.vertex_count(),
        terrain.mesh.triangle_count(),
        min_h,
        max_h
    );

    if let Err(e) = std::fs::create_dir_all(output) {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    }

    println!("\nExporting...");
    let png_options = PngExportOptions::default();

    let texture_path = output.join(format!("{}_texture.png", name));
    if let Err(e) = export_texture_png(&terrain.texture, &texture_path, &png_options) {
        eprintln!("Error exporting texture: {}", e);
        std::process::exit(1);
    }
    println!("  Texture: {}", texture_path.display());

    let mesh_path = output.join(format!("{}.obj", name));
    if let Err(e) = export_mesh_obj(&terrain.mesh, &mesh_path) {
        eprintln!("Error exporting mesh: {}", e);
        std::process::exit(1);
    }
    println!("  Mesh: {}", mesh_path.display());

    if let Some(format) = heightmap {
        let result = match format {
            HeightmapFormat::Png => {
                let path = output.join(format!("{}_height.png", name));
                export_heightmap_png(&terrain.noise, &path, &png_options)
                    .map(|_| path)
                    .map_err(|e| e.to_string())
            }
            HeightmapFormat::Raw | HeightmapFormat::RawFloat => {
                let (raw_format, ext) = match format {
                    HeightmapFormat::RawFloat => (RawFormat::R32Float, "r32"),
                    _ => (RawFormat::R16LittleEndian, "raw"),
                };
                let path = output.join(format!("{}_height.{}", name, ext));
                export_noise_raw(&terrain.noise, &path, raw_format)
                    .map(|_| path)
                    .map_err(|e| e.to_string())
            }
        };

        match result {
            Ok(path) => println!(
                "  Heightmap: {} ({}x{})",
                path.display(),
                terrain.noise.cols(),
                terrain.noise.rows()
            ),
            Err(e) => {
                eprintln!("Error exporting heightmap: {}", e);
                std::process::exit(1);
            }
        }
    }

    println!("\nDone!");
}

fn run_info(config: &TerrainConfig) {
    println!("Terragen - Configuration Info");
    println!("=============================");

    let vertices = (config.x_size as u64 + 1) * (config.y_size as u64 + 1);
    let triangles = config.x_size as u64 * config.y_size as u64 * 2;
    println!("Grid: {}x{} quads", config.x_size, config.y_size);
    println!("Vertices: {}", vertices);
    println!("Triangles: {}", triangles);
    println!("Texture: {}x{} pixels", config.x_size as u64 + 1, config.y_size as u64 + 1);
    println!("Bands: {}", config.bands.len());

    match config.to_toml_string() {
        Ok(text) => println!("\n{}", text),
        Err(e) => {
            eprintln!("Error serializing configuration: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }
    println!("Validation: OK");
}

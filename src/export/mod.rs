//! Export module for saving generated terrain to files.
//!
//! Supports RGBA PNG textures, 16-bit PNG and RAW heightmaps for engine
//! importers, and Wavefront OBJ meshes.

mod obj;
mod png;
mod raw;

pub use obj::{export_mesh_obj, write_mesh_obj, ObjExportError};
pub use png::{export_heightmap_png, export_texture_png, PngExportError, PngExportOptions};
pub use raw::{expected_file_size, export_noise_raw, RawExportError, RawFormat};

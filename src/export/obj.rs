//! Wavefront OBJ export for terrain meshes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::mesh::MeshData;

/// Errors that can occur during OBJ export.
#[derive(Error, Debug)]
pub enum ObjExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes a mesh as OBJ with positions, UVs and normals.
///
/// OBJ indices are 1-based and every face references the same index for
/// position, UV and normal (`f a/a/a b/b/b c/c/c`).
pub fn write_mesh_obj<W: Write>(mesh: &MeshData, mut writer: W) -> Result<(), ObjExportError> {
    writeln!(writer, "# terragen terrain mesh")?;
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;

    for p in &mesh.positions {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(writer, "vt {} {}", uv.x, uv.y)?;
    }
    for n in &mesh.normals {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Exports a mesh to an OBJ file.
pub fn export_mesh_obj(mesh: &MeshData, path: &Path) -> Result<(), ObjExportError> {
    let file = File::create(path)?;
    write_mesh_obj(mesh, BufWriter::new(file))
}

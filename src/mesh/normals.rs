//! Per-vertex normal accumulation.

use glam::Vec3;

/// Computes smooth vertex normals for an indexed triangle list.
///
/// Face normals are accumulated unnormalized, so larger triangles weigh more.
/// Vertices whose accumulated normal vanishes fall back to `+Y`.
pub fn compute_vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let v0 = positions[a];
        let v1 = positions[b];
        let v2 = positions[c];

        let face = (v1 - v0).cross(v2 - v0);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for n in &mut normals {
        *n = n.try_normalize().unwrap_or(Vec3::Y);
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_quad_faces_up() {
        // Same winding as the grid builder: (vi, vi+w, vi+1), (vi+1, vi+w, vi+w+1)
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ];
        let indices = vec![0, 2, 1, 1, 2, 3];

        for n in compute_vertex_normals(&positions, &indices) {
            assert!((n - Vec3::Y).length() < 1e-6, "normal {:?}", n);
        }
    }

    #[test]
    fn test_unreferenced_vertex_defaults_up() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::new(5.0, 5.0, 5.0)];
        let normals = compute_vertex_normals(&positions, &[0, 2, 1]);
        assert_eq!(normals[3], Vec3::Y);
    }

    #[test]
    fn test_slope_tilts_normal() {
        // Raise the +x edge; normals lean towards -x.
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ];
        let normals = compute_vertex_normals(&positions, &[0, 2, 1, 1, 2, 3]);
        for n in normals {
            assert!(n.x < 0.0 && n.y > 0.0);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }
}

//! Normal generation for geometry without normals

use glam::Vec3;

/// Unit normal of a counter-clockwise triangle, zero if degenerate
pub fn calculate_triangle_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize_or_zero()
}

/// Area-weighted per-vertex normals.
///
/// Non-indexed positions are treated as a triangle list.
pub fn calculate_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    let mut add_face = |a: usize, b: usize, c: usize| {
        let (Some(p0), Some(p1), Some(p2)) = (positions.get(a), positions.get(b), positions.get(c))
        else {
            return;
        };
        // Unnormalized cross product weights by area
        let n = (Vec3::from(*p1) - Vec3::from(*p0)).cross(Vec3::from(*p2) - Vec3::from(*p0));
        accum[a] += n;
        accum[b] += n;
        accum[c] += n;
    };

    if indices.is_empty() {
        for i in (0..positions.len() / 3).map(|t| t * 3) {
            add_face(i, i + 1, i + 2);
        }
    } else {
        for tri in indices.chunks_exact(3) {
            add_face(tri[0] as usize, tri[1] as usize, tri[2] as usize);
        }
    }

    accum
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ccw_triangle_faces_positive_z() {
        let n = calculate_triangle_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(n, Vec3::Z);
        assert_eq!(calculate_triangle_normal(Vec3::ZERO, Vec3::X, Vec3::X), Vec3::ZERO);
    }

    #[test]
    fn test_shared_vertex_normals_are_averaged() {
        // Two faces of a corner: one facing +Z, one facing +X
        let positions = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, -1.0],
        ];
        let indices = [0, 1, 2, 0, 2, 3];
        let normals = calculate_vertex_normals(&positions, &indices);

        let shared = Vec3::from(normals[0]);
        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        assert!(shared.abs_diff_eq(expected, 1e-6));
        assert_eq!(normals[1], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unreferenced_vertex_gets_fallback() {
        let positions = [[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [5.0, 5.0, 5.0]];
        let normals = calculate_vertex_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals[3], [0.0, 1.0, 0.0]);
    }
}

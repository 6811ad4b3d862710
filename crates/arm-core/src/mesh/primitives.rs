//! Built-in procedural geometry: part cuboids and reference lines

use glam::Vec3;

use crate::part::PartId;

use super::{Geometry, MeshData, MeshError, MeshSource, Vertex};

/// Procedural stand-in geometry sized to the arm's link offsets
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMeshSource;

impl BuiltinMeshSource {
    /// Center and half extents of a part's cuboid in part space
    pub fn extents(part: PartId) -> (Vec3, Vec3) {
        match part {
            PartId::Base => (Vec3::new(0.0, 0.5, 0.0), Vec3::new(1.0, 0.5, 1.0)),
            PartId::Top => (Vec3::new(0.0, 0.2, 0.0), Vec3::new(0.5, 0.2, 0.5)),
            PartId::Arm1 => (Vec3::new(0.0, 0.625, 0.0), Vec3::new(0.15, 0.625, 0.15)),
            PartId::Joint => (Vec3::ZERO, Vec3::new(0.25, 0.2, 0.2)),
            PartId::Arm2 => (Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.12, 0.5, 0.12)),
            PartId::Pen => (Vec3::new(0.0, 0.25, 0.0), Vec3::new(0.05, 0.25, 0.05)),
            PartId::Button => (Vec3::ZERO, Vec3::splat(0.05)),
        }
    }
}

impl MeshSource for BuiltinMeshSource {
    fn load(&self, part: PartId) -> Result<Geometry, MeshError> {
        let (center, half) = Self::extents(part);
        Ok(cuboid(center, half))
    }
}

/// Axis-aligned box with flat per-face normals and counter-clockwise winding
pub fn cuboid(center: Vec3, half: Vec3) -> Geometry {
    // (normal, u, v) with u x v == normal
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut geometry = Geometry::default();
    for (normal, u, v) in FACES {
        let base = geometry.positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = center + (normal + u * su + v * sv) * half;
            geometry.positions.push(corner.to_array());
            geometry.normals.push(normal.to_array());
        }
        geometry
            .indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    geometry
}

/// Coordinate axes from the origin: X red, Y green, Z blue
pub fn axes_lines(length: f32) -> MeshData {
    let axes = [
        (Vec3::X, [1.0, 0.0, 0.0, 1.0]),
        (Vec3::Y, [0.0, 1.0, 0.0, 1.0]),
        (Vec3::Z, [0.0, 0.0, 1.0, 1.0]),
    ];
    let vertices = axes
        .into_iter()
        .flat_map(|(axis, color)| {
            [
                Vertex::new(Vec3::ZERO, color, Vec3::Y),
                Vertex::new(axis * length, color, Vec3::Y),
            ]
        })
        .collect();
    MeshData::new(vertices)
}

/// White line grid on the XZ plane, one line per unit from `-half_extent`
/// to `half_extent` in both directions
pub fn grid_lines(half_extent: u32) -> MeshData {
    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    let h = half_extent as f32;
    let n = half_extent as i32;

    let mut vertices = Vec::with_capacity(4 * (2 * half_extent as usize + 1));
    for i in -n..=n {
        let t = i as f32;
        // Parallel to X
        vertices.push(Vertex::new(Vec3::new(-h, 0.0, t), WHITE, Vec3::Y));
        vertices.push(Vertex::new(Vec3::new(h, 0.0, t), WHITE, Vec3::Y));
        // Parallel to Z
        vertices.push(Vertex::new(Vec3::new(t, 0.0, -h), WHITE, Vec3::Y));
        vertices.push(Vertex::new(Vec3::new(t, 0.0, h), WHITE, Vec3::Y));
    }
    MeshData::new(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::calculate_triangle_normal;

    #[test]
    fn test_cuboid_winding_faces_outward() {
        for part in PartId::ALL {
            let (center, half) = BuiltinMeshSource::extents(part);
            let geometry = BuiltinMeshSource.load(part).unwrap();
            assert_eq!(geometry.positions.len(), 24);
            assert_eq!(geometry.indices.len(), 36);

            for tri in geometry.indices.chunks_exact(3) {
                let p = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(geometry.positions[i as usize]));
                let n = calculate_triangle_normal(p[0], p[1], p[2]);
                let stored = Vec3::from(geometry.normals[tri[0] as usize]);
                assert!(n.abs_diff_eq(stored, 1e-6), "{part}");

                let centroid = (p[0] + p[1] + p[2]) / 3.0;
                assert!(n.dot(centroid - center) > 0.0);
                assert!(((centroid - center).abs() - half).max_element() <= 1e-6);
            }
        }
    }

    #[test]
    fn test_reference_lines() {
        let axes = axes_lines(5.0);
        assert_eq!(axes.vertices.len(), 6);
        assert_eq!(axes.vertices[1].position, [5.0, 0.0, 0.0, 1.0]);
        assert_eq!(axes.vertices[5].color, [0.0, 0.0, 1.0, 1.0]);

        let grid = grid_lines(5);
        assert_eq!(grid.vertices.len(), 44);
        assert!(!grid.is_indexed());
        assert!(grid.vertices.iter().all(|v| v.position[1] == 0.0));
        assert!(
            grid.vertices
                .iter()
                .all(|v| v.position[0].abs() <= 5.0 && v.position[2].abs() <= 5.0)
        );
    }
}

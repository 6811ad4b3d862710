//! CPU mesh data and mesh sources (OBJ files, built-in primitives)

mod normals;
mod obj;
mod primitives;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::part::{ColorVariant, PartId};

pub use normals::{calculate_triangle_normal, calculate_vertex_normals};
pub use obj::{ObjMeshSource, load_obj};
pub use primitives::{BuiltinMeshSource, axes_lines, cuboid, grid_lines};

/// Interleaved vertex as uploaded to the GPU.
///
/// Position is homogeneous with `w == 1`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3, color: [f32; 4], normal: Vec3) -> Self {
        Self {
            position: position.extend(1.0).to_array(),
            color,
            normal: normal.to_array(),
        }
    }
}

/// Uncolored geometry produced by a [`MeshSource`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals; empty when the source has none
    pub normals: Vec<[f32; 3]>,
    /// Triangle list indices; empty for non-indexed geometry
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check indices reference existing vertices
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        let count = self.positions.len() as u32;
        if let Some(&index) = self.indices.iter().find(|&&i| i >= count) {
            return Err(MeshError::IndexOutOfRange { index, count });
        }
        Ok(())
    }
}

/// Colored vertex and index data for one (part, variant)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    /// Empty means non-indexed drawing
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Non-indexed mesh
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices,
            indices: Vec::new(),
        }
    }

    pub fn indexed(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Color every vertex of `geometry` with `color`.
    ///
    /// Normals are computed from the faces when the geometry carries none.
    pub fn from_geometry(geometry: &Geometry, color: [f32; 4]) -> Self {
        let computed;
        let normals = if geometry.normals.len() == geometry.positions.len() {
            &geometry.normals
        } else {
            computed = calculate_vertex_normals(&geometry.positions, &geometry.indices);
            &computed
        };

        let vertices = geometry
            .positions
            .iter()
            .zip(normals)
            .map(|(p, n)| Vertex::new(Vec3::from(*p), color, Vec3::from(*n)))
            .collect();

        Self {
            vertices,
            indices: geometry.indices.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }
}

/// Provider of per-part geometry
pub trait MeshSource {
    fn load(&self, part: PartId) -> Result<Geometry, MeshError>;
}

/// Load and color the mesh of `part`.
///
/// A failing source is logged and yields an empty mesh that draws nothing.
pub fn load_part_mesh(source: &dyn MeshSource, part: PartId, variant: ColorVariant) -> MeshData {
    let geometry = source.load(part).and_then(|g| g.validate().map(|_| g));
    match geometry {
        Ok(geometry) => MeshData::from_geometry(&geometry, part.color(variant)),
        Err(e) => {
            tracing::warn!("Failed to load mesh for {}: {}", part, e);
            MeshData::default()
        }
    }
}

/// Mesh-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty mesh: no geometry found")]
    EmptyMesh,
    #[error("Index {index} out of range for {count} vertices")]
    IndexOutOfRange { index: u32, count: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl MeshSource for Failing {
        fn load(&self, _part: PartId) -> Result<Geometry, MeshError> {
            Err(MeshError::Io("missing".into()))
        }
    }

    struct Triangle;

    impl MeshSource for Triangle {
        fn load(&self, _part: PartId) -> Result<Geometry, MeshError> {
            Ok(Geometry {
                positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                normals: Vec::new(),
                indices: vec![0, 1, 2],
            })
        }
    }

    #[test]
    fn test_vertex_layout_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 44);
    }

    #[test]
    fn test_failing_source_yields_empty_mesh() {
        let mesh = load_part_mesh(&Failing, PartId::Arm1, ColorVariant::Standard);
        assert!(mesh.is_empty());
        assert!(!mesh.is_indexed());
    }

    #[test]
    fn test_variants_share_geometry() {
        let standard = load_part_mesh(&Triangle, PartId::Top, ColorVariant::Standard);
        let highlighted = load_part_mesh(&Triangle, PartId::Top, ColorVariant::Highlighted);

        assert_eq!(standard.indices, highlighted.indices);
        for (a, b) in standard.vertices.iter().zip(&highlighted.vertices) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.normal, b.normal);
            assert_ne!(a.color, b.color);
        }
        assert_eq!(standard.vertices[0].position[3], 1.0);
        assert_eq!(standard.vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let geometry = Geometry {
            positions: vec![[0.0; 3]; 3],
            normals: Vec::new(),
            indices: vec![0, 1, 3],
        };
        assert_eq!(
            geometry.validate(),
            Err(MeshError::IndexOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(Geometry::default().validate(), Err(MeshError::EmptyMesh));
    }
}

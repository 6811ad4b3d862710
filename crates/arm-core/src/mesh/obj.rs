//! OBJ mesh source

use std::path::{Path, PathBuf};

use crate::part::PartId;

use super::{Geometry, MeshError, MeshSource};

/// Loads `<dir>/<part name>.obj` for each part
#[derive(Debug, Clone)]
pub struct ObjMeshSource {
    dir: PathBuf,
}

impl ObjMeshSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File the given part is read from
    pub fn path_for(&self, part: PartId) -> PathBuf {
        self.dir.join(format!("{}.obj", part.name()))
    }
}

impl MeshSource for ObjMeshSource {
    fn load(&self, part: PartId) -> Result<Geometry, MeshError> {
        let path = self.path_for(part);
        let geometry = load_obj(&path)?;
        tracing::debug!(
            "Loaded {} ({} vertices, {} indices)",
            path.display(),
            geometry.positions.len(),
            geometry.indices.len()
        );
        Ok(geometry)
    }
}

/// Load an OBJ file, merging all of its models into one triangle list
pub fn load_obj(path: impl AsRef<Path>) -> Result<Geometry, MeshError> {
    let path = path.as_ref();
    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &options).map_err(|e| match e {
        tobj::LoadError::OpenFileFailed | tobj::LoadError::ReadError => {
            MeshError::Io(format!("{}: {}", path.display(), e))
        }
        other => MeshError::Parse(format!("{}: {}", path.display(), other)),
    })?;

    let mut geometry = Geometry::default();
    let mut has_normals = true;

    for model in &models {
        let mesh = &model.mesh;
        let base = geometry.positions.len() as u32;

        geometry
            .positions
            .extend(mesh.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]));
        if mesh.normals.len() == mesh.positions.len() {
            geometry
                .normals
                .extend(mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]));
        } else {
            has_normals = false;
        }
        geometry.indices.extend(mesh.indices.iter().map(|i| base + i));
    }

    // Partial normals are useless; recompute for the whole mesh
    if !has_normals {
        geometry.normals.clear();
    }

    if geometry.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("arm-core-obj-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_quad_is_triangulated() {
        let path = write_temp(
            "quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );
        let geometry = load_obj(&path).unwrap();
        assert_eq!(geometry.positions.len(), 4);
        assert_eq!(geometry.indices.len(), 6);
        assert!(geometry.normals.is_empty());
        assert!(geometry.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = ObjMeshSource::new("/nonexistent/models");
        assert!(matches!(source.load(PartId::Pen), Err(MeshError::Io(_))));
        assert!(source.path_for(PartId::Pen).ends_with("pen.obj"));
    }
}

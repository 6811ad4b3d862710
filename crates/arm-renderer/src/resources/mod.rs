//! GPU resource management.
//!
//! Handle-based storage of the uploaded part meshes.

mod mesh;

pub use mesh::*;

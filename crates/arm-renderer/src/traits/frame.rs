//! Per-frame data handed to sub-renderers.

use glam::Mat4;

use crate::resources::MeshRegistry;
use crate::scene::ArmScene;

/// Everything a sub-renderer reads while drawing one frame
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a ArmScene,
    pub meshes: &'a MeshRegistry,
    pub view_proj: Mat4,
}

//! Render object definition.

use arm_core::{ColorVariant, PartId, PickId};
use glam::Mat4;

/// One part to draw this frame.
///
/// Both passes draw the same objects; the visible pass uses `variant`, the
/// picking pass uses `pick_id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderObject {
    pub part: PartId,
    /// World transform from the kinematic chain
    pub transform: Mat4,
    pub variant: ColorVariant,
    pub pick_id: PickId,
    pub visible: bool,
}

impl RenderObject {
    pub fn new(part: PartId, transform: Mat4) -> Self {
        Self {
            part,
            transform,
            variant: ColorVariant::Standard,
            pick_id: PickId::of(part),
            visible: true,
        }
    }

    pub fn with_variant(mut self, variant: ColorVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

//! Per-frame draw list.
//!
//! The scene is rebuilt every frame from the evaluated part transforms, so
//! the visible and picking passes always agree on where each part is.

mod render_object;

pub use render_object::*;

use arm_core::{ColorVariant, JointState, PartId, PartTransforms};

/// Draw list for one frame
#[derive(Debug, Clone, Default)]
pub struct ArmScene {
    objects: Vec<RenderObject>,
}

impl ArmScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// One object per part, highlighted when the part is the active target
    pub fn from_pose(transforms: &PartTransforms, joints: &JointState) -> Self {
        let objects = transforms
            .iter()
            .map(|(part, transform)| {
                RenderObject::new(part, transform)
                    .with_variant(ColorVariant::for_active(joints.is_active(part)))
            })
            .collect();
        Self { objects }
    }

    pub fn push(&mut self, object: RenderObject) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[RenderObject] {
        &self.objects
    }

    /// Objects drawn into the picking target
    pub fn pickable(&self) -> impl Iterator<Item = &RenderObject> {
        self.visible()
    }

    pub fn visible(&self) -> impl Iterator<Item = &RenderObject> {
        self.objects.iter().filter(|o| o.visible)
    }

    pub fn get(&self, part: PartId) -> Option<&RenderObject> {
        self.objects.iter().find(|o| o.part == part)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use arm_core::{Dof, KinematicChain, NoInput, PickId};

    use super::*;

    #[test]
    fn test_from_pose_highlights_active_part_only() {
        let chain = KinematicChain::robot_arm();
        let mut joints = JointState::new();
        joints.set_active(PartId::Arm2);
        joints.set_angle(Dof::Arm2Pitch, 0.8);

        let transforms = chain.evaluate(&mut joints, &mut NoInput);
        let scene = ArmScene::from_pose(&transforms, &joints);

        assert_eq!(scene.len(), PartId::COUNT);
        for object in scene.objects() {
            let expected = if object.part == PartId::Arm2 {
                ColorVariant::Highlighted
            } else {
                ColorVariant::Standard
            };
            assert_eq!(object.variant, expected);
            assert_eq!(object.transform, transforms.get(object.part));
            assert_eq!(object.pick_id, PickId::of(object.part));
        }
    }

    #[test]
    fn test_hidden_objects_are_not_pickable() {
        let mut scene = ArmScene::new();
        scene.push(RenderObject::new(PartId::Base, glam::Mat4::IDENTITY));
        scene.push(RenderObject::new(PartId::Top, glam::Mat4::IDENTITY).with_visible(false));

        let parts: Vec<PartId> = scene.pickable().map(|o| o.part).collect();
        assert_eq!(parts, vec![PartId::Base]);
        assert!(scene.get(PartId::Top).is_some());
    }
}

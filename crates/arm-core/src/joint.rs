//! Joint state: the arm's current pose and the exclusive edit target

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::part::Target;

/// A rotational degree of freedom of the arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dof {
    /// Top about the vertical axis
    TopYaw,
    /// Arm1 about the lateral axis
    Arm1Pitch,
    /// Arm2 about the lateral axis
    Arm2Pitch,
    /// Pen about the forward (Z) axis
    PenLongitude,
    /// Pen about the lateral (X) axis
    PenLatitude,
    /// Pen spin about its own long axis
    PenAxial,
}

impl Dof {
    pub const COUNT: usize = 6;

    pub const ALL: [Dof; Self::COUNT] = [
        Dof::TopYaw,
        Dof::Arm1Pitch,
        Dof::Arm2Pitch,
        Dof::PenLongitude,
        Dof::PenLatitude,
        Dof::PenAxial,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Current pose of every joint plus the active edit target.
///
/// Angles are radians and unconstrained; wrapping is left to the matrices.
/// Activation is held as a single `Option`, so at most one target can be
/// active at any time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JointState {
    base_translation: Vec3,
    angles: [f32; Dof::COUNT],
    active: Option<Target>,
}

impl JointState {
    /// Rest pose, nothing active
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle(&self, dof: Dof) -> f32 {
        self.angles[dof.index()]
    }

    pub fn set_angle(&mut self, dof: Dof, radians: f32) {
        self.angles[dof.index()] = radians;
    }

    pub fn add_angle(&mut self, dof: Dof, delta: f32) {
        self.angles[dof.index()] += delta;
    }

    /// Translation of the base joint
    pub fn translation(&self) -> Vec3 {
        self.base_translation
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.base_translation = translation;
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.base_translation += delta;
    }

    /// Toggle activation of `target`.
    ///
    /// If `target` is already active nothing is active afterwards; otherwise
    /// `target` becomes the only active target.
    pub fn set_active(&mut self, target: impl Into<Target>) {
        let target = target.into();
        if self.active == Some(target) {
            self.active = None;
        } else {
            self.active = Some(target);
        }
        tracing::debug!("Active target: {:?}", self.active);
    }

    pub fn is_active(&self, target: impl Into<Target>) -> bool {
        self.active == Some(target.into())
    }

    /// The active target, if any
    pub fn active(&self) -> Option<Target> {
        self.active
    }

    /// Deactivate whatever is active
    pub fn clear_active(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::PartId;

    fn active_count(state: &JointState) -> usize {
        let parts = PartId::ALL.iter().filter(|p| state.is_active(**p)).count();
        parts + usize::from(state.is_active(Target::Camera))
    }

    #[test]
    fn test_set_active_is_exclusive() {
        let mut state = JointState::new();
        let sequence = [
            Target::Part(PartId::Base),
            Target::Part(PartId::Top),
            Target::Camera,
            Target::Part(PartId::Pen),
            Target::Part(PartId::Pen),
            Target::Part(PartId::Arm1),
            Target::Camera,
        ];

        for target in sequence {
            state.set_active(target);
            assert!(active_count(&state) <= 1);
        }
        assert_eq!(state.active(), Some(Target::Camera));
        assert!(!state.is_active(PartId::Arm1));
    }

    #[test]
    fn test_set_active_twice_deactivates() {
        let mut state = JointState::new();
        state.set_active(PartId::Top);
        assert!(state.is_active(PartId::Top));

        state.set_active(PartId::Top);
        assert_eq!(state.active(), None);
        assert_eq!(active_count(&state), 0);
    }

    #[test]
    fn test_angles_are_independent() {
        let mut state = JointState::new();
        state.set_angle(Dof::Arm1Pitch, 1.5);
        state.add_angle(Dof::Arm1Pitch, -0.5);
        state.set_angle(Dof::PenAxial, -7.0);

        assert_eq!(state.angle(Dof::Arm1Pitch), 1.0);
        assert_eq!(state.angle(Dof::PenAxial), -7.0);
        for dof in Dof::ALL {
            if dof != Dof::Arm1Pitch && dof != Dof::PenAxial {
                assert_eq!(state.angle(dof), 0.0);
            }
        }
    }

    #[test]
    fn test_translation_accumulates() {
        let mut state = JointState::new();
        state.translate(Vec3::X);
        state.translate(Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(state.translation(), Vec3::new(1.0, 0.0, 2.0));
    }
}

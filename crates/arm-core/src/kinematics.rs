//! Forward kinematics for the arm
//!
//! A [`KinematicChain`] is an ordered list of links, parents before children.
//! Each link contributes `T(offset) * dynamic` where `dynamic` comes from the
//! current [`JointState`]. World matrices are composed root to leaf by
//! post-multiplication and recomputed from scratch on every evaluation.

use glam::{Mat4, Vec3};

use crate::joint::{Dof, JointState};
use crate::part::{PartId, Target};

/// Rotation axis in the link's local frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Rotation matrix about this axis
    pub fn rotation(self, radians: f32) -> Mat4 {
        match self {
            Axis::X => Mat4::from_rotation_x(radians),
            Axis::Y => Mat4::from_rotation_y(radians),
            Axis::Z => Mat4::from_rotation_z(radians),
        }
    }
}

/// Dynamic part of a link, applied after its static offset
#[derive(Debug, Clone, PartialEq)]
pub enum Articulation {
    /// Inherits ancestor transforms only
    Fixed,
    /// Translated by the joint state's base translation
    Translate,
    /// Rotations applied in order, each about an axis by a joint angle
    Rotate(Vec<(Axis, Dof)>),
}

/// One entry of the chain
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub part: PartId,
    pub parent: Option<PartId>,
    /// Translation in the parent's frame applied before the articulation
    pub offset: Vec3,
    pub articulation: Articulation,
}

impl Link {
    pub fn new(
        part: PartId,
        parent: Option<PartId>,
        offset: Vec3,
        articulation: Articulation,
    ) -> Self {
        Self {
            part,
            parent,
            offset,
            articulation,
        }
    }

    /// Matrix of the articulation at the current pose
    pub fn dynamic_transform(&self, joints: &JointState) -> Mat4 {
        match &self.articulation {
            Articulation::Fixed => Mat4::IDENTITY,
            Articulation::Translate => Mat4::from_translation(joints.translation()),
            Articulation::Rotate(axes) => axes
                .iter()
                .fold(Mat4::IDENTITY, |acc, (axis, dof)| {
                    acc * axis.rotation(joints.angle(*dof))
                }),
        }
    }

    /// Static offset followed by the articulation
    pub fn local_transform(&self, joints: &JointState) -> Mat4 {
        Mat4::from_translation(self.offset) * self.dynamic_transform(joints)
    }
}

/// Computes a part's new pose from live input.
///
/// Called by [`KinematicChain::evaluate`] for the active part, right before
/// that part's joint values are read.
pub trait PoseDriver {
    fn drive(&mut self, part: PartId, joints: &mut JointState);
}

/// Driver that never changes the pose
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl PoseDriver for NoInput {
    fn drive(&mut self, _part: PartId, _joints: &mut JointState) {}
}

/// World matrix of every part for one frame.
///
/// Parts missing from the chain keep the identity matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartTransforms([Mat4; PartId::COUNT]);

impl PartTransforms {
    pub fn get(&self, part: PartId) -> Mat4 {
        self.0[part.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PartId, Mat4)> + '_ {
        PartId::ALL.iter().map(|p| (*p, self.0[p.index()]))
    }
}

impl Default for PartTransforms {
    fn default() -> Self {
        Self([Mat4::IDENTITY; PartId::COUNT])
    }
}

/// Errors building a custom chain
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("part {0} appears more than once")]
    DuplicatePart(PartId),
    #[error("parent {parent} of {part} is not listed before it")]
    MissingParent { part: PartId, parent: PartId },
}

/// Parent-ordered list of links
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicChain {
    links: Vec<Link>,
    slots: [Option<usize>; PartId::COUNT],
}

impl KinematicChain {
    /// Build a chain, checking every parent precedes its children
    pub fn new(links: Vec<Link>) -> Result<Self, ChainError> {
        let mut slots = [None; PartId::COUNT];
        for (i, link) in links.iter().enumerate() {
            if slots[link.part.index()].is_some() {
                return Err(ChainError::DuplicatePart(link.part));
            }
            if let Some(parent) = link.parent {
                if slots[parent.index()].is_none() {
                    return Err(ChainError::MissingParent {
                        part: link.part,
                        parent,
                    });
                }
            }
            slots[link.part.index()] = Some(i);
        }
        Ok(Self { links, slots })
    }

    /// The robot arm: base → top → arm1 → joint → arm2 → pen → button
    pub fn robot_arm() -> Self {
        use Articulation::{Fixed, Rotate, Translate};

        let links = vec![
            Link::new(PartId::Base, None, Vec3::ZERO, Translate),
            Link::new(
                PartId::Top,
                Some(PartId::Base),
                Vec3::new(0.0, 1.0, 0.0),
                Rotate(vec![(Axis::Y, Dof::TopYaw)]),
            ),
            Link::new(
                PartId::Arm1,
                Some(PartId::Top),
                Vec3::new(0.0, 0.4, 0.0),
                Rotate(vec![(Axis::X, Dof::Arm1Pitch)]),
            ),
            Link::new(
                PartId::Joint,
                Some(PartId::Arm1),
                Vec3::new(0.0, 1.25, 0.0),
                Fixed,
            ),
            Link::new(
                PartId::Arm2,
                Some(PartId::Joint),
                Vec3::ZERO,
                Rotate(vec![(Axis::X, Dof::Arm2Pitch)]),
            ),
            Link::new(
                PartId::Pen,
                Some(PartId::Arm2),
                Vec3::new(0.0, 1.0, 0.0),
                Rotate(vec![
                    (Axis::Z, Dof::PenLongitude),
                    (Axis::X, Dof::PenLatitude),
                    (Axis::Y, Dof::PenAxial),
                ]),
            ),
            Link::new(
                PartId::Button,
                Some(PartId::Pen),
                Vec3::new(0.0, 0.25, 0.1),
                Fixed,
            ),
        ];

        // The table above is parent-ordered by construction.
        let mut slots = [None; PartId::COUNT];
        for (i, link) in links.iter().enumerate() {
            slots[link.part.index()] = Some(i);
        }
        Self { links, slots }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link(&self, part: PartId) -> Option<&Link> {
        self.slots[part.index()].map(|i| &self.links[i])
    }

    pub fn parent(&self, part: PartId) -> Option<PartId> {
        self.link(part).and_then(|l| l.parent)
    }

    /// `T(offset) * dynamic` of a single part; identity if absent
    pub fn local_transform(&self, part: PartId, joints: &JointState) -> Mat4 {
        self.link(part)
            .map(|l| l.local_transform(joints))
            .unwrap_or(Mat4::IDENTITY)
    }

    /// World matrix of a part at the current pose
    pub fn world_transform(&self, part: PartId, joints: &JointState) -> Mat4 {
        // Build ancestor chain from leaf to root
        let mut chain = Vec::new();
        let mut current = self.link(part);
        while let Some(link) = current {
            chain.push(link);
            current = link.parent.and_then(|p| self.link(p));
        }

        // Apply from root to leaf
        chain
            .into_iter()
            .rev()
            .fold(Mat4::IDENTITY, |acc, link| acc * link.local_transform(joints))
    }

    /// Evaluate the whole chain for this frame.
    ///
    /// The active part is handed to `driver` before its joint values are
    /// read, so live input lands in the same frame.
    pub fn evaluate(&self, joints: &mut JointState, driver: &mut dyn PoseDriver) -> PartTransforms {
        let mut transforms = PartTransforms::default();

        for link in &self.links {
            if joints.is_active(Target::Part(link.part)) {
                driver.drive(link.part, joints);
            }

            let parent = link
                .parent
                .map(|p| transforms.0[p.index()])
                .unwrap_or(Mat4::IDENTITY);
            transforms.0[link.part.index()] = parent * link.local_transform(joints);
        }

        transforms
    }
}

impl Default for KinematicChain {
    fn default() -> Self {
        Self::robot_arm()
    }
}

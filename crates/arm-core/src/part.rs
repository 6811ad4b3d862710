//! Part identities and color variants

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a drawable part of the arm.
///
/// The discriminant doubles as the part's index in per-part tables and as
/// its pick id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PartId {
    Base = 0,
    Top = 1,
    Arm1 = 2,
    Joint = 3,
    Arm2 = 4,
    Pen = 5,
    Button = 6,
}

impl PartId {
    /// Number of parts.
    pub const COUNT: usize = 7;

    /// All parts in root-to-leaf order
    pub const ALL: [PartId; Self::COUNT] = [
        PartId::Base,
        PartId::Top,
        PartId::Arm1,
        PartId::Joint,
        PartId::Arm2,
        PartId::Pen,
        PartId::Button,
    ];

    /// Table index of this part
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a part by table index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lowercase display name, also the mesh file stem
    pub fn name(self) -> &'static str {
        match self {
            PartId::Base => "base",
            PartId::Top => "top",
            PartId::Arm1 => "arm1",
            PartId::Joint => "joint",
            PartId::Arm2 => "arm2",
            PartId::Pen => "pen",
            PartId::Button => "button",
        }
    }

    /// Whether the part has a highlighted color variant.
    ///
    /// Only articulated parts can be edit targets, so only they get one.
    pub fn has_highlight(self) -> bool {
        !matches!(self, PartId::Joint | PartId::Button)
    }

    /// Per-vertex color of the given variant (RGBA).
    ///
    /// Parts without a highlight variant return the standard color.
    pub fn color(self, variant: ColorVariant) -> [f32; 4] {
        let highlighted = variant == ColorVariant::Highlighted && self.has_highlight();
        match (self, highlighted) {
            (PartId::Base, false) => [1.0, 0.0, 0.0, 1.0],
            (PartId::Base, true) => [1.0, 0.75, 0.75, 1.0],
            (PartId::Top, false) => [0.0, 1.0, 0.0, 1.0],
            (PartId::Top, true) => [0.75, 1.0, 0.75, 1.0],
            (PartId::Arm1, false) => [0.0, 0.0, 1.0, 1.0],
            (PartId::Arm1, true) => [0.75, 0.75, 1.0, 1.0],
            (PartId::Arm2, false) => [0.0, 1.0, 1.0, 1.0],
            (PartId::Arm2, true) => [0.75, 1.0, 1.0, 1.0],
            (PartId::Pen, false) => [1.0, 1.0, 0.0, 1.0],
            (PartId::Pen, true) => [1.0, 1.0, 0.75, 1.0],
            (PartId::Joint, _) => [1.0, 0.0, 1.0, 1.0],
            (PartId::Button, _) => [1.0, 0.0, 0.0, 1.0],
        }
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Color variant of a part mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorVariant {
    #[default]
    Standard,
    Highlighted,
}

impl ColorVariant {
    /// Both variants
    pub const ALL: [ColorVariant; 2] = [ColorVariant::Standard, ColorVariant::Highlighted];

    /// Variant to draw for a part with the given activation state
    pub fn for_active(active: bool) -> Self {
        if active {
            ColorVariant::Highlighted
        } else {
            ColorVariant::Standard
        }
    }
}

/// Receiver of user pose edits: the camera or one of the parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Camera,
    Part(PartId),
}

impl From<PartId> for Target {
    fn from(part: PartId) -> Self {
        Target::Part(part)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Camera => f.write_str("camera"),
            Target::Part(part) => part.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for part in PartId::ALL {
            assert_eq!(PartId::from_index(part.index()), Some(part));
        }
        assert_eq!(PartId::from_index(PartId::COUNT), None);
    }

    #[test]
    fn test_highlight_differs_only_for_articulated_parts() {
        for part in PartId::ALL {
            let standard = part.color(ColorVariant::Standard);
            let highlighted = part.color(ColorVariant::Highlighted);
            assert_eq!(standard != highlighted, part.has_highlight(), "{part}");
        }
    }
}

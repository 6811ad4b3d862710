//! Color-coded pick identities and the picking state machine
//!
//! Every pickable part is drawn in the picking pass with a flat color whose
//! red channel carries its [`PickId`]. The target is cleared to white, so a
//! red value of [`PickId::BACKGROUND`] means nothing was hit.

use std::fmt;

use glam::{UVec2, Vec2};

use crate::part::PartId;

/// Pick identity stored in the red channel of the picking target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickId(u8);

impl PickId {
    /// Sentinel for "nothing hit"; the picking target is cleared to it
    pub const BACKGROUND: PickId = PickId(255);

    /// Pick id of a part
    pub fn of(part: PartId) -> Self {
        Self(part as u8)
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    pub fn from_raw(value: u8) -> Self {
        Self(value)
    }

    pub fn is_background(self) -> bool {
        self == Self::BACKGROUND
    }

    /// The part this id names, `None` for the sentinel or unknown values
    pub fn part(self) -> Option<PartId> {
        if self.is_background() {
            return None;
        }
        PartId::from_index(self.0 as usize)
    }

    /// Flat RGBA color written by the picking shader
    pub fn color(self) -> [f32; 4] {
        [self.0 as f32 / 255.0, 0.0, 0.0, 1.0]
    }
}

/// Outcome of a single pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickResult {
    #[default]
    Background,
    Part(PartId),
}

impl PickResult {
    /// Decode a sampled RGBA texel
    pub fn decode(sample: [u8; 4]) -> Self {
        match PickId::from_raw(sample[0]).part() {
            Some(part) => PickResult::Part(part),
            None => PickResult::Background,
        }
    }

    pub fn part(self) -> Option<PartId> {
        match self {
            PickResult::Background => None,
            PickResult::Part(part) => Some(part),
        }
    }
}

impl fmt::Display for PickResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickResult::Background => f.write_str("background"),
            PickResult::Part(part) => part.fmt(f),
        }
    }
}

/// Map a cursor position in physical pixels (origin top-left) to the texel
/// under it. Returns `None` outside the surface.
pub fn texel_at(cursor: Vec2, surface: UVec2) -> Option<UVec2> {
    if !cursor.is_finite() || cursor.x < 0.0 || cursor.y < 0.0 {
        return None;
    }
    let texel = cursor.floor().as_uvec2();
    if texel.x >= surface.x || texel.y >= surface.y {
        return None;
    }
    Some(texel)
}

/// Phase of the picking state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PickPhase {
    #[default]
    Idle,
    /// A pick at `cursor` is waiting for its readback
    Picking { cursor: Vec2 },
}

/// Picking state machine: `Idle -> Picking` on a primary press, back to
/// `Idle` after exactly one readback.
///
/// The result is published as a status string and never touches joint
/// activation.
#[derive(Debug, Clone, Default)]
pub struct PickEngine {
    phase: PickPhase,
    last: Option<PickResult>,
    status: String,
}

impl PickEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PickPhase {
        self.phase
    }

    /// Start a pick. Returns false if one is already in flight.
    pub fn begin(&mut self, cursor: Vec2) -> bool {
        match self.phase {
            PickPhase::Idle => {
                self.phase = PickPhase::Picking { cursor };
                true
            }
            PickPhase::Picking { .. } => false,
        }
    }

    /// Finish the pending pick with the sampled texel.
    ///
    /// `None` (cursor outside the surface, failed readback) resolves to
    /// background. Always returns to `Idle`.
    pub fn resolve(&mut self, sample: Option<[u8; 4]>) -> PickResult {
        let result = sample.map(PickResult::decode).unwrap_or_default();
        if let PickPhase::Picking { cursor } = self.phase {
            tracing::info!("Picked {} at ({:.0}, {:.0})", result, cursor.x, cursor.y);
        }
        self.phase = PickPhase::Idle;
        self.last = Some(result);
        self.status = result.to_string();
        result
    }

    /// Result of the most recent pick
    pub fn last(&self) -> Option<PickResult> {
        self.last
    }

    /// Human-readable last pick, empty before the first pick
    pub fn status(&self) -> &str {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_sentinel_is_background() {
        assert_eq!(PickResult::decode([255, 0, 0, 255]), PickResult::Background);
        assert_eq!(PickResult::decode([255, 255, 255, 255]), PickResult::Background);
        assert!(PickId::BACKGROUND.part().is_none());
    }

    #[test]
    fn test_part_ids_are_a_bijection() {
        let mut raws = HashSet::new();
        let mut colors = HashSet::new();
        for part in PartId::ALL {
            let id = PickId::of(part);
            assert!(!id.is_background());
            assert!(raws.insert(id.raw()));
            assert!(colors.insert(id.color().map(f32::to_bits)));
            assert_eq!(id.part(), Some(part));
            assert_eq!(PickResult::decode([id.raw(), 0, 0, 255]), PickResult::Part(part));
        }
    }

    #[test]
    fn test_unknown_id_is_background() {
        assert_eq!(PickResult::decode([PartId::COUNT as u8, 0, 0, 255]), PickResult::Background);
        assert_eq!(PickResult::decode([200, 0, 0, 255]), PickResult::Background);
    }

    #[test]
    fn test_color_round_trips_through_unorm() {
        for part in PartId::ALL {
            let id = PickId::of(part);
            let stored = (id.color()[0] * 255.0).round() as u8;
            assert_eq!(stored, id.raw());
        }
    }

    #[test]
    fn test_texel_at_bounds() {
        let surface = UVec2::new(640, 480);
        assert_eq!(texel_at(Vec2::new(0.0, 0.0), surface), Some(UVec2::ZERO));
        assert_eq!(texel_at(Vec2::new(639.9, 479.9), surface), Some(UVec2::new(639, 479)));
        assert_eq!(texel_at(Vec2::new(640.0, 10.0), surface), None);
        assert_eq!(texel_at(Vec2::new(10.0, 480.0), surface), None);
        assert_eq!(texel_at(Vec2::new(-0.5, 10.0), surface), None);
        assert_eq!(texel_at(Vec2::new(f32::NAN, 10.0), surface), None);
        assert_eq!(texel_at(Vec2::new(1.0, 1.0), UVec2::ZERO), None);
    }

    #[test]
    fn test_engine_round_trip() {
        let mut engine = PickEngine::new();
        assert_eq!(engine.status(), "");

        assert!(engine.begin(Vec2::new(10.0, 20.0)));
        assert!(!engine.begin(Vec2::new(30.0, 40.0)));
        assert!(matches!(engine.phase(), PickPhase::Picking { .. }));

        let result = engine.resolve(Some([PickId::of(PartId::Arm2).raw(), 0, 0, 255]));
        assert_eq!(result, PickResult::Part(PartId::Arm2));
        assert_eq!(engine.phase(), PickPhase::Idle);
        assert_eq!(engine.status(), "arm2");
    }

    #[test]
    fn test_missing_sample_reads_background() {
        let mut engine = PickEngine::new();
        engine.begin(Vec2::new(-5.0, -5.0));
        assert_eq!(engine.resolve(None), PickResult::Background);
        assert_eq!(engine.status(), "background");
        assert_eq!(engine.last(), Some(PickResult::Background));
    }
}

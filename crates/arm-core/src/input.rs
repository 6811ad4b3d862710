//! Input routing: key and pointer events to selection toggles and pose deltas

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::joint::{Dof, JointState};
use crate::kinematics::PoseDriver;
use crate::part::{PartId, Target};

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    C,
    B,
    T,
    Num1,
    Num2,
    P,
    Shift,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

impl Key {
    /// Selection target bound to this key
    pub fn target(self) -> Option<Target> {
        match self {
            Key::C => Some(Target::Camera),
            Key::B => Some(Target::Part(PartId::Base)),
            Key::T => Some(Target::Part(PartId::Top)),
            Key::Num1 => Some(Target::Part(PartId::Arm1)),
            Key::Num2 => Some(Target::Part(PartId::Arm2)),
            Key::P => Some(Target::Part(PartId::Pen)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Window-system independent input event.
///
/// Positions are physical pixels relative to the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: Key, pressed: bool },
    PointerPressed { button: PointerButton, position: Vec2 },
    PointerDragged { delta: Vec2 },
}

/// Input tuning, part of the app config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Radians (or units for the base) per dragged pixel
    pub drag_sensitivity: f32,
    /// Radians per second while an arrow key is held
    pub rotate_rate: f32,
    /// Units per second while an arrow key is held with the base active
    pub translate_rate: f32,
    /// Multiplier applied to camera orbit deltas
    pub orbit_rate: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.01,
            rotate_rate: 1.5,
            translate_rate: 2.0,
            orbit_rate: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct HeldArrows {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl HeldArrows {
    fn set(&mut self, key: Key, pressed: bool) -> bool {
        let slot = match key {
            Key::ArrowLeft => &mut self.left,
            Key::ArrowRight => &mut self.right,
            Key::ArrowUp => &mut self.up,
            Key::ArrowDown => &mut self.down,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Unit direction, x right and y up
    fn axis(&self) -> Vec2 {
        let x = f32::from(u8::from(self.right)) - f32::from(u8::from(self.left));
        let y = f32::from(u8::from(self.up)) - f32::from(u8::from(self.down));
        Vec2::new(x, y)
    }
}

/// Turns input events into selection toggles, pick requests and pose deltas.
///
/// Deltas accumulate over a frame and are handed to the active target
/// exactly once, either through [`PoseDriver::drive`] during chain
/// evaluation or through [`InputRouter::take_camera_orbit`].
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    settings: InputSettings,
    alternate_mode: bool,
    held: HeldArrows,
    /// Dragged distance this frame, scaled, x right and y up
    drag: Vec2,
    /// Frame time not yet consumed by held keys
    dt: f32,
    pick_request: Option<Vec2>,
}

impl InputRouter {
    pub fn new(settings: InputSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &InputSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: InputSettings) {
        self.settings = settings;
    }

    /// Whether Shift has switched the pen to axial spin
    pub fn alternate_mode(&self) -> bool {
        self.alternate_mode
    }

    /// Start a new frame. Deltas left over from the previous frame are dropped.
    pub fn begin_frame(&mut self, dt: f32) {
        self.drag = Vec2::ZERO;
        self.dt = dt.max(0.0);
    }

    /// Apply one event
    pub fn handle(&mut self, event: InputEvent, joints: &mut JointState) {
        match event {
            InputEvent::Key { key, pressed } => {
                if self.held.set(key, pressed) || !pressed {
                    return;
                }
                if key == Key::Shift {
                    self.alternate_mode = !self.alternate_mode;
                    tracing::debug!("Alternate mode: {}", self.alternate_mode);
                } else if let Some(target) = key.target() {
                    joints.set_active(target);
                }
            }
            InputEvent::PointerPressed { button, position } => {
                if button == PointerButton::Primary {
                    self.pick_request = Some(position);
                }
            }
            InputEvent::PointerDragged { delta } => {
                // Screen y grows downward; controls treat up as positive
                self.drag += Vec2::new(delta.x, -delta.y) * self.settings.drag_sensitivity;
            }
        }
    }

    /// Cursor position of a pending primary press
    pub fn take_pick_request(&mut self) -> Option<Vec2> {
        self.pick_request.take()
    }

    /// Orbit (yaw, pitch) in radians for this frame when the camera is
    /// the active target
    pub fn take_camera_orbit(&mut self, joints: &JointState) -> Option<Vec2> {
        if !joints.is_active(Target::Camera) {
            return None;
        }
        let delta = self.take_delta(self.settings.rotate_rate) * self.settings.orbit_rate;
        (delta != Vec2::ZERO).then_some(delta)
    }

    fn take_delta(&mut self, rate: f32) -> Vec2 {
        let delta = self.drag + self.held.axis() * rate * self.dt;
        self.drag = Vec2::ZERO;
        self.dt = 0.0;
        delta
    }
}

impl PoseDriver for InputRouter {
    fn drive(&mut self, part: PartId, joints: &mut JointState) {
        let rate = match part {
            PartId::Base => self.settings.translate_rate,
            _ => self.settings.rotate_rate,
        };
        let delta = self.take_delta(rate);
        if delta == Vec2::ZERO {
            return;
        }

        match part {
            PartId::Base => joints.translate(Vec3::new(delta.x, 0.0, delta.y)),
            PartId::Top => joints.add_angle(Dof::TopYaw, delta.x),
            PartId::Arm1 => joints.add_angle(Dof::Arm1Pitch, delta.y),
            PartId::Arm2 => joints.add_angle(Dof::Arm2Pitch, delta.y),
            PartId::Pen if self.alternate_mode => joints.add_angle(Dof::PenAxial, delta.x),
            PartId::Pen => {
                joints.add_angle(Dof::PenLongitude, delta.x);
                joints.add_angle(Dof::PenLatitude, delta.y);
            }
            PartId::Joint | PartId::Button => {}
        }
    }
}

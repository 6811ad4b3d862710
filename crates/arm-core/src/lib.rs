//! Arm Viewer Core
//!
//! Renderer-independent logic for the articulated arm viewer:
//! - Part: part identities, color variants and palette
//! - JointState: current pose and the exclusive edit target
//! - KinematicChain: forward kinematics from joint state to world matrices
//! - Pick: pick identities and the picking state machine
//! - InputRouter: key/pointer events to selection toggles and pose deltas
//! - Mesh: CPU vertex data and mesh sources (OBJ files, built-in primitives)

pub mod input;
pub mod joint;
pub mod kinematics;
pub mod mesh;
pub mod part;
pub mod pick;

pub use input::*;
pub use joint::*;
pub use kinematics::*;
pub use mesh::*;
pub use part::*;
pub use pick::*;

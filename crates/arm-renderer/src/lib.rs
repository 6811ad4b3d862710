//! Arm Viewer Renderer
//!
//! wgpu rendering for the articulated arm viewer.
//!
//! # Architecture
//!
//! - [`context::RenderContext`] - GPU context abstraction and checked shader creation
//! - [`resources::MeshRegistry`] - per (part, color variant) GPU meshes
//! - [`scene::ArmScene`] - draw list built from one frame's part transforms
//! - [`plugin::RendererRegistry`] - priority-ordered sub-renderers for the visible pass
//! - [`picking::PickingPass`] - identity-color pass with single-texel readback
//! - [`Renderer`] - owns all of the above and renders into an offscreen target
//!
//! # Example
//!
//! ```ignore
//! use arm_core::{BuiltinMeshSource, JointState, KinematicChain, NoInput};
//! use arm_renderer::{ArmScene, Renderer, RendererConfig};
//!
//! let mut renderer = Renderer::new(device, queue, format, 800, 600, RendererConfig::default(),
//!     Box::new(BuiltinMeshSource))?;
//!
//! let transforms = KinematicChain::robot_arm().evaluate(&mut joints, &mut NoInput);
//! let scene = ArmScene::from_pose(&transforms, &joints);
//! let sample = renderer.pick(&scene, cursor);
//! renderer.render(&scene);
//! ```

pub mod camera;
pub mod config;
pub mod context;
pub mod error;
pub mod picking;
pub mod pipeline;
pub mod plugin;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod sub_renderers;
pub mod traits;
pub mod vertex;

pub use camera::{CameraUniform, OrbitCamera};
pub use config::{CameraConfig, RendererConfig};
pub use context::RenderContext;
pub use error::{RenderError, UploadError};
pub use picking::PickingPass;
pub use plugin::RendererRegistry;
pub use renderer::Renderer;
pub use resources::{GpuMesh, MeshHandle, MeshRegistry};
pub use scene::{ArmScene, RenderObject};
pub use traits::{Frame, SubRenderer};

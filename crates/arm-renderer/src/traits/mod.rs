//! Core traits for the renderer system.

mod frame;
mod sub_renderer;

pub use frame::*;
pub use sub_renderer::*;

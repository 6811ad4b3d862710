//! Built-in sub-renderers of the visible pass.
//!
//! - [`LinesRenderer`]: world-space reference lines (grid, axes)
//! - [`ArmRenderer`]: lit part meshes with active-part highlighting

pub mod arm;
pub mod lines;

pub use arm::ArmRenderer;
pub use lines::LinesRenderer;

/// Render priorities for sub-renderers.
pub mod priorities {
    /// Grid is rendered first (background)
    pub const GRID: i32 = 0;
    /// The arm is the main content
    pub const ARM: i32 = 100;
    /// Axes are rendered after the arm
    pub const AXES: i32 = 200;
}

/// Registry names of the built-in sub-renderers
pub mod names {
    pub const GRID: &str = "grid";
    pub const ARM: &str = "arm";
    pub const AXES: &str = "axes";
}

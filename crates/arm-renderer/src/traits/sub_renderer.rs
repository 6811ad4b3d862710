//! SubRenderer trait definition.

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::traits::Frame;

/// A composable unit of the visible pass.
///
/// # Priority
///
/// Sub-renderers are executed in order of their priority (lower values first):
/// - 0-99: Background elements (grid)
/// - 100-199: Main geometry (the arm)
/// - 200-299: Overlays (axes)
pub trait SubRenderer: Send + Sync {
    fn name(&self) -> &str;

    /// Render priority (lower = rendered first).
    fn priority(&self) -> i32;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Create GPU resources (pipelines, buffers, etc.).
    fn on_init(&mut self, ctx: &RenderContext) -> Result<(), RenderError>;

    /// Called when the viewport is resized.
    fn on_resize(&mut self, _ctx: &RenderContext, _width: u32, _height: u32) {}

    /// Upload per-frame data. Called once per frame before the render pass.
    fn prepare(&mut self, ctx: &RenderContext, frame: &Frame<'_>);

    /// Set pipeline and bind groups and issue draw calls.
    fn render(&self, pass: &mut wgpu::RenderPass<'_>, ctx: &RenderContext, frame: &Frame<'_>);
}

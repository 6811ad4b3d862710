//! Registry of the visible pass's sub-renderers.

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::traits::{Frame, SubRenderer};

/// Priority-ordered collection of sub-renderers.
///
/// The registry handles their lifecycle (initialization, per-frame
/// preparation, drawing).
pub struct RendererRegistry {
    sub_renderers: Vec<Box<dyn SubRenderer>>,
    sorted: bool,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self {
            sub_renderers: Vec::new(),
            sorted: true,
        }
    }

    pub fn register<R: SubRenderer + 'static>(&mut self, renderer: R) {
        self.sub_renderers.push(Box::new(renderer));
        self.sorted = false;
    }

    /// Removes a sub-renderer by name.
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn SubRenderer>> {
        let pos = self.sub_renderers.iter().position(|r| r.name() == name)?;
        Some(self.sub_renderers.remove(pos))
    }

    pub fn get(&self, name: &str) -> Option<&dyn SubRenderer> {
        self.sub_renderers
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.as_ref())
    }

    pub fn get_mut<'a>(&'a mut self, name: &str) -> Option<&'a mut (dyn SubRenderer + 'a)> {
        for renderer in &mut self.sub_renderers {
            if renderer.name() == name {
                return Some(renderer.as_mut());
            }
        }
        None
    }

    /// Enable or disable a sub-renderer; returns false if it isn't registered
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.get_mut(name) {
            Some(renderer) => {
                renderer.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sub_renderers.iter().any(|r| r.name() == name)
    }

    pub fn len(&self) -> usize {
        self.sub_renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sub_renderers.is_empty()
    }

    /// Sub-renderers in their current order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn SubRenderer> {
        self.sub_renderers.iter().map(|r| r.as_ref())
    }

    fn ensure_sorted(&mut self) {
        if !self.sorted {
            self.sub_renderers.sort_by_key(|r| r.priority());
            self.sorted = true;
        }
    }

    /// Initializes all sub-renderers, stopping at the first failure.
    pub fn init_all(&mut self, ctx: &RenderContext) -> Result<(), RenderError> {
        self.ensure_sorted();
        for renderer in &mut self.sub_renderers {
            renderer.on_init(ctx)?;
            tracing::debug!("Initialized sub-renderer '{}'", renderer.name());
        }
        Ok(())
    }

    pub fn resize_all(&mut self, ctx: &RenderContext, width: u32, height: u32) {
        for renderer in &mut self.sub_renderers {
            renderer.on_resize(ctx, width, height);
        }
    }

    pub fn prepare_all(&mut self, ctx: &RenderContext, frame: &Frame<'_>) {
        self.ensure_sorted();
        for renderer in &mut self.sub_renderers {
            if renderer.is_enabled() {
                renderer.prepare(ctx, frame);
            }
        }
    }

    /// Renders all enabled sub-renderers in priority order.
    pub fn render_all(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        ctx: &RenderContext,
        frame: &Frame<'_>,
    ) {
        for renderer in &self.sub_renderers {
            if renderer.is_enabled() {
                renderer.render(pass, ctx, frame);
            }
        }
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRenderer {
        name: String,
        priority: i32,
        enabled: bool,
    }

    impl TestRenderer {
        fn new(name: &str, priority: i32) -> Self {
            Self {
                name: name.to_string(),
                priority,
                enabled: true,
            }
        }
    }

    impl SubRenderer for TestRenderer {
        fn name(&self) -> &str {
            &self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }

        fn on_init(&mut self, _ctx: &RenderContext) -> Result<(), RenderError> {
            Ok(())
        }
        fn prepare(&mut self, _ctx: &RenderContext, _frame: &Frame<'_>) {}
        fn render(
            &self,
            _pass: &mut wgpu::RenderPass<'_>,
            _ctx: &RenderContext,
            _frame: &Frame<'_>,
        ) {
        }
    }

    #[test]
    fn test_registry_ordering() {
        let mut registry = RendererRegistry::new();

        registry.register(TestRenderer::new("axes", 200));
        registry.register(TestRenderer::new("grid", 0));
        registry.register(TestRenderer::new("arm", 100));

        registry.ensure_sorted();

        let names: Vec<&str> = registry.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["grid", "arm", "axes"]);
    }

    #[test]
    fn test_registry_toggle_and_unregister() {
        let mut registry = RendererRegistry::new();
        registry.register(TestRenderer::new("grid", 0));

        assert!(registry.set_enabled("grid", false));
        assert_eq!(registry.get("grid").map(|r| r.is_enabled()), Some(false));
        assert!(!registry.set_enabled("missing", true));

        assert!(registry.unregister("grid").is_some());
        assert!(!registry.contains("grid"));
        assert!(registry.is_empty());
    }
}

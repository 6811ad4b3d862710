//! Line-list sub-renderer for the grid and coordinate axes

use arm_core::{MeshData, Vertex};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::pipeline::PipelineConfig;
use crate::traits::{Frame, SubRenderer};
use crate::vertex::VertexLayout;

/// Draws a fixed world-space line list in per-vertex colors.
///
/// Not part of the picking pass.
pub struct LinesRenderer {
    name: &'static str,
    priority: i32,
    enabled: bool,
    lines: MeshData,
    pipeline: Option<wgpu::RenderPipeline>,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
}

impl LinesRenderer {
    pub fn new(name: &'static str, priority: i32, lines: MeshData) -> Self {
        Self {
            name,
            priority,
            enabled: true,
            lines,
            pipeline: None,
            vertex_buffer: None,
            vertex_count: 0,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl SubRenderer for LinesRenderer {
    fn name(&self) -> &str {
        self.name
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

    fn on_init(&mut self, ctx: &RenderContext) -> Result<(), RenderError> {
        let pipeline = PipelineConfig::new(
            "Lines",
            include_str!("../shaders/lines.wgsl"),
            ctx.surface_format(),
            ctx.depth_format(),
            &[ctx.camera_bind_group_layout()],
        )
        .with_vertex_layouts(vec![Vertex::layout()])
        .with_topology(wgpu::PrimitiveTopology::LineList)
        .build(ctx)?;

        if !self.lines.is_empty() {
            let label = format!("{} Vertex Buffer", self.name);
            self.vertex_buffer = Some(ctx.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&label),
                contents: bytemuck::cast_slice(&self.lines.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }));
        }
        self.vertex_count = self.lines.vertices.len() as u32;
        self.pipeline = Some(pipeline);
        Ok(())
    }

    fn prepare(&mut self, _ctx: &RenderContext, _frame: &Frame<'_>) {
        // Static geometry
    }

    fn render(&self, pass: &mut wgpu::RenderPass<'_>, ctx: &RenderContext, _frame: &Frame<'_>) {
        let (Some(pipeline), Some(vertex_buffer)) = (&self.pipeline, &self.vertex_buffer) else {
            return;
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, ctx.camera_bind_group(), &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

//! Visible pass for the arm's part meshes

use arm_core::{PartId, Vertex};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::pipeline::PipelineConfig;
use crate::renderer::uniforms::{ObjectUniform, ObjectUniforms};
use crate::traits::{Frame, SubRenderer};
use crate::vertex::VertexLayout;

/// Draws every visible scene object with its color-variant mesh.
///
/// One draw per part: the mesh is `(part, Highlighted)` when the part is the
/// active target, `(part, Standard)` otherwise.
pub struct ArmRenderer {
    enabled: bool,
    pipeline: Option<wgpu::RenderPipeline>,
    uniforms: Option<ObjectUniforms>,
}

impl ArmRenderer {
    pub fn new() -> Self {
        Self {
            enabled: true,
            pipeline: None,
            uniforms: None,
        }
    }
}

impl Default for ArmRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubRenderer for ArmRenderer {
    fn name(&self) -> &str {
        super::names::ARM
    }

    fn priority(&self) -> i32 {
        super::priorities::ARM
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn on_init(&mut self, ctx: &RenderContext) -> Result<(), RenderError> {
        let uniforms = ObjectUniforms::new(ctx, "Arm", PartId::COUNT);
        let pipeline = PipelineConfig::new(
            "Arm",
            include_str!("../shaders/standard.wgsl"),
            ctx.surface_format(),
            ctx.depth_format(),
            &[ctx.camera_bind_group_layout(), uniforms.layout()],
        )
        .with_vertex_layouts(vec![Vertex::layout()])
        .build(ctx)?;

        self.pipeline = Some(pipeline);
        self.uniforms = Some(uniforms);
        Ok(())
    }

    fn prepare(&mut self, ctx: &RenderContext, frame: &Frame<'_>) {
        let Some(uniforms) = &self.uniforms else {
            return;
        };
        let data: Vec<ObjectUniform> = frame
            .scene
            .visible()
            .map(|o| ObjectUniform::new(frame.view_proj, o.transform, o.pick_id.color()))
            .collect();
        uniforms.write(ctx, &data);
    }

    fn render(&self, pass: &mut wgpu::RenderPass<'_>, ctx: &RenderContext, frame: &Frame<'_>) {
        let (Some(pipeline), Some(uniforms)) = (&self.pipeline, &self.uniforms) else {
            return;
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, ctx.camera_bind_group(), &[]);

        let objects = frame.scene.visible().take(uniforms.capacity());
        for (slot, object) in objects.enumerate() {
            let Some(mesh) = frame.meshes.get(object.part, object.variant) else {
                continue;
            };
            if mesh.is_empty() {
                continue;
            }
            pass.set_bind_group(1, uniforms.bind_group(), &[uniforms.offset(slot)]);
            mesh.draw(pass);
        }
    }
}

//! Top-level renderer: visible pass into an offscreen target plus picking.

pub mod gpu_resources;
pub mod uniforms;

use std::sync::Arc;

use arm_core::{MeshSource, PartId, axes_lines, grid_lines};
use glam::{UVec2, Vec2, Vec3};

use crate::camera::OrbitCamera;
use crate::config::RendererConfig;
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::picking::PickingPass;
use crate::plugin::RendererRegistry;
use crate::resources::MeshRegistry;
use crate::scene::ArmScene;
use crate::sub_renderers::{ArmRenderer, LinesRenderer, names, priorities};
use crate::traits::Frame;

use gpu_resources::create_depth_texture;

/// Owns the GPU context, meshes, camera and both passes.
pub struct Renderer {
    ctx: RenderContext,
    config: RendererConfig,
    camera: OrbitCamera,
    meshes: MeshRegistry,
    registry: RendererRegistry,
    picking: PickingPass,
    _depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
}

impl Renderer {
    /// Create all pipelines and upload every part mesh.
    ///
    /// Fails on shader compilation, pipeline creation or mesh upload errors.
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        config: RendererConfig,
        source: Box<dyn MeshSource + Send + Sync>,
    ) -> Result<Self, RenderError> {
        let ctx = RenderContext::new(device, queue, format, width, height);
        let mut camera = OrbitCamera::from_config(&config.camera, 1.0);
        camera.update_aspect(ctx.width(), ctx.height());

        let mut meshes = MeshRegistry::new(source);
        meshes.load_all(&ctx)?;

        let mut registry = RendererRegistry::new();
        registry.register(
            LinesRenderer::new(names::GRID, priorities::GRID, grid_lines(config.grid_half_extent))
                .with_enabled(config.show_grid),
        );
        registry.register(ArmRenderer::new());
        registry.register(
            LinesRenderer::new(names::AXES, priorities::AXES, axes_lines(config.axes_length))
                .with_enabled(config.show_axes),
        );
        registry.init_all(&ctx)?;

        let size = UVec2::new(ctx.width(), ctx.height());
        let picking = PickingPass::new(&ctx, PartId::COUNT, size)?;
        let (depth_texture, depth_view) =
            create_depth_texture(ctx.device(), ctx.depth_format(), size.x, size.y);

        tracing::info!("Renderer initialized ({}x{}, {:?})", size.x, size.y, format);

        Ok(Self {
            ctx,
            config,
            camera,
            meshes,
            registry,
            picking,
            _depth_texture: depth_texture,
            depth_view,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.ctx.surface_format()
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn meshes(&self) -> &MeshRegistry {
        &self.meshes
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Rotate the camera around its target
    pub fn orbit_camera(&mut self, delta: Vec2) {
        self.camera.orbit(delta);
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.config.show_grid = show;
        self.registry.set_enabled(names::GRID, show);
    }

    pub fn set_show_axes(&mut self, show: bool) {
        self.config.show_axes = show;
        self.registry.set_enabled(names::AXES, show);
    }

    /// Resize depth and picking targets to the viewport
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.ctx.width() && height == self.ctx.height() {
            return;
        }
        self.ctx.resize(width, height);
        self.camera.update_aspect(width, height);

        let (depth_texture, depth_view) =
            create_depth_texture(self.ctx.device(), self.ctx.depth_format(), width, height);
        self._depth_texture = depth_texture;
        self.depth_view = depth_view;

        self.picking.resize(&self.ctx, UVec2::new(width, height));
        self.registry.resize_all(&self.ctx, width, height);
        tracing::debug!("Viewport resized to {}x{}", width, height);
    }

    /// Draw the visible frame into `target`, which must match the viewport
    /// size and the renderer's format.
    pub fn render(&mut self, scene: &ArmScene, target: &wgpu::TextureView) {
        let light_offset = Vec3::from(self.config.light_offset);
        self.ctx.update_camera(&self.camera.uniform(light_offset));

        let frame = Frame {
            scene,
            meshes: &self.meshes,
            view_proj: self.camera.view_proj(),
        };
        self.registry.prepare_all(&self.ctx, &frame);

        let mut encoder = self
            .ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Viewport Render Encoder"),
            });

        {
            let [r, g, b, a] = self.config.clear_color.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Visible Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.registry.render_all(&mut pass, &self.ctx, &frame);
        }

        self.ctx.queue().submit(std::iter::once(encoder.finish()));
    }

    /// Sample the picking pass under `cursor` (physical pixels, top-left
    /// origin).
    ///
    /// Readback failures are logged and reported as `None`, which decodes
    /// to background like an out-of-bounds cursor.
    pub fn pick(&mut self, scene: &ArmScene, cursor: Vec2) -> Option<[u8; 4]> {
        let view_proj = self.camera.view_proj();
        match self
            .picking
            .sample(&self.ctx, &self.meshes, scene, view_proj, cursor)
        {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!("Pick at ({}, {}) failed: {}", cursor.x, cursor.y, e);
                None
            }
        }
    }
}

//! Viewport rendering state

use std::sync::Arc;

use arm_core::MeshSource;
use arm_renderer::{ArmScene, RenderError, Renderer, RendererConfig};
use glam::Vec2;

/// Render texture for viewport
struct RenderTexture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    egui_texture_id: egui::TextureId,
    width: u32,
    height: u32,
}

/// Renderer plus the egui-registered texture it draws into
pub struct ViewportState {
    pub renderer: Renderer,
    device: Arc<wgpu::Device>,
    render_texture: Option<RenderTexture>,
}

impl ViewportState {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        config: RendererConfig,
        source: Box<dyn MeshSource + Send + Sync>,
    ) -> Result<Self, RenderError> {
        let renderer = Renderer::new(device.clone(), queue, format, 800, 600, config, source)?;
        Ok(Self {
            renderer,
            device,
            render_texture: None,
        })
    }

    /// Ensure the render texture matches the requested size
    pub fn ensure_texture(
        &mut self,
        width: u32,
        height: u32,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) -> egui::TextureId {
        let width = width.max(1);
        let height = height.max(1);

        if let Some(rt) = &self.render_texture
            && rt.width == width
            && rt.height == height
        {
            return rt.egui_texture_id;
        }

        if let Some(old) = self.render_texture.take() {
            egui_renderer.free_texture(&old.egui_texture_id);
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Viewport Render Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.renderer.format(),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let egui_texture_id =
            egui_renderer.register_native_texture(&self.device, &view, wgpu::FilterMode::Linear);

        self.renderer.resize(width, height);

        self.render_texture = Some(RenderTexture {
            _texture: texture,
            view,
            egui_texture_id,
            width,
            height,
        });
        egui_texture_id
    }

    /// Render the scene into the viewport texture
    pub fn render(&mut self, scene: &ArmScene) {
        let Some(rt) = &self.render_texture else {
            return;
        };
        self.renderer.render(scene, &rt.view);
    }

    /// Sample the picking pass at a viewport pixel
    pub fn pick(&mut self, scene: &ArmScene, cursor: Vec2) -> Option<[u8; 4]> {
        self.renderer.pick(scene, cursor)
    }
}

//! Off-screen identity-color pass with single-texel readback

use std::sync::mpsc;

use arm_core::{Vertex, texel_at};
use glam::{Mat4, UVec2, Vec2};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::pipeline::PipelineConfig;
use crate::renderer::gpu_resources::{create_color_texture, create_depth_texture};
use crate::renderer::uniforms::{ObjectUniform, ObjectUniforms};
use crate::resources::MeshRegistry;
use crate::scene::ArmScene;
use crate::vertex::VertexLayout;

/// Format of the identity target; the pick id lives in the red channel
pub const PICKING_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Readback holds one padded row of one texel
const READBACK_SIZE: u64 = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT as u64;

struct Targets {
    color: wgpu::Texture,
    color_view: wgpu::TextureView,
    _depth: wgpu::Texture,
    depth_view: wgpu::TextureView,
    size: UVec2,
}

impl Targets {
    fn new(ctx: &RenderContext, size: UVec2) -> Self {
        let size = size.max(UVec2::ONE);
        let (color, color_view) = create_color_texture(
            ctx.device(),
            "Picking Color Texture",
            PICKING_FORMAT,
            wgpu::TextureUsages::COPY_SRC,
            size.x,
            size.y,
        );
        let (depth, depth_view) =
            create_depth_texture(ctx.device(), ctx.depth_format(), size.x, size.y);
        Self {
            color,
            color_view,
            _depth: depth,
            depth_view,
            size,
        }
    }
}

/// Draws every pickable object in its flat pick color and reads back the
/// texel under the cursor.
///
/// The target is cleared to white, so an empty texel reads as the
/// background sentinel.
pub struct PickingPass {
    pipeline: wgpu::RenderPipeline,
    uniforms: ObjectUniforms,
    targets: Targets,
    readback: wgpu::Buffer,
}

impl PickingPass {
    pub fn new(ctx: &RenderContext, capacity: usize, size: UVec2) -> Result<Self, RenderError> {
        let uniforms = ObjectUniforms::new(ctx, "Picking", capacity);
        let pipeline = PipelineConfig::new(
            "Picking",
            include_str!("shaders/picking.wgsl"),
            PICKING_FORMAT,
            ctx.depth_format(),
            &[uniforms.layout()],
        )
        .with_vertex_layouts(vec![Vertex::layout()])
        .build(ctx)?;

        let readback = ctx.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Picking Readback Buffer"),
            size: READBACK_SIZE,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Ok(Self {
            pipeline,
            uniforms,
            targets: Targets::new(ctx, size),
            readback,
        })
    }

    pub fn size(&self) -> UVec2 {
        self.targets.size
    }

    /// Match the viewport size
    pub fn resize(&mut self, ctx: &RenderContext, size: UVec2) {
        if size.max(UVec2::ONE) != self.targets.size {
            self.targets = Targets::new(ctx, size);
        }
    }

    /// Render the identity pass and return the RGBA texel under `cursor`.
    ///
    /// `cursor` is in physical pixels from the top-left corner. Returns
    /// `Ok(None)` without touching the GPU when it is outside the target.
    /// Blocks until the readback of this exact submission is available.
    pub fn sample(
        &mut self,
        ctx: &RenderContext,
        meshes: &MeshRegistry,
        scene: &ArmScene,
        view_proj: Mat4,
        cursor: Vec2,
    ) -> Result<Option<[u8; 4]>, RenderError> {
        let Some(texel) = texel_at(cursor, self.targets.size) else {
            return Ok(None);
        };

        let objects: Vec<_> = scene.pickable().take(self.uniforms.capacity()).collect();
        let data: Vec<ObjectUniform> = objects
            .iter()
            .map(|o| ObjectUniform::new(view_proj, o.transform, o.pick_id.color()))
            .collect();
        self.uniforms.write(ctx, &data);

        let mut encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Picking Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Picking Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            for (slot, object) in objects.iter().enumerate() {
                let Some(mesh) = meshes.get(object.part, object.variant) else {
                    continue;
                };
                if mesh.is_empty() {
                    continue;
                }
                pass.set_bind_group(0, self.uniforms.bind_group(), &[self.uniforms.offset(slot)]);
                mesh.draw(&mut pass);
            }
        }

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &self.targets.color,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: texel.x,
                    y: texel.y,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &self.readback,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT),
                    rows_per_image: Some(1),
                },
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );

        let submission = ctx.queue().submit(std::iter::once(encoder.finish()));
        self.read_texel(ctx, submission).map(Some)
    }

    fn read_texel(
        &self,
        ctx: &RenderContext,
        submission: wgpu::SubmissionIndex,
    ) -> Result<[u8; 4], RenderError> {
        let slice = self.readback.slice(0..4);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        let _ = ctx
            .device()
            .poll(wgpu::Maintain::WaitForSubmissionIndex(submission));

        // The wait above fires the map callback before returning
        match receiver.try_recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(RenderError::Readback(e.to_string())),
            Err(e) => {
                self.readback.unmap();
                return Err(RenderError::Readback(e.to_string()));
            }
        }

        let texel = {
            let data = slice.get_mapped_range();
            [data[0], data[1], data[2], data[3]]
        };
        self.readback.unmap();
        Ok(texel)
    }
}

//! Mesh registry: one GPU mesh per (part, color variant).

use std::collections::HashMap;

use arm_core::{ColorVariant, MeshData, MeshSource, PartId, load_part_mesh};
use wgpu::util::DeviceExt;

use crate::context::RenderContext;
use crate::error::UploadError;

/// Handle to a mesh stored in the [`MeshRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeshHandle(u64);

impl MeshHandle {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// GPU mesh data.
///
/// Empty meshes have no buffers and draw nothing.
pub struct GpuMesh {
    pub vertex_buffer: Option<wgpu::Buffer>,
    pub index_buffer: Option<wgpu::Buffer>,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl GpuMesh {
    fn empty() -> Self {
        Self {
            vertex_buffer: None,
            index_buffer: None,
            vertex_count: 0,
            index_count: 0,
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.index_buffer.is_some() && self.index_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_buffer.is_none() || self.vertex_count == 0
    }

    /// Bind buffers and issue the draw
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(vertex_buffer) = &self.vertex_buffer else {
            return;
        };
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(index_buffer) if self.index_count > 0 => {
                pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.index_count, 0, 0..1);
            }
            _ => pass.draw(0..self.vertex_count, 0..1),
        }
    }
}

/// Owner of every part mesh.
///
/// Meshes are loaded once at startup and stay immutable; the buffers are
/// released when the registry is dropped.
pub struct MeshRegistry {
    source: Box<dyn MeshSource + Send + Sync>,
    meshes: HashMap<MeshHandle, GpuMesh>,
    parts: HashMap<(PartId, ColorVariant), MeshHandle>,
    next_handle: u64,
}

impl MeshRegistry {
    pub fn new(source: Box<dyn MeshSource + Send + Sync>) -> Self {
        Self {
            source,
            meshes: HashMap::new(),
            parts: HashMap::new(),
            next_handle: 1,
        }
    }

    /// CPU mesh of `part` colored for `variant`; empty if the source fails
    pub fn load(&self, part: PartId, variant: ColorVariant) -> MeshData {
        load_part_mesh(self.source.as_ref(), part, variant)
    }

    /// Upload mesh data inside an error scope.
    pub fn upload(
        &mut self,
        ctx: &RenderContext,
        data: &MeshData,
    ) -> Result<MeshHandle, UploadError> {
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;

        if data.is_empty() {
            self.meshes.insert(handle, GpuMesh::empty());
            return Ok(handle);
        }

        let device = ctx.device();
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = data.is_indexed().then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let validation = pollster::block_on(device.pop_error_scope());
        let out_of_memory = pollster::block_on(device.pop_error_scope());
        if let Some(error) = out_of_memory.or(validation) {
            return Err(UploadError::from_wgpu("mesh", error));
        }

        self.meshes.insert(
            handle,
            GpuMesh {
                vertex_buffer: Some(vertex_buffer),
                index_buffer,
                vertex_count: data.vertices.len() as u32,
                index_count: data.indices.len() as u32,
            },
        );
        Ok(handle)
    }

    /// Load and upload every (part, variant). Parts without a highlight
    /// get only their standard mesh.
    pub fn load_all(&mut self, ctx: &RenderContext) -> Result<(), UploadError> {
        for part in PartId::ALL {
            for variant in ColorVariant::ALL {
                if variant == ColorVariant::Highlighted && !part.has_highlight() {
                    continue;
                }
                let data = self.load(part, variant);
                let handle = self.upload(ctx, &data).map_err(|e| match e {
                    UploadError::OutOfMemory { .. } => UploadError::OutOfMemory {
                        label: format!("{part} {variant:?}"),
                    },
                    UploadError::Validation { message, .. } => UploadError::Validation {
                        label: format!("{part} {variant:?}"),
                        message,
                    },
                })?;
                self.parts.insert((part, variant), handle);
            }
        }
        tracing::info!("Uploaded {} part meshes", self.parts.len());
        Ok(())
    }

    /// Handle of a part mesh; `Highlighted` falls back to `Standard`
    pub fn handle(&self, part: PartId, variant: ColorVariant) -> Option<MeshHandle> {
        self.parts
            .get(&(part, variant))
            .or_else(|| self.parts.get(&(part, ColorVariant::Standard)))
            .copied()
    }

    pub fn get(&self, part: PartId, variant: ColorVariant) -> Option<&GpuMesh> {
        self.handle(part, variant).and_then(|h| self.meshes.get(&h))
    }

    pub fn get_by_handle(&self, handle: MeshHandle) -> Option<&GpuMesh> {
        self.meshes.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

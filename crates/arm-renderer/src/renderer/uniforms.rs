//! Per-object uniforms in a dynamic-offset buffer

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::context::RenderContext;
use crate::pipeline::create_object_bind_group_layout;

/// Per-object data as laid out in the `Object` WGSL struct
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Output color of the picking pass, unused by the visible pass
    pub flat_color: [f32; 4],
}

impl ObjectUniform {
    pub fn new(view_proj: Mat4, model: Mat4, flat_color: [f32; 4]) -> Self {
        Self {
            mvp: (view_proj * model).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            flat_color,
        }
    }
}

const UNIFORM_SIZE: u64 = std::mem::size_of::<ObjectUniform>() as u64;

/// One [`ObjectUniform`] slot per drawn object, bound with a dynamic offset
pub struct ObjectUniforms {
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    stride: u64,
    capacity: usize,
}

impl ObjectUniforms {
    pub fn new(ctx: &RenderContext, label: &str, capacity: usize) -> Self {
        let device = ctx.device();
        let alignment = u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let stride = slot_stride(alignment);
        let capacity = capacity.max(1);

        let buffer = ctx.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Object Uniforms")),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layout = create_object_bind_group_layout(device, label, uniform_binding_size());

        let bind_group = ctx.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Object Bind Group")),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: Some(uniform_binding_size()),
                }),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
            stride,
            capacity,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Dynamic offset of slot `index`
    pub fn offset(&self, index: usize) -> u32 {
        (self.stride * index as u64) as u32
    }

    /// Write uniforms into consecutive slots; extra entries are dropped
    pub fn write(&self, ctx: &RenderContext, uniforms: &[ObjectUniform]) {
        if uniforms.len() > self.capacity {
            tracing::warn!(
                "{} object uniforms exceed capacity {}",
                uniforms.len(),
                self.capacity
            );
        }
        for (index, uniform) in uniforms.iter().take(self.capacity).enumerate() {
            ctx.write_buffer(
                &self.buffer,
                self.stride * index as u64,
                bytemuck::bytes_of(uniform),
            );
        }
    }
}

fn uniform_binding_size() -> wgpu::BufferSize {
    wgpu::BufferSize::new(UNIFORM_SIZE).unwrap_or(wgpu::BufferSize::MIN)
}

/// Uniform size rounded up to the device's dynamic offset alignment
fn slot_stride(alignment: u64) -> u64 {
    UNIFORM_SIZE.div_ceil(alignment.max(1)) * alignment.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size() {
        assert_eq!(UNIFORM_SIZE, 144);
    }

    #[test]
    fn test_slot_stride_is_aligned() {
        assert_eq!(slot_stride(256), 256);
        assert_eq!(slot_stride(64), 192);
        assert_eq!(slot_stride(16), 144);
    }
}

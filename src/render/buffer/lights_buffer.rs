//! GPU uniform buffer for streamed point lights

use bytemuck::{Pod, Zeroable};

use crate::lighting::{LightBuffer, MAX_STREAMED_LIGHTS};

/// Light uniform data for GPU (must match shader struct exactly)
/// Arrays of vec4 carry their own 16-byte alignment; only the trailing
/// count needs explicit padding
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightsUniform {
    /// xyz = world position, w = falloff radius (512 bytes, offset 0)
    pub positions: [[f32; 4]; MAX_STREAMED_LIGHTS],
    /// rgb = pre-scaled color, a = alpha (512 bytes, offset 512)
    pub colors: [[f32; 4]; MAX_STREAMED_LIGHTS],
    /// Number of live slots (4 bytes, offset 1024)
    pub count: u32,
    /// Padding to 1040 bytes (12 bytes, offset 1028)
    pub _pad: [u32; 3],
}

impl From<&LightBuffer> for LightsUniform {
    fn from(buffer: &LightBuffer) -> Self {
        Self {
            positions: buffer.positions,
            colors: buffer.colors,
            count: buffer.count,
            _pad: [0; 3],
        }
    }
}

impl Default for LightsUniform {
    fn default() -> Self {
        Self::from(&LightBuffer::empty())
    }
}

/// GPU buffer for the streamed light uniform
pub struct LightsBuffer {
    /// Uniform buffer
    buffer: wgpu::Buffer,
    /// Bind group layout
    bind_group_layout: wgpu::BindGroupLayout,
    /// Bind group
    bind_group: wgpu::BindGroup,
}

impl LightsBuffer {
    /// Create new lights buffer
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lights_uniform"),
            size: std::mem::size_of::<LightsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lights_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lights_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group_layout,
            bind_group,
        }
    }

    /// Upload the published light buffer
    ///
    /// One whole-uniform write per publish keeps the shading stage from ever
    /// sampling a half-updated light set.
    pub fn update(&self, queue: &wgpu::Queue, lights: &LightBuffer) {
        let uniform = LightsUniform::from(lights);
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// Get bind group layout
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Get bind group
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Get the raw buffer
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

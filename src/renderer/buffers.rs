use wgpu::util::DeviceExt;

use crate::renderer::camera::CameraUniform;
use crate::renderer::error::{expect_size, scoped, RenderError};
use crate::renderer::geometry::SceneGeometry;

/// Position, index and instance streams of the scene.
pub struct GeometryBuffers {
    positions: wgpu::Buffer,
    indices: wgpu::Buffer,
    instances: wgpu::Buffer,
}

impl GeometryBuffers {
    pub fn new(device: &wgpu::Device, geometry: &SceneGeometry) -> Result<Self, RenderError> {
        let positions = create_init(
            device,
            "PositionBuffer",
            geometry.position_bytes(),
            wgpu::BufferUsages::VERTEX,
        )?;
        expect_size("PositionBuffer", geometry.position_size(), positions.size())?;

        let indices = create_init(
            device,
            "IndexBuffer",
            geometry.index_bytes(),
            wgpu::BufferUsages::INDEX,
        )?;
        expect_size("IndexBuffer", geometry.index_size(), indices.size())?;

        let instances = create_init(
            device,
            "InstanceBuffer",
            geometry.instance_bytes(),
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        )?;
        expect_size("InstanceBuffer", geometry.instance_size(), instances.size())?;

        log::info!(
            "Uploaded {} positions, {} indices, {} instance(s)",
            geometry.positions.len() / 3,
            geometry.indices.len(),
            geometry.instances.len()
        );

        Ok(Self {
            positions,
            indices,
            instances,
        })
    }

    pub fn positions(&self) -> &wgpu::Buffer {
        &self.positions
    }

    pub fn indices(&self) -> &wgpu::Buffer {
        &self.indices
    }

    pub fn instances(&self) -> &wgpu::Buffer {
        &self.instances
    }
}

fn create_init(
    device: &wgpu::Device,
    label: &'static str,
    contents: &[u8],
    usage: wgpu::BufferUsages,
) -> Result<wgpu::Buffer, RenderError> {
    scoped(device, label, || {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage,
        })
    })
}

/// Per-frame camera uniform, bound at group 0 for the vertex stage.
pub struct CameraBuffer {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_layout: wgpu::BindGroupLayout,
}

impl CameraBuffer {
    pub fn new(device: &wgpu::Device) -> Result<Self, RenderError> {
        // Left unwritten; every frame writes it before drawing.
        let buffer = scoped(device, "CameraBuffer", || {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("CameraBuffer"),
                size: CameraUniform::SIZE,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        })?;
        expect_size("CameraBuffer", CameraUniform::SIZE, buffer.size())?;

        let bind_layout = scoped(device, "CameraBindLayout", || {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("CameraBindLayout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(CameraUniform::SIZE),
                    },
                    count: None,
                }],
            })
        })?;

        let bind_group = scoped(device, "CameraBindGroup", || {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("CameraBindGroup"),
                layout: &bind_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            })
        })?;

        Ok(Self {
            buffer,
            bind_group,
            bind_layout,
        })
    }

    /// Replaces the whole uniform. The write lands before any later submit.
    pub fn write(&self, queue: &wgpu::Queue, camera: &CameraUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(camera));
    }
}

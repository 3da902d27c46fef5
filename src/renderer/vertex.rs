use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use std::mem;

/// Vertex buffer slot carrying per-vertex positions.
pub const POSITION_SLOT: u32 = 0;
/// Vertex buffer slot carrying per-instance transforms.
pub const INSTANCE_SLOT: u32 = 1;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct Position {
    pub pos: [f32; 3],
}

impl Position {
    pub const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub const STRIDE: wgpu::BufferAddress = mem::size_of::<Position>() as wgpu::BufferAddress;

    pub fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Per-instance model-to-world transform, uploaded as four rows.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
}

impl InstanceData {
    // One Float32x4 per matrix row, 16 bytes apart.
    pub const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4
    ];

    pub const STRIDE: wgpu::BufferAddress = mem::size_of::<InstanceData>() as wgpu::BufferAddress;

    pub fn identity() -> Self {
        Self::from_model(Mat4::IDENTITY)
    }

    /// Stores `model` as the rows of its row-vector form, i.e. the
    /// translation lands in the fourth row. That is glam's column order.
    pub fn from_model(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }

    pub fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

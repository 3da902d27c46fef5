//! Per-frame draw sequence.
//!
//! A frame is described as a `FramePlan`: the clear values of the pass plus a
//! fixed, branch-free list of pass commands. The plan is plain data so it can
//! be compared directly; `FramePlan::encode` replays it onto a real
//! `wgpu::RenderPass`.

use winit::dpi::PhysicalSize;

use crate::renderer::draw::DrawEntry;
use crate::renderer::vertex::{InstanceData, Position, INSTANCE_SLOT, POSITION_SLOT};

pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};
pub const CLEAR_DEPTH: f32 = 1.0;
pub const CAMERA_GROUP: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Covers the whole target with depth range [0, 1].
    pub fn full(size: PhysicalSize<u32>) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width as f32,
            height: size.height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexStream {
    Positions,
    Instances,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassCommand {
    SetViewport(Viewport),
    SetVertexBuffer {
        slot: u32,
        stream: VertexStream,
        stride: wgpu::BufferAddress,
        offset: wgpu::BufferAddress,
    },
    SetIndexBuffer {
        format: wgpu::IndexFormat,
        offset: wgpu::BufferAddress,
    },
    /// Topology, shaders, input layout, rasterizer and depth-stencil state.
    SetPipeline,
    SetCameraBindGroup { index: u32 },
    DrawIndexed(DrawEntry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub clear_color: wgpu::Color,
    pub clear_depth: f32,
    pub commands: Vec<PassCommand>,
}

/// GPU objects a plan refers to.
pub struct FrameBindings<'a> {
    pub pipeline: &'a wgpu::RenderPipeline,
    pub positions: &'a wgpu::Buffer,
    pub instances: &'a wgpu::Buffer,
    pub indices: &'a wgpu::Buffer,
    pub camera: &'a wgpu::BindGroup,
}

impl FramePlan {
    pub fn new(viewport: Viewport, draws: &[DrawEntry]) -> Self {
        let mut commands = vec![
            PassCommand::SetViewport(viewport),
            PassCommand::SetVertexBuffer {
                slot: POSITION_SLOT,
                stream: VertexStream::Positions,
                stride: Position::STRIDE,
                offset: 0,
            },
            PassCommand::SetVertexBuffer {
                slot: INSTANCE_SLOT,
                stream: VertexStream::Instances,
                stride: InstanceData::STRIDE,
                offset: 0,
            },
            PassCommand::SetIndexBuffer {
                format: wgpu::IndexFormat::Uint32,
                offset: 0,
            },
            PassCommand::SetPipeline,
            PassCommand::SetCameraBindGroup {
                index: CAMERA_GROUP,
            },
        ];
        commands.extend(draws.iter().copied().map(PassCommand::DrawIndexed));

        Self {
            clear_color: CLEAR_COLOR,
            clear_depth: CLEAR_DEPTH,
            commands,
        }
    }

    pub fn draws(&self) -> impl Iterator<Item = &DrawEntry> {
        self.commands.iter().filter_map(|command| match command {
            PassCommand::DrawIndexed(entry) => Some(entry),
            _ => None,
        })
    }

    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        bindings: &FrameBindings<'_>,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ScenePass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_depth),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        for command in &self.commands {
            match *command {
                PassCommand::SetViewport(v) => {
                    pass.set_viewport(v.x, v.y, v.width, v.height, v.min_depth, v.max_depth)
                }
                // The stride is baked into the pipeline's vertex layout.
                PassCommand::SetVertexBuffer {
                    slot,
                    stream,
                    offset,
                    ..
                } => {
                    let buffer = match stream {
                        VertexStream::Positions => bindings.positions,
                        VertexStream::Instances => bindings.instances,
                    };
                    pass.set_vertex_buffer(slot, buffer.slice(offset..));
                }
                PassCommand::SetIndexBuffer { format, offset } => {
                    pass.set_index_buffer(bindings.indices.slice(offset..), format)
                }
                PassCommand::SetPipeline => pass.set_pipeline(bindings.pipeline),
                PassCommand::SetCameraBindGroup { index } => {
                    pass.set_bind_group(index, bindings.camera, &[])
                }
                PassCommand::DrawIndexed(entry) => {
                    pass.draw_indexed(entry.indices(), entry.base_vertex, entry.instances())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_covers_target() {
        let viewport = Viewport::full(PhysicalSize::new(1024, 768));
        assert_eq!(viewport.width, 1024.0);
        assert_eq!(viewport.height, 768.0);
        assert_eq!((viewport.x, viewport.y), (0.0, 0.0));
        assert_eq!((viewport.min_depth, viewport.max_depth), (0.0, 1.0));
    }

    #[test]
    fn plan_is_fixed_sequence_then_draws() {
        let draws = [DrawEntry::new(6, 1), DrawEntry::new(3, 1).with_start_index(6)];
        let viewport = Viewport::full(PhysicalSize::new(64, 32));
        let plan = FramePlan::new(viewport, &draws);

        assert_eq!(plan.clear_color, CLEAR_COLOR);
        assert_eq!(plan.clear_depth, 1.0);
        assert_eq!(
            plan.commands,
            vec![
                PassCommand::SetViewport(viewport),
                PassCommand::SetVertexBuffer {
                    slot: 0,
                    stream: VertexStream::Positions,
                    stride: 12,
                    offset: 0,
                },
                PassCommand::SetVertexBuffer {
                    slot: 1,
                    stream: VertexStream::Instances,
                    stride: 64,
                    offset: 0,
                },
                PassCommand::SetIndexBuffer {
                    format: wgpu::IndexFormat::Uint32,
                    offset: 0,
                },
                PassCommand::SetPipeline,
                PassCommand::SetCameraBindGroup { index: 0 },
                PassCommand::DrawIndexed(draws[0]),
                PassCommand::DrawIndexed(draws[1]),
            ]
        );
    }

    #[test]
    fn no_draws_still_sets_up_the_pass() {
        let plan = FramePlan::new(Viewport::full(PhysicalSize::new(1, 1)), &[]);
        assert_eq!(plan.commands.len(), 6);
        assert_eq!(plan.draws().count(), 0);
    }
}

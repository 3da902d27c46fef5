// renderer/pipeline.rs
use crate::renderer::buffers::CameraBuffer;
use crate::renderer::depth::DEPTH_FORMAT;
use crate::renderer::error::{scoped, RenderError};
use crate::renderer::pipeline_builder::PipelineBuilder;
use crate::renderer::vertex::{InstanceData, Position};

const VERTEX_SHADER: &str = include_str!("shaders/scene_vs.wgsl");
const FRAGMENT_SHADER: &str = include_str!("shaders/scene_fs.wgsl");

/// Solid fill, no culling, counter-clockwise front faces, depth clipping on.
pub fn rasterizer_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        unclipped_depth: false,
        polygon_mode: wgpu::PolygonMode::Fill,
        conservative: false,
    }
}

pub fn depth_stencil_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Slot 0 carries positions, slot 1 carries instance transforms.
pub fn vertex_layouts<'a>() -> [wgpu::VertexBufferLayout<'a>; 2] {
    [Position::layout(), InstanceData::layout()]
}

/// Everything the draw pass binds that never changes after load.
pub struct ScenePipeline {
    pipeline: wgpu::RenderPipeline,
}

impl ScenePipeline {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        camera: &CameraBuffer,
    ) -> Result<Self, RenderError> {
        let vertex_shader = scoped(device, "SceneVertexShader", || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("SceneVertexShader"),
                source: wgpu::ShaderSource::Wgsl(VERTEX_SHADER.into()),
            })
        })?;
        let fragment_shader = scoped(device, "SceneFragmentShader", || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("SceneFragmentShader"),
                source: wgpu::ShaderSource::Wgsl(FRAGMENT_SHADER.into()),
            })
        })?;

        let layout = scoped(device, "ScenePipelineLayout", || {
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("ScenePipelineLayout"),
                bind_group_layouts: &[&camera.bind_layout],
                push_constant_ranges: &[],
            })
        })?;

        let [positions, instances] = vertex_layouts();
        let pipeline = scoped(device, "ScenePipeline", || {
            PipelineBuilder::new(device, &layout, &vertex_shader, &fragment_shader)
                .with_label("ScenePipeline")
                .with_vertex_buffer(positions)
                .with_vertex_buffer(instances)
                .with_color_target(color_format, None)
                .with_primitive(rasterizer_state())
                .with_depth_stencil(depth_stencil_state())
                .build()
        })?;

        log::info!("Scene pipeline created for {:?}", color_format);
        Ok(Self { pipeline })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

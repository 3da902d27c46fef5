// renderer/renderer.rs
use std::path::PathBuf;

use winit::dpi::PhysicalSize;

use crate::renderer::buffers::{CameraBuffer, GeometryBuffers};
use crate::renderer::camera::OrbitCamera;
use crate::renderer::commands::{FrameBindings, FramePlan, Viewport};
use crate::renderer::depth::Depth;
use crate::renderer::draw::DrawEntry;
use crate::renderer::error::RenderError;
use crate::renderer::geometry::SceneGeometry;
use crate::renderer::loader::{load_mesh, LoadedMesh};
use crate::renderer::pipeline::ScenePipeline;
use crate::settings::ViewerSettings;

/// GPU state created by `load_scene`.
struct SceneResources {
    geometry: GeometryBuffers,
    camera: CameraBuffer,
    pipeline: ScenePipeline,
    draws: Vec<DrawEntry>,
}

pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    color_format: wgpu::TextureFormat,
    mesh_path: PathBuf,
    camera: OrbitCamera,
    scene: Option<SceneResources>,
    depth: Option<Depth>,
    size: PhysicalSize<u32>,
}

impl Renderer {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        color_format: wgpu::TextureFormat,
        settings: &ViewerSettings,
    ) -> Self {
        Self {
            device,
            queue,
            color_format,
            mesh_path: settings.mesh_path.clone(),
            camera: OrbitCamera::new(settings.orbit_step, settings.aspect_mode),
            scene: None,
            depth: None,
            size: PhysicalSize::new(0, 0),
        }
    }

    /// Loads the configured mesh and builds every load-time GPU object.
    pub fn load_scene(&mut self) -> Result<(), RenderError> {
        let mesh = load_mesh(&self.mesh_path)?;
        self.load_scene_from(&mesh)
    }

    pub fn load_scene_from(&mut self, mesh: &LoadedMesh) -> Result<(), RenderError> {
        let geometry = SceneGeometry::from_mesh(mesh)?;
        let buffers = GeometryBuffers::new(&self.device, &geometry)?;
        let camera = CameraBuffer::new(&self.device)?;
        let pipeline = ScenePipeline::new(&self.device, self.color_format, &camera)?;

        log::info!("Scene loaded with {} draw(s)", geometry.draws.len());
        self.scene = Some(SceneResources {
            geometry: buffers,
            camera,
            pipeline,
            draws: geometry.draws,
        });
        Ok(())
    }

    /// Recreates the depth buffer for a new output size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return Ok(());
        }

        let size = PhysicalSize::new(width, height);
        self.depth = Some(Depth::new(&self.device, size)?);
        self.size = size;
        log::debug!("Renderer resized to {}x{}", width, height);
        Ok(())
    }

    /// Updates the camera, then draws the scene into `target`.
    pub fn render_frame(&mut self, target: &wgpu::TextureView) -> Result<(), RenderError> {
        let scene = self.scene.as_ref().ok_or(RenderError::SceneNotLoaded)?;
        let depth = self.depth.as_ref().ok_or(RenderError::DepthNotReady)?;

        self.camera.advance();
        let uniform = self.camera.uniform(self.size.width, self.size.height);
        scene.camera.write(&self.queue, &uniform);

        let plan = FramePlan::new(Viewport::full(self.size), &scene.draws);
        let bindings = FrameBindings {
            pipeline: scene.pipeline.pipeline(),
            positions: scene.geometry.positions(),
            instances: scene.geometry.instances(),
            indices: scene.geometry.indices(),
            camera: &scene.camera.bind_group,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("FrameEncoder"),
            });
        plan.encode(&mut encoder, target, &depth.view, &bindings);
        self.queue.submit(Some(encoder.finish()));
        Ok(())
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Size of the current depth buffer, `None` until the first resize.
    pub fn depth_size(&self) -> Option<PhysicalSize<u32>> {
        self.depth.as_ref().map(|depth| depth.size)
    }

    pub fn draws(&self) -> &[DrawEntry] {
        self.scene
            .as_ref()
            .map_or(&[][..], |scene| scene.draws.as_slice())
    }

    pub fn orbit_angle(&self) -> f32 {
        self.camera.angle()
    }

    pub fn set_orbit_angle(&mut self, angle: f32) {
        self.camera.set_angle(angle);
    }
}

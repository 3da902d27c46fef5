// app.rs
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::*,
    event_loop::ActiveEventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::renderer::{RenderContext, RenderError, Renderer};
use crate::settings::ViewerSettings;

struct Viewer {
    window: Arc<Window>,
    context: RenderContext,
    renderer: Renderer,
}

impl Viewer {
    fn new(window: Arc<Window>, settings: &ViewerSettings) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(window.clone(), settings))?;
        let mut renderer = Renderer::new(
            context.device.clone(),
            context.queue.clone(),
            context.config.format,
            settings,
        );
        renderer.load_scene()?;
        renderer.resize(context.config.width, context.config.height)?;

        Ok(Self {
            window,
            context,
            renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<(), RenderError> {
        self.context.resize(size);
        self.renderer.resize(size.width, size.height)
    }

    fn redraw(&mut self) -> Result<(), RenderError> {
        let frame = match self.context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render_frame(&view)?;
        frame.present();
        Ok(())
    }
}

/// Winit host for the renderer. The first fatal error stops the event loop
/// and is handed back by `take_error`.
pub struct App {
    settings: ViewerSettings,
    viewer: Option<Viewer>,
    error: Option<RenderError>,
}

impl App {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            settings,
            viewer: None,
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<RenderError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RenderError) {
        log::error!("Fatal renderer error: {}", err);
        self.error.get_or_insert(err);
        self.viewer = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() || self.error.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("orbit viewer")
            .with_inner_size(PhysicalSize::new(
                self.settings.resolution.width,
                self.settings.resolution.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.fail(event_loop, RenderError::Initialization(err.to_string()));
                return;
            }
        };

        match Viewer::new(window, &self.settings) {
            Ok(viewer) => {
                viewer.window.request_redraw();
                self.viewer = Some(viewer);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        if viewer.window.id() != id {
            return;
        }

        let result = match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                event_loop.exit();
                Ok(())
            }
            WindowEvent::Resized(size) => viewer.resize(size),
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = viewer.window.inner_size();
                viewer.resize(size)
            }
            WindowEvent::RedrawRequested => {
                let result = viewer.redraw();
                viewer.window.request_redraw();
                result
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }
}

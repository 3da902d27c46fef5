pub mod app;
pub mod io;
pub mod renderer;
pub mod settings;

use app::App;
use settings::ViewerSettings;
use winit::event_loop::EventLoop;

#[derive(Debug)]
pub enum RunError {
    EventLoop(winit::error::EventLoopError),
    Render(renderer::RenderError),
}

impl From<winit::error::EventLoopError> for RunError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunError::EventLoop(e)
    }
}

impl From<renderer::RenderError> for RunError {
    fn from(e: renderer::RenderError) -> Self {
        RunError::Render(e)
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            RunError::Render(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RunError {}

/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}

/// Opens a window and orbits the configured mesh until the window closes.
/// Returns the first fatal error, if any.
pub fn run(settings: ViewerSettings) -> Result<(), RunError> {
    init_logging();

    log::info!("Starting orbit viewer for {:?}", settings.mesh_path);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings);

    event_loop.run_app(&mut app)?;

    if let Some(err) = app.take_error() {
        return Err(err.into());
    }

    log::info!("Application shutdown complete");
    Ok(())
}

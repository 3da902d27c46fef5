// renderer/error.rs
use crate::renderer::loader::LoadError;

/// Fatal renderer errors. Nothing in the renderer retries; every variant
/// leaves it unusable until the host rebuilds it.
#[derive(Debug)]
pub enum RenderError {
    Load(LoadError),
    Initialization(String),
    ResourceCreation {
        label: &'static str,
        message: String,
    },
    SizeMismatch {
        label: &'static str,
        expected: u64,
        actual: u64,
    },
    SceneNotLoaded,
    DepthNotReady,
    Surface(wgpu::SurfaceError),
}

impl From<LoadError> for RenderError {
    fn from(e: LoadError) -> Self {
        RenderError::Load(e)
    }
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        RenderError::Surface(e)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Load(e) => write!(f, "Mesh load error: {}", e),
            RenderError::Initialization(e) => write!(f, "Initialization failed: {}", e),
            RenderError::ResourceCreation { label, message } => {
                write!(f, "Failed to create {}: {}", label, message)
            }
            RenderError::SizeMismatch {
                label,
                expected,
                actual,
            } => write!(
                f,
                "{} is {} bytes, expected {} bytes",
                label, actual, expected
            ),
            RenderError::SceneNotLoaded => write!(f, "render_frame called before load_scene"),
            RenderError::DepthNotReady => write!(f, "render_frame called before resize"),
            RenderError::Surface(e) => write!(f, "Surface error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Load(e) => Some(e),
            RenderError::Surface(e) => Some(e),
            _ => None,
        }
    }
}

/// Runs `create` inside validation and out-of-memory error scopes and turns
/// whatever wgpu captured into a `RenderError`. The created value is dropped
/// when an error is reported.
pub(crate) fn scoped<T>(
    device: &wgpu::Device,
    label: &'static str,
    create: impl FnOnce() -> T,
) -> Result<T, RenderError> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    let validation = pollster::block_on(device.pop_error_scope());
    let out_of_memory = pollster::block_on(device.pop_error_scope());

    match validation.or(out_of_memory) {
        Some(err) => {
            log::error!("{} creation failed: {}", label, err);
            Err(RenderError::ResourceCreation {
                label,
                message: err.to_string(),
            })
        }
        None => Ok(value),
    }
}

/// Checks that a created buffer has exactly the size its source data implies.
pub(crate) fn expect_size(
    label: &'static str,
    expected: u64,
    actual: u64,
) -> Result<(), RenderError> {
    if expected != actual {
        return Err(RenderError::SizeMismatch {
            label,
            expected,
            actual,
        });
    }
    Ok(())
}

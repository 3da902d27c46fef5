pub mod buffers;
pub mod camera;
pub mod commands;
pub mod context;
pub mod depth;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod pipeline;
pub mod pipeline_builder;
#[allow(clippy::module_inception)]
pub mod renderer;
pub mod vertex;

pub use camera::{AspectMode, CameraUniform, OrbitCamera};
pub use commands::{FramePlan, PassCommand, Viewport};
pub use context::RenderContext;
pub use depth::Depth;
pub use draw::DrawEntry;
pub use error::RenderError;
pub use geometry::SceneGeometry;
pub use loader::{
    load_mesh, load_mesh_from_slice, load_obj_from_slice, LoadError, LoadedMesh, MeshFormat, Shape,
};
pub use renderer::Renderer;
pub use vertex::{InstanceData, Position};

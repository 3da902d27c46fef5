// renderer/loader.rs
use std::path::{Path, PathBuf};

/// One drawable piece of a mesh asset: flat `xyz` positions and a flat
/// triangle-list index array.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub name: Option<String>,
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Shape {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMesh {
    pub shapes: Vec<Shape>,
}

#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    GltfError(String),
    ObjError(String),
    UnsupportedFormat { path: PathBuf },
    NoShapes,
    MissingPositions { shape: usize },
    UnsupportedMode { shape: usize, mode: String },
    EmptyShape { shape: usize },
    IndexCount { shape: usize, count: usize },
    IndexOutOfRange { shape: usize, index: u32, vertices: usize },
}

impl From<gltf::Error> for LoadError {
    fn from(e: gltf::Error) -> Self {
        LoadError::GltfError(e.to_string())
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::ObjError(e.to_string())
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "IO error reading {:?}: {}", path, source),
            LoadError::GltfError(e) => write!(f, "GLTF error: {}", e),
            LoadError::ObjError(e) => write!(f, "OBJ error: {}", e),
            LoadError::UnsupportedFormat { path } => write!(
                f,
                "Unsupported mesh format: {:?} (use .obj, .gltf, or .glb)",
                path
            ),
            LoadError::NoShapes => write!(f, "Mesh asset contains no triangle shapes"),
            LoadError::MissingPositions { shape } => {
                write!(f, "Shape {} has no POSITION attribute", shape)
            }
            LoadError::UnsupportedMode { shape, mode } => {
                write!(f, "Shape {} uses unsupported primitive mode {}", shape, mode)
            }
            LoadError::EmptyShape { shape } => write!(f, "Shape {} has no triangles", shape),
            LoadError::IndexCount { shape, count } => write!(
                f,
                "Shape {} has {} indices, not a multiple of 3",
                shape, count
            ),
            LoadError::IndexOutOfRange {
                shape,
                index,
                vertices,
            } => write!(
                f,
                "Shape {} references vertex {} but only has {} vertices",
                shape, index, vertices
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Gltf,
}

impl MeshFormat {
    /// Picks the parser from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "obj" => Some(MeshFormat::Obj),
            "gltf" | "glb" => Some(MeshFormat::Gltf),
            _ => None,
        }
    }
}

/// Loads every triangle shape of a `.obj`, `.gltf` or `.glb` file.
pub fn load_mesh(path: &Path) -> Result<LoadedMesh, LoadError> {
    let format = MeshFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    log::info!("Loading {:?} mesh {:?}", format, path);
    let bytes = crate::io::load_binary(path)?;
    match format {
        MeshFormat::Obj => load_obj_from_slice(&bytes),
        MeshFormat::Gltf => load_mesh_from_slice(&bytes, path.parent()),
    }
}

/// Parses Wavefront OBJ text. Polygons are triangulated and positions are
/// re-indexed to a single index stream; materials are not read.
pub fn load_obj_from_slice(bytes: &[u8]) -> Result<LoadedMesh, LoadError> {
    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    };

    let mut reader = bytes;
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &options, |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;

    let mut shapes = Vec::with_capacity(models.len());
    for model in models {
        let name = (!model.name.is_empty()).then_some(model.name);
        let shape = validate_shape(shapes.len(), name, model.mesh.positions, model.mesh.indices)?;
        log_shape(shapes.len(), &shape);
        shapes.push(shape);
    }

    finish(shapes)
}

/// Parses glTF JSON or GLB bytes. External buffer URIs are resolved against
/// `base`; data URIs and the GLB blob need no base.
pub fn load_mesh_from_slice(bytes: &[u8], base: Option<&Path>) -> Result<LoadedMesh, LoadError> {
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
    let buffers = gltf::import_buffers(&document, base, blob)?;

    let mut shapes = Vec::new();
    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            let shape = read_shape(shapes.len(), mesh.name(), &primitive, &buffers)?;
            log_shape(shapes.len(), &shape);
            shapes.push(shape);
        }
    }

    finish(shapes)
}

fn log_shape(index: usize, shape: &Shape) {
    log::debug!(
        "  Shape {}: {} vertices, {} indices",
        index,
        shape.vertex_count(),
        shape.indices.len()
    );
}

fn finish(shapes: Vec<Shape>) -> Result<LoadedMesh, LoadError> {
    if shapes.is_empty() {
        return Err(LoadError::NoShapes);
    }

    log::info!("Loaded {} shape(s)", shapes.len());
    Ok(LoadedMesh { shapes })
}

fn read_shape(
    shape: usize,
    name: Option<&str>,
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
) -> Result<Shape, LoadError> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        return Err(LoadError::UnsupportedMode {
            shape,
            mode: format!("{:?}", primitive.mode()),
        });
    }

    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

    let positions: Vec<f32> = reader
        .read_positions()
        .ok_or(LoadError::MissingPositions { shape })?
        .flatten()
        .collect();
    let vertices = positions.len() / 3;

    // GPU index width is always 32 bits, whatever the accessor stores.
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertices as u32).collect(),
    };

    validate_shape(shape, name.map(str::to_owned), positions, indices)
}

/// Checks that `indices` form whole triangles over `positions`.
fn validate_shape(
    shape: usize,
    name: Option<String>,
    positions: Vec<f32>,
    indices: Vec<u32>,
) -> Result<Shape, LoadError> {
    let vertices = positions.len() / 3;

    if indices.is_empty() {
        return Err(LoadError::EmptyShape { shape });
    }
    if indices.len() % 3 != 0 {
        return Err(LoadError::IndexCount {
            shape,
            count: indices.len(),
        });
    }
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices) {
        return Err(LoadError::IndexOutOfRange {
            shape,
            index,
            vertices,
        });
    }

    Ok(Shape {
        name,
        positions,
        indices,
    })
}

// renderer/geometry.rs
use crate::renderer::draw::DrawEntry;
use crate::renderer::loader::LoadedMesh;
use crate::renderer::vertex::InstanceData;
use crate::renderer::LoadError;

pub const INSTANCE_COUNT: u32 = 1;

/// CPU-side contents of the scene buffers.
///
/// Shapes are packed back to back. Each keeps its own indices and is reached
/// through `start_index` and `base_vertex` of its draw entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGeometry {
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
    pub instances: Vec<InstanceData>,
    pub draws: Vec<DrawEntry>,
}

impl SceneGeometry {
    pub fn from_mesh(mesh: &LoadedMesh) -> Result<Self, LoadError> {
        if mesh.shapes.is_empty() {
            return Err(LoadError::NoShapes);
        }

        let mut positions = Vec::new();
        let mut indices = Vec::new();
        let mut draws = Vec::with_capacity(mesh.shapes.len());

        for shape in &mesh.shapes {
            let entry = DrawEntry::new(shape.indices.len() as u32, INSTANCE_COUNT)
                .with_start_index(indices.len() as u32)
                .with_base_vertex((positions.len() / 3) as i32);
            draws.push(entry);

            positions.extend_from_slice(&shape.positions);
            indices.extend_from_slice(&shape.indices);
        }

        Ok(Self {
            positions,
            indices,
            instances: vec![InstanceData::identity(); INSTANCE_COUNT as usize],
            draws,
        })
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn position_size(&self) -> u64 {
        (self.positions.len() * std::mem::size_of::<f32>()) as u64
    }

    pub fn index_size(&self) -> u64 {
        (self.indices.len() * std::mem::size_of::<u32>()) as u64
    }

    pub fn instance_size(&self) -> u64 {
        self.instances.len() as u64 * InstanceData::STRIDE
    }
}

//! Resource registry: meshes and materials shared by many entities.
//!
//! The registry owns every descriptor. Entities and renderers hold only
//! copyable handles, so no entity can mutate shared geometry.
//!
//! # Invariants
//! - Handles are content-addressed: identical contents register once.
//! - A registered mesh has at least one index and every index names a vertex.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Handle to a mesh owned by a [`ResourceRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// Handle to a material owned by a [`ResourceRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialHandle(pub u64);

/// What an entity draws with: a mesh and a material, both shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Renderable {
    pub mesh: MeshHandle,
    pub material: MaterialHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Indexed triangle geometry, already loaded by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// A unit quad in the XY plane facing -Z.
    pub fn unit_quad() -> Self {
        let n = [0.0, 0.0, -1.0];
        Self {
            name: "unit_quad".into(),
            vertices: vec![
                Vertex::new([-0.5, -0.5, 0.0], n, [0.0, 1.0]),
                Vertex::new([-0.5, 0.5, 0.0], n, [0.0, 0.0]),
                Vertex::new([0.5, 0.5, 0.0], n, [1.0, 0.0]),
                Vertex::new([0.5, -0.5, 0.0], n, [1.0, 1.0]),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }
}

/// Shader pair plus a base color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub vertex_shader: String,
    pub pixel_shader: String,
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".into(),
            vertex_shader: "VertexShader.cso".into(),
            pixel_shader: "PixelShader.cso".into(),
            base_color: [0.8, 0.8, 0.8, 1.0],
        }
    }
}

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("mesh {0:?} is not registered")]
    MeshNotFound(MeshHandle),
    #[error("material {0:?} is not registered")]
    MaterialNotFound(MaterialHandle),
    #[error("mesh `{0}` has no indices")]
    EmptyMesh(String),
    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
}

/// Owner of all mesh and material descriptors.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    meshes: BTreeMap<MeshHandle, Mesh>,
    materials: BTreeMap<MaterialHandle, Material>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a mesh, returning its content handle.
    pub fn register_mesh(&mut self, mesh: Mesh) -> Result<MeshHandle, AssetError> {
        if mesh.indices.is_empty() {
            return Err(AssetError::EmptyMesh(mesh.name));
        }
        let vertex_count = mesh.vertices.len();
        if let Some(&index) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(AssetError::IndexOutOfBounds {
                index,
                vertex_count,
            });
        }

        let handle = MeshHandle(mesh_hash(&mesh));
        tracing::debug!(
            name = %mesh.name,
            vertices = vertex_count,
            indices = mesh.indices.len(),
            "registered mesh"
        );
        self.meshes.insert(handle, mesh);
        Ok(handle)
    }

    pub fn register_material(&mut self, material: Material) -> MaterialHandle {
        let handle = MaterialHandle(material_hash(&material));
        tracing::debug!(name = %material.name, "registered material");
        self.materials.insert(handle, material);
        handle
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(&handle)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(&handle)
    }

    /// Look up both halves of a renderable.
    pub fn resolve(&self, renderable: Renderable) -> Result<(&Mesh, &Material), AssetError> {
        let mesh = self
            .mesh(renderable.mesh)
            .ok_or(AssetError::MeshNotFound(renderable.mesh))?;
        let material = self
            .material(renderable.material)
            .ok_or(AssetError::MaterialNotFound(renderable.material))?;
        Ok((mesh, material))
    }

    pub fn len(&self) -> usize {
        self.meshes.len() + self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty() && self.materials.is_empty()
    }
}

fn mesh_hash(mesh: &Mesh) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(mesh.name.as_bytes());
    for v in &mesh.vertices {
        for f in v.position.iter().chain(&v.normal).chain(&v.uv) {
            hasher.update(f.to_le_bytes());
        }
    }
    for i in &mesh.indices {
        hasher.update(i.to_le_bytes());
    }
    truncate_digest(hasher)
}

fn material_hash(material: &Material) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(material.name.as_bytes());
    hasher.update(material.vertex_shader.as_bytes());
    hasher.update(material.pixel_shader.as_bytes());
    for c in &material.base_color {
        hasher.update(c.to_le_bytes());
    }
    truncate_digest(hasher)
}

fn truncate_digest(hasher: Sha256) -> u64 {
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    u64::from_le_bytes(bytes)
}

pub fn crate_info() -> &'static str {
    "stagehand-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_resolve() {
        let mut registry = ResourceRegistry::new();
        let mesh = registry.register_mesh(Mesh::unit_quad()).unwrap();
        let material = registry.register_material(Material::default());

        let (m, mat) = registry.resolve(Renderable { mesh, material }).unwrap();
        assert_eq!(m.index_count(), 6);
        assert_eq!(mat.name, "default");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn content_addressed_dedup() {
        let mut registry = ResourceRegistry::new();
        let a = registry.register_mesh(Mesh::unit_quad()).unwrap();
        let b = registry.register_mesh(Mesh::unit_quad()).unwrap();
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rejects_bad_indices() {
        let mut registry = ResourceRegistry::new();
        let mut mesh = Mesh::unit_quad();
        mesh.indices.push(9);
        assert_eq!(
            registry.register_mesh(mesh),
            Err(AssetError::IndexOutOfBounds {
                index: 9,
                vertex_count: 4
            })
        );

        let empty = Mesh {
            name: "empty".into(),
            vertices: Vec::new(),
            indices: Vec::new(),
        };
        assert!(matches!(
            registry.register_mesh(empty),
            Err(AssetError::EmptyMesh(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_handles_fail_to_resolve() {
        let registry = ResourceRegistry::new();
        let r = Renderable {
            mesh: MeshHandle(1),
            material: MaterialHandle(2),
        };
        assert_eq!(
            registry.resolve(r),
            Err(AssetError::MeshNotFound(MeshHandle(1)))
        );
    }
}

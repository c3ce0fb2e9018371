use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use stagehand_assets::Renderable;
use stagehand_camera::Camera;
use stagehand_common::EntityId;
use stagehand_kernel::Scene;

/// Per-draw constant block: world, view and projection, column-major.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ShaderConstants {
    pub world: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl ShaderConstants {
    pub fn new(world: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            world: world.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }

    /// Raw bytes for a constant buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// One entity's contribution to a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub entity: EntityId,
    pub renderable: Renderable,
    pub world: Mat4,
}

/// Everything a renderer needs for one tick, copied out of the scene and
/// camera so nothing can be read mid-update.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub camera_position: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    pub items: Vec<DrawItem>,
}

impl Frame {
    /// Snapshot the camera's cached matrices and every entity's committed
    /// world matrix, in scene order.
    pub fn capture(scene: &Scene, camera: &Camera) -> Self {
        let items = scene
            .entities()
            .map(|e| DrawItem {
                entity: e.id(),
                renderable: e.renderable(),
                world: e.world_matrix(),
            })
            .collect();
        Self {
            tick: scene.tick(),
            camera_position: camera.position(),
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            items,
        }
    }

    pub fn constants(&self) -> Vec<ShaderConstants> {
        self.items
            .iter()
            .map(|item| ShaderConstants::new(item.world, self.view, self.projection))
            .collect()
    }

    /// All constant blocks packed back to back.
    pub fn constant_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.constants()).to_vec()
    }
}

// src/gfx/geometry/mod.rs
//! Procedural geometry for shapes that never come from model files:
//! the showroom floor and the garden's data spheres.

pub mod primitives;

pub use primitives::{generate_plane, generate_sphere};

use crate::gfx::scene::Mesh;

/// Generated geometry ready for mesh construction.
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices, counter-clockwise winding
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens into the renderer's mesh representation.
    pub fn into_mesh(self) -> Mesh {
        let positions = self.vertices.iter().flatten().copied().collect();
        let normals = self.normals.iter().flatten().copied().collect();
        Mesh::new(positions, normals, self.indices)
    }
}

// src/gfx/scene/vertex.rs
//! Vertex data structures for mesh rendering.

/// A 3D vertex with position and normal data.
///
/// `#[repr(C)]` is required so the layout matches what the GPU expects when
/// the vertex buffer is uploaded with bytemuck.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// Position [x, y, z]
    pub position: [f32; 3],
    /// Normal [nx, ny, nz] for lighting
    pub normal: [f32; 3],
}

impl Vertex3D {
    /// Vertex buffer layout for the forward pipeline.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

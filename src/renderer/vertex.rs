//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Position-only 2D vertex in normalized device coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

/// Colors for scene elements
pub mod colors {
    /// Disc center (red)
    pub const CIRCLE_CENTER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Disc edge (green)
    pub const CIRCLE_BORDER: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    /// Segment fill (blue); hardcoded in segment.wgsl as well
    pub const SEGMENT: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    /// Everything outside the disc (yellow)
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
}

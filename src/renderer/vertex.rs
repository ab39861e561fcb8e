//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in an interleaved buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for scene elements
pub mod colors {
    pub const PARTICLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

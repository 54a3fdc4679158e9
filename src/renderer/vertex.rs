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

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLAY_AREA: [f32; 4] = [0.03, 0.03, 0.09, 1.0];
    pub const GROUND: [f32; 4] = [0.6, 0.15, 0.2, 1.0];
    pub const PLAYER: [f32; 4] = [0.2, 0.8, 1.0, 1.0];
    pub const PLAYER_COCKPIT: [f32; 4] = [0.9, 0.95, 1.0, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 0.95, 0.4, 1.0];
    pub const ENEMY: [f32; 4] = [1.0, 0.3, 0.35, 1.0];
    pub const ENEMY_CORE: [f32; 4] = [0.5, 0.05, 0.1, 1.0];
    pub const EXPLOSION: [f32; 3] = [1.0, 0.6, 0.15];
    pub const PARTICLE: [f32; 3] = [1.0, 0.8, 0.3];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// `0xRRGGBB` to RGBA floats
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const SKY: [f32; 4] = rgb(0x5c94fc);
    pub const CLOUD: [f32; 4] = rgb(0xffffff);

    pub const GROUND_TOP: [f32; 4] = rgb(0xc84c0c);
    pub const GROUND_DEEP: [f32; 4] = rgb(0x8b4513);
    pub const GRASS: [f32; 4] = rgb(0x00aa00);

    pub const BRICK_EDGE: [f32; 4] = rgb(0xd2691e);
    pub const BRICK_FACE: [f32; 4] = rgb(0x8b4513);
    pub const BRICK_MORTAR: [f32; 4] = rgb(0xa0522d);

    pub const QUESTION_EDGE: [f32; 4] = rgb(0xffd700);
    pub const QUESTION_FACE: [f32; 4] = rgb(0xffa500);
    pub const QUESTION_MARK: [f32; 4] = rgb(0x000000);
    pub const SPENT_EDGE: [f32; 4] = rgb(0x8b7355);
    pub const SPENT_FACE: [f32; 4] = rgb(0x654321);

    pub const PIPE_BODY: [f32; 4] = rgb(0x00aa00);
    pub const PIPE_RIM: [f32; 4] = rgb(0x00cc00);
    pub const PIPE_SHADE: [f32; 4] = rgb(0x008800);

    pub const COIN: [f32; 4] = rgb(0xffd700);
    pub const COIN_INNER: [f32; 4] = rgb(0xffa500);

    pub const ENEMY_BODY: [f32; 4] = rgb(0x8b4513);
    pub const ENEMY_HEAD: [f32; 4] = rgb(0x654321);
    pub const EYE_WHITE: [f32; 4] = rgb(0xffffff);
    pub const EYE_PUPIL: [f32; 4] = rgb(0x000000);

    pub const MUSHROOM_CAP: [f32; 4] = rgb(0xff0000);
    pub const MUSHROOM_STEM: [f32; 4] = rgb(0xffeecc);
    pub const FLOWER_CORE: [f32; 4] = rgb(0xffff00);
    pub const FLOWER_PETAL: [f32; 4] = rgb(0xff6600);
    pub const FLOWER_STEM: [f32; 4] = rgb(0x00aa00);

    pub const PLAYER: [f32; 4] = rgb(0xff0000);
    pub const PLAYER_POWERED: [f32; 4] = rgb(0xff8800);
    pub const PLAYER_FACE: [f32; 4] = rgb(0xffcc99);
    pub const PLAYER_MUSTACHE: [f32; 4] = rgb(0x654321);
    pub const PLAYER_LEGS: [f32; 4] = rgb(0x0000ff);
}

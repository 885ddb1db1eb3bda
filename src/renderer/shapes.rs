//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in screen pixels (origin top-left,
//! +y down). The pipeline maps them to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> [Vertex; 6] {
    let (x2, y2) = (x + w, y + h);
    [
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
    ]
}

/// Rectangle with a `border`-pixel outer color and an inner fill
pub fn framed_rect(
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    border: f32,
    outer: [f32; 4],
    inner: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(12);
    vertices.extend(rect(x, y, w, h, outer));
    vertices.extend(rect(x + border, y + border, w - 2.0 * border, h - 2.0 * border, inner));
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Puffy cloud: four overlapping circles anchored at `origin`
pub fn cloud(origin: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let puffs = [
        (Vec2::new(0.0, 0.0), 20.0),
        (Vec2::new(25.0, 0.0), 25.0),
        (Vec2::new(50.0, 0.0), 20.0),
        (Vec2::new(25.0, -15.0), 20.0),
    ];
    puffs
        .iter()
        .flat_map(|&(offset, radius)| circle(origin + offset, radius, color, segments))
        .collect()
}

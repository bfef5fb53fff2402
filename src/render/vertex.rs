use crate::geometry::Vector2f;

/// A point of geometry paired with its texture-space coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vector2f,
    pub tex_coords: Vector2f,
}

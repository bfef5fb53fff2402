use crate::geometry::{Transform, Vector2f};

/// Position, rotation, scale and origin with a derived affine transform.
///
/// Drawables embed this instead of inheriting transform behavior; the
/// combined transform is recomputed on demand from the four components.
#[derive(Debug, Clone, Copy)]
pub struct Transformable {
    position: Vector2f,
    rotation: f32,
    scale: Vector2f,
    origin: Vector2f,
}

impl Transformable {
    pub fn new() -> Self {
        Self {
            position: Vector2f::ZERO,
            rotation: 0.0,
            scale: Vector2f::new(1.0, 1.0),
            origin: Vector2f::ZERO,
        }
    }

    pub fn position(&self) -> Vector2f {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2f) {
        self.position = position;
    }

    /// Rotation in degrees, normalized into [0, 360)
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees.rem_euclid(360.0);
    }

    pub fn scale(&self) -> Vector2f {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vector2f) {
        self.scale = scale;
    }

    /// Local point that position, rotation and scale pivot around
    pub fn origin(&self) -> Vector2f {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vector2f) {
        self.origin = origin;
    }

    pub fn translate(&mut self, offset: Vector2f) {
        self.position += offset;
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.set_rotation(self.rotation + degrees);
    }

    /// The combined local-to-world transform
    pub fn transform(&self) -> Transform {
        Transform::translation(self.position)
            * Transform::rotation(self.rotation)
            * Transform::scaling(self.scale)
            * Transform::translation(-self.origin)
    }
}

impl Default for Transformable {
    fn default() -> Self {
        Self::new()
    }
}

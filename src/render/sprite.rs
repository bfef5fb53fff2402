use crate::geometry::{FloatRect, IntRect, Vector2f};
use crate::render::{Color, Texture};

/// A drawable region of a single native texture.
///
/// The texture is borrowed, not owned, so a sprite is a cheap descriptor:
/// placement, region and tint around shared pixel storage.
#[derive(Debug, Clone)]
pub struct Sprite<'t> {
    texture: &'t Texture,
    position: Vector2f,
    texture_rect: IntRect,
    color: Color,
}

impl<'t> Sprite<'t> {
    /// Create a white sprite at the origin covering the whole texture
    pub fn new(texture: &'t Texture) -> Self {
        let (width, height) = texture.size();

        Self {
            texture,
            position: Vector2f::ZERO,
            texture_rect: IntRect::new(0, 0, width as i32, height as i32),
            color: Color::WHITE,
        }
    }

    pub fn texture(&self) -> &'t Texture {
        self.texture
    }

    pub fn position(&self) -> Vector2f {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2f) {
        self.position = position;
    }

    pub fn texture_rect(&self) -> IntRect {
        self.texture_rect
    }

    pub fn set_texture_rect(&mut self, rect: IntRect) {
        self.texture_rect = rect;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// The displayed region's size, anchored at the sprite position
    pub fn bounds(&self) -> FloatRect {
        FloatRect::new(
            self.position.x,
            self.position.y,
            self.texture_rect.width as f32,
            self.texture_rect.height as f32,
        )
    }
}

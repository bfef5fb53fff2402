use crate::geometry::{FloatRect, IntRect, Transform, Vector2f};
use crate::render::{
    Color, Drawable, RenderStates, RenderTarget, Sprite, Transformable, Vertex,
};
use crate::tile::TiledTexture;

/// A drawable, transformable sprite backed by a [`TiledTexture`].
///
/// Oversized images cannot live in one native texture, so this sprite holds
/// one sub-sprite per tile and draws them as a unit, behaving like a native
/// sprite at the [`RenderTarget`] seam. The texture is borrowed for the
/// sprite's lifetime, so the keep-the-texture-alive contract of the
/// descriptor collection is enforced at compile time.
#[derive(Debug, Clone)]
pub struct TiledSprite<'t> {
    transformable: Transformable,
    sprites: Vec<Sprite<'t>>,
    size: Vector2f,
    color: Color,
    vertices: [Vertex; 4],
    texture: Option<&'t TiledTexture>,
    texture_rect: Option<IntRect>,
}

impl<'t> TiledSprite<'t> {
    /// Create an empty sprite that uses no texture
    pub fn new() -> Self {
        Self {
            transformable: Transformable::new(),
            sprites: Vec::new(),
            size: Vector2f::ZERO,
            color: Color::WHITE,
            vertices: [Vertex::default(); 4],
            texture: None,
            texture_rect: None,
        }
    }

    /// Create a sprite displaying the whole of `texture`
    pub fn with_texture(texture: &'t TiledTexture) -> Self {
        let mut sprite = Self::new();
        sprite.set_texture(texture, false);
        sprite
    }

    /// Create a sprite displaying the `rect` region of `texture`
    pub fn with_texture_rect(texture: &'t TiledTexture, rect: IntRect) -> Self {
        let mut sprite = Self::new();
        sprite.set_texture_rect(rect);
        sprite.set_texture(texture, false);
        sprite
    }

    /// Bind the sprite to a tiled texture, rebuilding every tile sprite.
    ///
    /// If no texture rectangle was ever set, or `reset_rect` is true, the
    /// rectangle resets to the texture's full bounds first. A rectangle set
    /// explicitly - including an empty one - survives a rebind.
    ///
    /// The whole descriptor collection is rebuilt even when the rectangle is
    /// unchanged; cost is proportional to the tile count.
    pub fn set_texture(&mut self, texture: &'t TiledTexture, reset_rect: bool) {
        if reset_rect || self.texture_rect.is_none() {
            let (width, height) = texture.size();
            self.set_texture_rect(IntRect::new(0, 0, width as i32, height as i32));
        }

        self.texture = Some(texture);
        self.size = texture.fill_sprites(self.color, &mut self.sprites);
        self.clip_sprites();
    }

    /// Restrict display to `rect`, given in logical image coordinates.
    ///
    /// Redundant calls with the current rectangle are no-ops. Only the
    /// bounding-box vertices are recomputed here; the per-tile sprites are
    /// re-derived on the next [`set_texture`](Self::set_texture).
    pub fn set_texture_rect(&mut self, rect: IntRect) {
        if self.texture_rect != Some(rect) {
            self.texture_rect = Some(rect);
            self.update_positions();
            self.update_tex_coords();
        }
    }

    /// Tint the sprite, propagating the color to every tile sprite
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        for sprite in &mut self.sprites {
            sprite.set_color(color);
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The bound texture, or `None` for an unbound sprite
    pub fn texture(&self) -> Option<&'t TiledTexture> {
        self.texture
    }

    /// The current texture rectangle; the zero rectangle while never set
    pub fn texture_rect(&self) -> IntRect {
        self.texture_rect.unwrap_or_default()
    }

    /// Bounding rectangle in local coordinates, anchored at (0, 0)
    pub fn local_bounds(&self) -> FloatRect {
        FloatRect::new(0.0, 0.0, self.size.x, self.size.y)
    }

    /// Bounding rectangle with the current transform applied
    pub fn global_bounds(&self) -> FloatRect {
        self.transform().transform_rect(self.local_bounds())
    }

    pub fn position(&self) -> Vector2f {
        self.transformable.position()
    }

    pub fn set_position(&mut self, position: Vector2f) {
        self.transformable.set_position(position);
    }

    pub fn rotation(&self) -> f32 {
        self.transformable.rotation()
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.transformable.set_rotation(degrees);
    }

    pub fn scale(&self) -> Vector2f {
        self.transformable.scale()
    }

    pub fn set_scale(&mut self, scale: Vector2f) {
        self.transformable.set_scale(scale);
    }

    pub fn origin(&self) -> Vector2f {
        self.transformable.origin()
    }

    pub fn set_origin(&mut self, origin: Vector2f) {
        self.transformable.set_origin(origin);
    }

    pub fn translate(&mut self, offset: Vector2f) {
        self.transformable.translate(offset);
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.transformable.rotate(degrees);
    }

    pub fn transform(&self) -> Transform {
        self.transformable.transform()
    }

    /// Drop tile sprites outside the texture rectangle and trim the rest to
    /// their overlap, re-anchored so the rectangle's corner is local (0, 0).
    #[expect(
        clippy::cast_possible_truncation,
        reason = "tile offsets are whole pixels well below i32::MAX"
    )]
    fn clip_sprites(&mut self) {
        let Some(rect) = self.texture_rect else {
            return;
        };

        self.sprites.retain_mut(|sprite| {
            let position = sprite.position();
            let region = sprite.texture_rect();
            let tile_bounds = IntRect::new(
                position.x as i32,
                position.y as i32,
                region.width,
                region.height,
            );

            match tile_bounds.intersection(&rect) {
                Some(overlap) => {
                    sprite.set_position(Vector2f::new(
                        (overlap.x - rect.x) as f32,
                        (overlap.y - rect.y) as f32,
                    ));
                    sprite.set_texture_rect(IntRect::new(
                        region.x + overlap.x - tile_bounds.x,
                        region.y + overlap.y - tile_bounds.y,
                        overlap.width,
                        overlap.height,
                    ));
                    true
                }
                None => false,
            }
        });
    }

    fn update_positions(&mut self) {
        let rect = self.texture_rect();
        let width = rect.width as f32;
        let height = rect.height as f32;

        self.vertices[0].position = Vector2f::new(0.0, 0.0);
        self.vertices[1].position = Vector2f::new(0.0, height);
        self.vertices[2].position = Vector2f::new(width, 0.0);
        self.vertices[3].position = Vector2f::new(width, height);
    }

    fn update_tex_coords(&mut self) {
        let rect = self.texture_rect();
        let left = rect.x as f32;
        let right = left + rect.width as f32;
        let top = rect.y as f32;
        let bottom = top + rect.height as f32;

        self.vertices[0].tex_coords = Vector2f::new(left, top);
        self.vertices[1].tex_coords = Vector2f::new(left, bottom);
        self.vertices[2].tex_coords = Vector2f::new(right, top);
        self.vertices[3].tex_coords = Vector2f::new(right, bottom);
    }

    #[cfg(test)]
    fn tile_sprites(&self) -> &[Sprite<'t>] {
        &self.sprites
    }
}

impl Default for TiledSprite<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawable for TiledSprite<'_> {
    fn draw(&self, target: &mut dyn RenderTarget, states: RenderStates) {
        let states = RenderStates {
            transform: states.transform * self.transform(),
        };

        for sprite in &self.sprites {
            target.draw_sprite(sprite, &states);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// Render target that only records what it was asked to draw
    struct RecordingTarget {
        calls: Vec<(Vector2f, IntRect)>,
    }

    impl RecordingTarget {
        fn new() -> Self {
            Self { calls: Vec::new() }
        }
    }

    impl RenderTarget for RecordingTarget {
        fn draw_sprite(&mut self, sprite: &Sprite<'_>, _states: &RenderStates) {
            self.calls.push((sprite.position(), sprite.texture_rect()));
        }
    }

    fn gradient_image(width: u32, height: u32) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8, 255]);
        }
        img
    }

    fn split_300(tile_size: u32) -> TiledTexture {
        TiledTexture::with_tile_size(&gradient_image(300, 300), tile_size).unwrap()
    }

    fn rect_near(a: FloatRect, b: FloatRect) -> bool {
        (a.x - b.x).abs() < 1e-3
            && (a.y - b.y).abs() < 1e-3
            && (a.width - b.width).abs() < 1e-3
            && (a.height - b.height).abs() < 1e-3
    }

    #[test]
    fn test_unbound_sprite_draws_nothing() {
        let sprite = TiledSprite::new();
        let mut target = RecordingTarget::new();

        sprite.draw(&mut target, RenderStates::default());

        assert!(target.calls.is_empty());
        assert!(sprite.texture().is_none());
        assert_eq!(sprite.local_bounds(), FloatRect::default());
    }

    #[test]
    fn test_bind_defaults_rect_to_full_bounds() {
        let texture = split_300(256);
        let sprite = TiledSprite::with_texture(&texture);

        assert_eq!(sprite.texture_rect(), IntRect::new(0, 0, 300, 300));
        assert_eq!(sprite.tile_sprites().len(), 4);
        assert!(sprite.texture().is_some());
    }

    #[test]
    fn test_texture_rect_roundtrip() {
        let mut sprite = TiledSprite::new();
        let rect = IntRect::new(10, 20, 30, 40);

        sprite.set_texture_rect(rect);

        assert_eq!(sprite.texture_rect(), rect);
    }

    #[test]
    fn test_redundant_rect_leaves_vertices_untouched() {
        let mut sprite = TiledSprite::new();
        let rect = IntRect::new(5, 5, 50, 60);

        sprite.set_texture_rect(rect);
        let before = sprite.vertices;
        sprite.set_texture_rect(rect);

        assert_eq!(sprite.vertices, before);
    }

    #[test]
    fn test_vertices_follow_rect() {
        let mut sprite = TiledSprite::new();
        sprite.set_texture_rect(IntRect::new(10, 20, 100, 50));

        assert_eq!(sprite.vertices[0].position, Vector2f::new(0.0, 0.0));
        assert_eq!(sprite.vertices[1].position, Vector2f::new(0.0, 50.0));
        assert_eq!(sprite.vertices[2].position, Vector2f::new(100.0, 0.0));
        assert_eq!(sprite.vertices[3].position, Vector2f::new(100.0, 50.0));

        assert_eq!(sprite.vertices[0].tex_coords, Vector2f::new(10.0, 20.0));
        assert_eq!(sprite.vertices[3].tex_coords, Vector2f::new(110.0, 70.0));
    }

    #[test]
    fn test_local_bounds_matches_fill_sprites_size() {
        let texture = split_300(256);
        let sprite = TiledSprite::with_texture(&texture);

        let mut sprites = Vec::new();
        let size = texture.fill_sprites(Color::WHITE, &mut sprites);

        assert_eq!(sprite.local_bounds(), FloatRect::new(0.0, 0.0, size.x, size.y));
    }

    #[test]
    fn test_global_bounds_translation() {
        let texture = split_300(256);
        let mut sprite = TiledSprite::with_texture(&texture);

        sprite.set_position(Vector2f::new(10.0, 20.0));

        assert!(rect_near(
            sprite.global_bounds(),
            FloatRect::new(10.0, 20.0, 300.0, 300.0)
        ));
    }

    #[test]
    fn test_global_bounds_rotation() {
        let texture =
            TiledTexture::with_tile_size(&gradient_image(300, 200), 256).unwrap();
        let mut sprite = TiledSprite::with_texture(&texture);

        sprite.set_rotation(90.0);

        assert!(rect_near(
            sprite.global_bounds(),
            FloatRect::new(-200.0, 0.0, 200.0, 300.0)
        ));
    }

    #[test]
    fn test_color_propagates_to_all_tiles() {
        let texture = split_300(256);
        let mut sprite = TiledSprite::with_texture(&texture);

        sprite.set_color(Color::RED);

        assert_eq!(sprite.color(), Color::RED);
        assert_eq!(sprite.tile_sprites().len(), 4);
        for tile_sprite in sprite.tile_sprites() {
            assert_eq!(tile_sprite.color(), Color::RED);
        }
    }

    #[test]
    fn test_color_survives_rebind() {
        let texture = split_300(256);
        let mut sprite = TiledSprite::new();

        sprite.set_color(Color::BLUE);
        sprite.set_texture(&texture, false);

        for tile_sprite in sprite.tile_sprites() {
            assert_eq!(tile_sprite.color(), Color::BLUE);
        }
    }

    #[test]
    fn test_draw_issues_one_call_per_tile() {
        let texture = split_300(256);
        let sprite = TiledSprite::with_texture(&texture);
        let mut target = RecordingTarget::new();

        sprite.draw(&mut target, RenderStates::default());

        assert_eq!(target.calls.len(), 4);
        assert_eq!(target.calls[1].0, Vector2f::new(256.0, 0.0));
    }

    #[test]
    fn test_rect_set_before_bind_is_preserved() {
        let texture = split_300(256);
        let mut sprite = TiledSprite::new();

        sprite.set_texture_rect(IntRect::new(200, 200, 100, 100));
        sprite.set_texture(&texture, false);

        assert_eq!(sprite.texture_rect(), IntRect::new(200, 200, 100, 100));
    }

    #[test]
    fn test_sub_rect_clips_descriptors() {
        let texture = split_300(256);
        let sprite = TiledSprite::with_texture_rect(&texture, IntRect::new(200, 200, 100, 100));

        // The corner rectangle overlaps all four tiles
        let sprites = sprite.tile_sprites();
        assert_eq!(sprites.len(), 4);

        assert_eq!(sprites[0].position(), Vector2f::new(0.0, 0.0));
        assert_eq!(sprites[0].texture_rect(), IntRect::new(200, 200, 56, 56));

        assert_eq!(sprites[1].position(), Vector2f::new(56.0, 0.0));
        assert_eq!(sprites[1].texture_rect(), IntRect::new(0, 200, 44, 56));

        assert_eq!(sprites[2].position(), Vector2f::new(0.0, 56.0));
        assert_eq!(sprites[2].texture_rect(), IntRect::new(200, 0, 56, 44));

        assert_eq!(sprites[3].position(), Vector2f::new(56.0, 56.0));
        assert_eq!(sprites[3].texture_rect(), IntRect::new(0, 0, 44, 44));
    }

    #[test]
    fn test_sub_rect_drops_disjoint_tiles() {
        let texture = split_300(256);
        let sprite = TiledSprite::with_texture_rect(&texture, IntRect::new(0, 0, 100, 100));

        let sprites = sprite.tile_sprites();
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].texture_rect(), IntRect::new(0, 0, 100, 100));
    }

    #[test]
    fn test_rebind_with_reset_restores_full_rect() {
        let texture = split_300(256);
        let mut sprite = TiledSprite::with_texture_rect(&texture, IntRect::new(0, 0, 100, 100));

        sprite.set_texture(&texture, true);

        assert_eq!(sprite.texture_rect(), IntRect::new(0, 0, 300, 300));
        assert_eq!(sprite.tile_sprites().len(), 4);
    }

    #[test]
    fn test_composited_draw_reproduces_source() {
        use crate::render::ImageTarget;

        let img = gradient_image(300, 300);
        let texture = TiledTexture::with_tile_size(&img, 256).unwrap();
        let sprite = TiledSprite::with_texture(&texture);

        let mut target = ImageTarget::new(300, 300);
        sprite.draw(&mut target, RenderStates::default());

        assert_eq!(target.image(), &img);
    }

    #[test]
    fn test_composited_sub_rect_reproduces_crop() {
        use crate::render::ImageTarget;
        use image::imageops;

        let img = gradient_image(300, 300);
        let texture = TiledTexture::with_tile_size(&img, 256).unwrap();
        let sprite = TiledSprite::with_texture_rect(&texture, IntRect::new(200, 220, 80, 60));

        let mut target = ImageTarget::new(80, 60);
        sprite.draw(&mut target, RenderStates::default());

        let expected = imageops::crop_imm(&img, 200, 220, 80, 60).to_image();
        assert_eq!(target.image(), &expected);
    }

    #[test]
    fn test_empty_rect_survives_rebind_and_draws_nothing() {
        let texture = split_300(256);
        let mut sprite = TiledSprite::new();

        sprite.set_texture_rect(IntRect::default());
        sprite.set_texture(&texture, false);

        assert_eq!(sprite.texture_rect(), IntRect::default());
        assert!(sprite.tile_sprites().is_empty());

        let mut target = RecordingTarget::new();
        sprite.draw(&mut target, RenderStates::default());
        assert!(target.calls.is_empty());
    }
}

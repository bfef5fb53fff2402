use image::{Rgba, RgbaImage};

use crate::geometry::{FloatRect, Transform, Vector2f};
use crate::render::{Color, RenderStates, RenderTarget, Sprite};

/// A software render target compositing sprites into an RGBA image.
///
/// Sprites are rasterized by inverse-mapping each covered target pixel into
/// texture space and sampling the nearest texel, so arbitrary affine
/// transforms work; the identity transform reproduces texels exactly.
#[derive(Debug)]
pub struct ImageTarget {
    image: RgbaImage,
}

impl ImageTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn clear(&mut self, color: Color) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([color.r, color.g, color.b, color.a]);
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl RenderTarget for ImageTarget {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "scan bounds are clamped to the target before conversion"
    )]
    fn draw_sprite(&mut self, sprite: &Sprite<'_>, states: &RenderStates) {
        let region = sprite.texture_rect();
        if region.is_empty() {
            return;
        }

        let local = FloatRect::new(0.0, 0.0, region.width as f32, region.height as f32);
        let to_target = states.transform * Transform::translation(sprite.position());
        let to_local = to_target.inverse();
        let hull = to_target.transform_rect(local);

        let x0 = hull.x.floor().max(0.0) as u32;
        let y0 = hull.y.floor().max(0.0) as u32;
        let x1 = hull.right().ceil().min(self.image.width() as f32) as u32;
        let y1 = hull.bottom().ceil().min(self.image.height() as f32) as u32;

        for py in y0..y1 {
            for px in x0..x1 {
                // Sample at the pixel center so integer translations stay exact
                let center = Vector2f::new(px as f32 + 0.5, py as f32 + 0.5);
                let local_point = to_local.transform_point(center);

                if local_point.x < 0.0
                    || local_point.y < 0.0
                    || local_point.x >= local.width
                    || local_point.y >= local.height
                {
                    continue;
                }

                let tx = (region.x + local_point.x as i32) as u32;
                let ty = (region.y + local_point.y as i32) as u32;

                let texel = sprite.texture().pixel(tx, ty);
                let src = modulate(texel, sprite.color());
                let dst = self.image.get_pixel_mut(px, py);
                *dst = blend(src, *dst);
            }
        }
    }
}

/// Channel-wise multiply of a texel by the sprite tint, treating 255 as 1.0
#[expect(clippy::cast_possible_truncation, reason = "products are divided back below 256")]
fn modulate(texel: Rgba<u8>, color: Color) -> Rgba<u8> {
    let channel = |t: u8, c: u8| ((u16::from(t) * u16::from(c)) / 255) as u8;

    Rgba([
        channel(texel[0], color.r),
        channel(texel[1], color.g),
        channel(texel[2], color.b),
        channel(texel[3], color.a),
    ])
}

/// Source-over blend of straight-alpha pixels
#[expect(clippy::cast_possible_truncation, reason = "quotients are bounded by 255")]
fn blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = u32::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    let out_a = sa + da * inv / 255;
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |s: u8, d: u8| {
        ((u32::from(s) * sa + u32::from(d) * da * inv / 255) / out_a) as u8
    };

    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        out_a as u8,
    ])
}

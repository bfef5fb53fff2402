use anyhow::Result;
use image::{Rgba, RgbaImage};

use crate::error::TesseraError;

/// A native texture: one bounded-size block of RGBA pixel storage.
///
/// Textures model the host backend's hard dimension limit; anything larger
/// than [`MAXIMUM_SIZE`](Self::MAXIMUM_SIZE) on a side must be stored as a
/// tile grid instead (see `TiledTexture`).
#[derive(Debug, Clone)]
pub struct Texture {
    image: RgbaImage,
}

impl Texture {
    /// The largest width or height a single texture may have
    pub const MAXIMUM_SIZE: u32 = 4096;

    /// Wrap an image as a texture.
    ///
    /// Fails if either dimension exceeds [`MAXIMUM_SIZE`](Self::MAXIMUM_SIZE).
    pub fn from_image(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width > Self::MAXIMUM_SIZE || height > Self::MAXIMUM_SIZE {
            return Err(TesseraError::TextureTooLarge {
                width,
                height,
                max: Self::MAXIMUM_SIZE,
            }
            .into());
        }

        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Read one pixel. `x` and `y` must lie within [`size`](Self::size).
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

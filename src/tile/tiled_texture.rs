use std::path::Path;

use anyhow::Result;
use image::{ImageReader, RgbaImage, imageops};
use log::debug;

use crate::error::TesseraError;
use crate::geometry::Vector2f;
use crate::render::{Color, Sprite, Texture};

/// One native-texture-sized piece of a logical oversized image
#[derive(Debug, Clone)]
pub struct Tile {
    /// Horizontal pixel offset within the logical image
    pub x: u32,
    /// Vertical pixel offset within the logical image
    pub y: u32,
    /// Pixel storage for this piece
    pub texture: Texture,
}

/// An oversized logical image stored as a row-major grid of tiles.
///
/// Each tile is at most the tile bound on a side, and the grid covers the
/// logical rectangle exactly, with no gaps and no overlaps. A `TiledTexture`
/// must outlive every sprite derived from it; sprites borrow the tile
/// textures rather than copying them.
#[derive(Debug, Clone)]
pub struct TiledTexture {
    tiles: Vec<Tile>,
    width: u32,
    height: u32,
}

impl TiledTexture {
    /// Split an image into tiles bounded by [`Texture::MAXIMUM_SIZE`]
    pub fn from_image(image: &RgbaImage) -> Result<Self> {
        Self::with_tile_size(image, Texture::MAXIMUM_SIZE)
    }

    /// Split an image into tiles of at most `tile_size` on a side.
    ///
    /// `tile_size` must be between 1 and [`Texture::MAXIMUM_SIZE`].
    pub fn with_tile_size(image: &RgbaImage, tile_size: u32) -> Result<Self> {
        if tile_size == 0 || tile_size > Texture::MAXIMUM_SIZE {
            return Err(TesseraError::InvalidTileSize {
                tile_size,
                max: Texture::MAXIMUM_SIZE,
            }
            .into());
        }

        let (width, height) = image.dimensions();
        let mut tiles = Vec::new();

        let mut y = 0;
        while y < height {
            let tile_height = tile_size.min(height - y);
            let mut x = 0;
            while x < width {
                let tile_width = tile_size.min(width - x);
                let piece = imageops::crop_imm(image, x, y, tile_width, tile_height).to_image();
                tiles.push(Tile {
                    x,
                    y,
                    texture: Texture::from_image(piece)?,
                });
                x += tile_width;
            }
            y += tile_height;
        }

        debug!(
            "Split {}x{} image into {} tile(s) (tile size {})",
            width,
            height,
            tiles.len(),
            tile_size
        );

        Ok(Self {
            tiles,
            width,
            height,
        })
    }

    /// Load an image file and split it with the default tile bound
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_file_with_tile_size(path, Texture::MAXIMUM_SIZE)
    }

    /// Load an image file and split it with an explicit tile bound
    pub fn from_file_with_tile_size(path: &Path, tile_size: u32) -> Result<Self> {
        if !path.exists() {
            return Err(TesseraError::InputNotFound(path.to_path_buf()).into());
        }

        let image = ImageReader::open(path)
            .map_err(|e| TesseraError::ImageLoad {
                path: path.to_path_buf(),
                source: e.into(),
            })?
            .decode()
            .map_err(|e| TesseraError::ImageLoad {
                path: path.to_path_buf(),
                source: e,
            })?
            .into_rgba8();

        Self::with_tile_size(&image, tile_size)
    }

    /// Logical size of the full image in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Fill `out` with one sprite per tile, each positioned at its tile's
    /// offset, covering the tile's full region and tinted `color`.
    ///
    /// The sprites reference, not copy, the tile textures. Any previous
    /// contents of `out` are discarded. Returns the logical size; an empty
    /// tile set produces no sprites and a (0, 0) size.
    pub fn fill_sprites<'t>(&'t self, color: Color, out: &mut Vec<Sprite<'t>>) -> Vector2f {
        out.clear();
        out.reserve(self.tiles.len());

        for tile in &self.tiles {
            let mut sprite = Sprite::new(&tile.texture);
            sprite.set_position(Vector2f::new(tile.x as f32, tile.y as f32));
            sprite.set_color(color);
            out.push(sprite);
        }

        Vector2f::new(self.width as f32, self.height as f32)
    }
}

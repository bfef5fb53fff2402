mod tiled_sprite;
mod tiled_texture;

pub use tiled_sprite::TiledSprite;
pub use tiled_texture::{Tile, TiledTexture};

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod output;
pub mod render;
pub mod tile;

pub use error::TesseraError;
pub use geometry::{FloatRect, IntRect, Transform, Vector2f};
pub use render::{Color, Drawable, ImageTarget, RenderStates, RenderTarget, Sprite, Texture};
pub use tile::{Tile, TiledSprite, TiledTexture};

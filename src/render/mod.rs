mod color;
mod raster;
mod sprite;
mod target;
mod texture;
mod transformable;
mod vertex;

pub use color::Color;
pub use raster::ImageTarget;
pub use sprite::Sprite;
pub use target::{Drawable, RenderStates, RenderTarget};
pub use texture::Texture;
pub use transformable::Transformable;
pub use vertex::Vertex;

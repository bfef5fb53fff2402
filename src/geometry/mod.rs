mod rect;
mod transform;
mod vector;

pub use rect::{FloatRect, IntRect};
pub use transform::Transform;
pub use vector::Vector2f;

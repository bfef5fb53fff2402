mod format;
mod json;

pub use format::{save_png, tile_png_filename};
pub use json::write_layout;

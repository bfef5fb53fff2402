use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TesseraError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Texture {width}x{height} exceeds the maximum texture size ({max}x{max})")]
    TextureTooLarge { width: u32, height: u32, max: u32 },

    #[error("Tile size {tile_size} is invalid (must be between 1 and {max})")]
    InvalidTileSize { tile_size: u32, max: u32 },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),
}

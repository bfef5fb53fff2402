use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::{ImageFormat, RgbaImage};

use crate::error::TesseraError;

/// Save an RGBA image as PNG
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    // Encode to PNG in memory
    let mut png_data = Cursor::new(Vec::new());
    image
        .write_to(&mut png_data, ImageFormat::Png)
        .map_err(|e| TesseraError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;

    fs::write(path, png_data.into_inner()).map_err(|e| TesseraError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Tile PNG filename: `name_0.png`, `name_1.png`, ...
pub fn tile_png_filename(base_name: &str, index: usize) -> String {
    format!("{}_{}.png", base_name, index)
}

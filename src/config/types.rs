use serde::{Deserialize, Serialize};

use crate::render::Texture;

/// Tessera configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Input image path
    pub input: Option<String>,
    /// Output directory for generated files
    pub output_dir: String,
    /// Base name for output files (tiles_0.png, tiles.json, etc.)
    pub name: String,
    /// Maximum tile width/height in pixels
    pub tile_size: u32,
}

impl Default for TesseraConfig {
    fn default() -> Self {
        Self {
            version: 1,
            input: None,
            output_dir: ".".to_string(),
            name: "tiles".to_string(),
            tile_size: Texture::MAXIMUM_SIZE,
        }
    }
}

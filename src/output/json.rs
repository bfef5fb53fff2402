use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::error::TesseraError;
use crate::output::tile_png_filename;
use crate::tile::TiledTexture;

#[derive(Serialize)]
struct LayoutOutput {
    meta: Meta,
    size: Size,
    tiles: Vec<JsonTile>,
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
    format: &'static str,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct JsonTile {
    image: String,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

/// Write the tile layout metadata file
pub fn write_layout(texture: &TiledTexture, output_dir: &Path, base_name: &str) -> Result<()> {
    let (w, h) = texture.size();
    let tiles = texture
        .tiles()
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            let (tw, th) = tile.texture.size();
            JsonTile {
                image: tile_png_filename(base_name, index),
                x: tile.x,
                y: tile.y,
                w: tw,
                h: th,
            }
        })
        .collect();

    let output = LayoutOutput {
        meta: Meta {
            app: "tessera",
            version: env!("CARGO_PKG_VERSION"),
            format: "rgba8888",
        },
        size: Size { w, h },
        tiles,
    };

    let json_path = output_dir.join(format!("{}.json", base_name));
    let content = serde_json::to_string_pretty(&output)?;

    fs::write(&json_path, content).map_err(|e| TesseraError::OutputWrite {
        path: json_path,
        source: e,
    })?;

    Ok(())
}

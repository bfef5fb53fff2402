use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tessera::cli::{CliArgs, Command, CommonArgs, ComposeArgs};
use tessera::config::LoadedConfig;
use tessera::output::{save_png, tile_png_filename, write_layout};
use tessera::render::{Drawable, ImageTarget, RenderStates, Texture};
use tessera::tile::{TiledSprite, TiledTexture};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    let common = match &cli.command {
        Command::Split(args) => args.clone(),
        Command::Compose(args) => args.common.clone(),
    };

    // Load config if specified and merge with CLI args
    let merged = merge_config_with_args(&common)?;

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Tessera texture splitter v{}", env!("CARGO_PKG_VERSION"));

    // Create output directory if it doesn't exist
    if !merged.output.exists() {
        fs::create_dir_all(&merged.output)?;
    }

    let texture = TiledTexture::from_file_with_tile_size(&merged.input, merged.tile_size)?;
    info!(
        "Split {} into {} tile(s)",
        merged.input.display(),
        texture.tile_count()
    );

    match &cli.command {
        Command::Split(_) => split(&texture, &merged)?,
        Command::Compose(args) => compose(&texture, args, &merged)?,
    }

    info!("Done!");

    Ok(())
}

fn split(texture: &TiledTexture, merged: &MergedConfig) -> Result<()> {
    for (index, tile) in texture.tiles().iter().enumerate() {
        let path = merged.output.join(tile_png_filename(&merged.name, index));
        save_png(tile.texture.image(), &path)?;
        info!("Saved {}", path.display());
    }

    write_layout(texture, &merged.output, &merged.name)?;
    info!("Generated {}.json", merged.name);

    Ok(())
}

fn compose(texture: &TiledTexture, args: &ComposeArgs, merged: &MergedConfig) -> Result<()> {
    let mut sprite = match args.rect {
        Some(spec) => TiledSprite::with_texture_rect(texture, spec.to_rect()),
        None => TiledSprite::with_texture(texture),
    };

    if let Some(color) = args.color {
        sprite.set_color(color.to_color());
    }

    let rect = sprite.texture_rect();
    let mut target = ImageTarget::new(
        u32::try_from(rect.width).unwrap_or(0),
        u32::try_from(rect.height).unwrap_or(0),
    );
    sprite.draw(&mut target, RenderStates::default());

    let path = merged.output.join(format!("{}.png", merged.name));
    save_png(target.image(), &path)?;
    info!("Saved {}", path.display());

    Ok(())
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    input: PathBuf,
    output: PathBuf,
    name: String,
    tile_size: u32,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CommonArgs) -> Result<MergedConfig> {
    // Load config if specified
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    // Determine input image: CLI args override config
    let input = if let Some(input) = &args.input {
        input.clone()
    } else {
        loaded_config
            .as_ref()
            .and_then(LoadedConfig::resolve_input)
            .context("no input image given on the command line or in the config file")?
    };

    // Determine output directory: CLI > config > default
    let output = args.output.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(LoadedConfig::resolve_output_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    // Determine name: CLI > config > default
    let name = args.name.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.config.name.clone())
            .unwrap_or_else(|| "tiles".to_string())
    });

    let tile_size = args.tile_size.unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.config.tile_size)
            .unwrap_or(Texture::MAXIMUM_SIZE)
    });

    // Verbose is CLI-only
    let verbose = args.verbose;

    Ok(MergedConfig {
        input,
        output,
        name,
        tile_size,
        verbose,
    })
}

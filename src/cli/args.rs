use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::geometry::IntRect;
use crate::render::Color;

#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(version, about = "Oversized texture splitter and compositor", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Split an image into tile PNGs plus a JSON layout file
    Split(CommonArgs),
    /// Composite a region of an image back out of its tiles
    Compose(ComposeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Input image file
    #[arg(required_unless_present = "config")]
    pub input: Option<PathBuf>,

    /// Load settings from a .tessera config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for generated files [default: .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base name for output files (tiles_0.png, tiles.json, etc.) [default: tiles]
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Maximum tile width/height in pixels [default: 4096]
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Region of the logical image to composite, as X,Y,WxH [default: whole image]
    #[arg(long, value_name = "X,Y,WxH")]
    pub rect: Option<RectSpec>,

    /// Uniform tint, as R,G,B or R,G,B,A [default: white]
    #[arg(long, value_name = "R,G,B[,A]")]
    pub color: Option<ColorSpec>,
}

/// Region argument in the form `X,Y,WxH`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectSpec {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RectSpec {
    pub fn to_rect(self) -> IntRect {
        IntRect::new(self.x, self.y, self.width, self.height)
    }
}

impl std::str::FromStr for RectSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(format!("expected X,Y,WxH, got '{}'", s));
        }

        let (w, h) = parts[2]
            .split_once('x')
            .ok_or_else(|| format!("expected WxH size, got '{}'", parts[2]))?;

        let field = |value: &str, what: &str| {
            value
                .trim()
                .parse::<i32>()
                .map_err(|_e| format!("invalid {} in region '{}': '{}'", what, s, value))
        };

        Ok(Self {
            x: field(parts[0], "x")?,
            y: field(parts[1], "y")?,
            width: field(w, "width")?,
            height: field(h, "height")?,
        })
    }
}

/// Color argument in the form `R,G,B` or `R,G,B,A`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorSpec {
    pub fn to_color(self) -> Color {
        Color::new(self.r, self.g, self.b, self.a)
    }
}

impl std::str::FromStr for ColorSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(format!("expected R,G,B or R,G,B,A, got '{}'", s));
        }

        let channel = |value: &str| {
            value
                .trim()
                .parse::<u8>()
                .map_err(|_e| format!("invalid channel in color '{}': '{}'", s, value))
        };

        Ok(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a: if parts.len() == 4 {
                channel(parts[3])?
            } else {
                255
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_spec_parses() {
        let spec: RectSpec = "10,20,300x200".parse().unwrap();
        assert_eq!(spec.to_rect(), IntRect::new(10, 20, 300, 200));

        let spec: RectSpec = " 0, 0, 44x44 ".trim().parse().unwrap();
        assert_eq!(spec.to_rect(), IntRect::new(0, 0, 44, 44));
    }

    #[test]
    fn test_rect_spec_rejects_malformed() {
        assert!("10,20".parse::<RectSpec>().is_err());
        assert!("10,20,300".parse::<RectSpec>().is_err());
        assert!("a,b,cxd".parse::<RectSpec>().is_err());
    }

    #[test]
    fn test_color_spec_parses() {
        let spec: ColorSpec = "255,0,0".parse().unwrap();
        assert_eq!(spec.to_color(), Color::RED);

        let spec: ColorSpec = "1,2,3,4".parse().unwrap();
        assert_eq!(spec.to_color(), Color::new(1, 2, 3, 4));
    }

    #[test]
    fn test_color_spec_rejects_malformed() {
        assert!("255,0".parse::<ColorSpec>().is_err());
        assert!("256,0,0".parse::<ColorSpec>().is_err());
        assert!("1,2,3,4,5".parse::<ColorSpec>().is_err());
    }
}

mod args;

pub use args::{CliArgs, ColorSpec, Command, CommonArgs, ComposeArgs, RectSpec};

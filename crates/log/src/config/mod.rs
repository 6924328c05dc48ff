//! Configuration types and presets
//!
//! - `base`: core configuration structs (Config, Format, Level, Writer)
//! - `display`: what each formatted event shows
//! - `presets`: development, production and environment-driven setups

mod base;
mod display;
mod presets;

pub use base::{Config, Format, Level, Writer};
pub use display::DisplayConfig;

//! Parsing functions for CLI arguments.

mod color;

pub use color::parse_rgb;

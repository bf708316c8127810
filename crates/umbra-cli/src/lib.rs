//! Shared utilities for umbra-cli
//!
//! Argument parsing and input/output path handling used by the `umbra`
//! subcommands.

pub mod parsers;
pub mod processing;

// Re-export commonly used items at the crate root for convenience
pub use parsers::parse_rgb;
pub use processing::{determine_output_path, expand_inputs, OutputNaming};

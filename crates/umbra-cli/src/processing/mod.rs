//! Input expansion and output naming for batch commands.

mod input;

pub use input::{determine_output_path, expand_inputs, OutputNaming};

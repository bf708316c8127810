//! PNG image decoder

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::from_interleaved;
use crate::buffer::ImageBuffer;

/// Decode a PNG file. Palette and low bit depths are expanded and 16-bit
/// samples are reduced to 8 bits.
pub(crate) fn decode_png(path: &Path) -> Result<ImageBuffer, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open PNG file: {}", e))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("Failed to read PNG info: {}", e))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("Failed to read PNG frame: {}", e))?;
    buf.truncate(frame_info.buffer_size());

    let channels = match frame_info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err("Indexed PNG was not expanded".to_string());
        }
    };
    if frame_info.bit_depth != png::BitDepth::Eight {
        return Err(format!(
            "Unsupported PNG bit depth after expansion: {:?}",
            frame_info.bit_depth
        ));
    }

    from_interleaved(frame_info.width, frame_info.height, channels, buf)
}

//! TIFF image decoder

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tiff::decoder::{DecodingResult, Limits};

use super::from_interleaved;
use crate::buffer::ImageBuffer;

/// Decode an 8- or 16-bit gray, RGB or RGBA TIFF file
pub(crate) fn decode_tiff(path: &Path) -> Result<ImageBuffer, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open TIFF file: {}", e))?;

    // Large scans (up to 1GB uncompressed)
    let mut limits = Limits::default();
    limits.decoding_buffer_size = 1024 * 1024 * 1024;
    limits.ifd_value_size = 1024 * 1024 * 1024;
    limits.intermediate_buffer_size = 1024 * 1024 * 1024;

    let mut decoder = tiff::decoder::Decoder::new(BufReader::new(file))
        .map_err(|e| format!("Failed to create TIFF decoder: {}", e))?
        .with_limits(limits);

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| format!("Failed to get TIFF dimensions: {}", e))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| format!("Failed to get TIFF color type: {}", e))?;

    let channels = match color_type {
        tiff::ColorType::Gray(_) => 1,
        tiff::ColorType::RGB(_) => 3,
        tiff::ColorType::RGBA(_) => 4,
        tiff::ColorType::CMYK(_) => return Err("CMYK color type not supported".to_string()),
        tiff::ColorType::YCbCr(_) => return Err("YCbCr color type not supported".to_string()),
        tiff::ColorType::Palette(_) => return Err("Palette color type not supported".to_string()),
        _ => return Err(format!("Unknown TIFF color type: {:?}", color_type)),
    };

    let samples = match decoder
        .read_image()
        .map_err(|e| format!("Failed to read TIFF image data: {}", e))?
    {
        DecodingResult::U8(buf) => buf,
        DecodingResult::U16(buf) => buf.iter().map(|&v| scale_u16(v)).collect(),
        _ => return Err("Only 8- and 16-bit integer TIFF samples are supported".to_string()),
    };

    from_interleaved(width, height, channels, samples)
}

#[inline]
fn scale_u16(v: u16) -> u8 {
    ((v as u32 * 255 + 32_767) / 65_535) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_u16() {
        assert_eq!(scale_u16(0), 0);
        assert_eq!(scale_u16(65_535), 255);
        assert_eq!(scale_u16(257 * 100), 100);
    }
}

//! Camera RAW decoding using LibRaw
//!
//! This crate isolates the rsraw/rsraw-sys dependencies so the LibRaw
//! bindings are only built when the `libraw` feature is enabled. Without it,
//! RAW extensions are still recognized but decoding reports an error.

use std::path::Path;

/// Decoded RAW image as display-referred 8-bit RGB
#[derive(Debug, Clone)]
pub struct DecodedRaw {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Interleaved RGB samples
    pub data: Vec<u8>,

    /// Number of channels (always 3)
    pub channels: u8,
}

/// List of supported RAW file extensions
pub const RAW_EXTENSIONS: &[&str] = &[
    "cr2", "cr3", "nef", "nrw", "arw", "raf", "rw2", "orf", "pef", "dng", "3fr", "fff", "iiq",
    "rwl", "raw",
];

/// Check if a file extension is a supported RAW format
pub fn is_raw_extension(ext: &str) -> bool {
    RAW_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// Whether this build can actually decode RAW files
pub fn is_available() -> bool {
    cfg!(feature = "libraw")
}

/// Decode a RAW file using rsraw (LibRaw wrapper)
///
/// Develops the sensor data with the camera white balance and AHD
/// demosaicing, then reduces the 16-bit output to 8 bits per sample.
#[cfg(feature = "libraw")]
pub fn decode_raw<P: AsRef<Path>>(path: P) -> Result<DecodedRaw, String> {
    use rsraw::{RawImage, BIT_DEPTH_16};
    use std::convert::AsMut;

    let data =
        std::fs::read(path.as_ref()).map_err(|e| format!("Failed to read RAW file: {}", e))?;

    let mut raw = RawImage::open(&data).map_err(|e| format!("Failed to open RAW file: {:?}", e))?;

    {
        let libraw_data: &mut rsraw_sys::libraw_data_t = raw.as_mut();
        // 3 = AHD
        libraw_data.params.user_qual = 3;
        libraw_data.params.use_camera_wb = 1;
    }

    raw.unpack()
        .map_err(|e| format!("Failed to unpack RAW data: {:?}", e))?;

    let processed = raw
        .process::<BIT_DEPTH_16>()
        .map_err(|e| format!("Failed to process RAW: {:?}", e))?;

    let width = processed.width();
    let height = processed.height();
    let channels = processed.colors() as u8;

    let pixel_data: &[u16] = &processed;
    let data = convert_u16_to_rgb8(pixel_data, width, height, channels)?;

    Ok(DecodedRaw {
        width,
        height,
        data,
        channels: 3,
    })
}

/// Stub used when LibRaw support is compiled out
#[cfg(not(feature = "libraw"))]
pub fn decode_raw<P: AsRef<Path>>(path: P) -> Result<DecodedRaw, String> {
    Err(format!(
        "RAW support is not enabled in this build (rebuild with the `raw` feature): {}",
        path.as_ref().display()
    ))
}

/// Scale a 16-bit sample to 8 bits with rounding
#[inline]
fn scale_to_u8(value: u16) -> u8 {
    ((value as u32 * 255 + 32767) / 65535) as u8
}

/// Convert developed 16-bit samples to interleaved 8-bit RGB.
/// Uses parallel processing via rayon.
#[cfg_attr(not(feature = "libraw"), allow(dead_code))]
fn convert_u16_to_rgb8(
    pixel_data: &[u16],
    width: u32,
    height: u32,
    channels: u8,
) -> Result<Vec<u8>, String> {
    use rayon::prelude::*;

    let pixel_count = width as usize * height as usize;
    let expected_len = pixel_count * channels as usize;

    if pixel_data.len() < expected_len {
        return Err(format!(
            "RAW buffer size mismatch: expected at least {}, got {}",
            expected_len,
            pixel_data.len()
        ));
    }

    let rgb = match channels {
        3 => pixel_data[..expected_len]
            .par_iter()
            .map(|&v| scale_to_u8(v))
            .collect(),
        // Drop alpha
        4 => pixel_data[..expected_len]
            .par_chunks_exact(4)
            .flat_map_iter(|p| [scale_to_u8(p[0]), scale_to_u8(p[1]), scale_to_u8(p[2])])
            .collect(),
        1 => pixel_data[..expected_len]
            .par_iter()
            .flat_map_iter(|&v| {
                let g = scale_to_u8(v);
                [g, g, g]
            })
            .collect(),
        other => return Err(format!("Unexpected RAW channel count: {}", other)),
    };

    Ok(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_raw_extension() {
        assert!(is_raw_extension("cr2"));
        assert!(is_raw_extension("NEF"));
        assert!(is_raw_extension("arw"));
        assert!(is_raw_extension("dng"));
        assert!(!is_raw_extension("tiff"));
        assert!(!is_raw_extension("png"));
        assert!(!is_raw_extension("jpg"));
    }

    #[test]
    fn test_scale_to_u8_endpoints() {
        assert_eq!(scale_to_u8(0), 0);
        assert_eq!(scale_to_u8(65535), 255);
        assert_eq!(scale_to_u8(32896), 128);
    }

    #[test]
    fn test_convert_drops_alpha_and_expands_gray() {
        let rgba = [65535u16, 0, 65535, 1234, 0, 0, 0, 0];
        let out = convert_u16_to_rgb8(&rgba, 2, 1, 4).unwrap();
        assert_eq!(out, vec![255, 0, 255, 0, 0, 0]);

        let gray = [65535u16, 0];
        let out = convert_u16_to_rgb8(&gray, 2, 1, 1).unwrap();
        assert_eq!(out, vec![255, 255, 255, 0, 0, 0]);
    }

    #[test]
    fn test_convert_rejects_short_buffer() {
        let result = convert_u16_to_rgb8(&[0u16; 5], 2, 1, 3);
        assert!(result.unwrap_err().contains("size mismatch"));
    }

    #[cfg(not(feature = "libraw"))]
    #[test]
    fn test_decode_without_libraw_reports_reason() {
        assert!(!is_available());
        let err = decode_raw("photo.nef").unwrap_err();
        assert!(err.contains("not enabled"));
    }
}

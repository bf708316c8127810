//! Image decoders
//!
//! Every decoder produces an 8-bit [`ImageBuffer`] with one gray channel or
//! three RGB channels; alpha is dropped and deeper samples are scaled down.

mod png;
mod raster;
mod raw;
mod tiff;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::buffer::ImageBuffer;
use crate::error::{Result, UmbraError};

use self::png::decode_png;
use self::raster::decode_raster;
use self::raw::decode_raw;
use self::tiff::decode_tiff;

/// Extensions handled by the `image` crate decoders
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "bmp"];

/// Decode an image from a file path, choosing the decoder by extension.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<ImageBuffer> {
    let path = path.as_ref();
    decode_by_extension(path).map_err(|reason| UmbraError::Decode {
        path: path.to_path_buf(),
        reason,
    })
}

/// Whether `ext` (lowercase, without the dot) has a decoder
pub fn is_supported_extension(ext: &str) -> bool {
    matches!(ext, "png" | "tif" | "tiff")
        || RASTER_EXTENSIONS.contains(&ext)
        || umbra_raw::is_raw_extension(ext)
}

/// Whether camera RAW files can be decoded by this build
pub fn raw_supported() -> bool {
    umbra_raw::is_available()
}

/// Whether `path` has a camera RAW extension
pub fn is_raw_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(umbra_raw::is_raw_extension)
}

fn decode_by_extension(path: &Path) -> std::result::Result<ImageBuffer, String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| "No file extension found".to_string())?;

    let image = match extension.as_str() {
        "tif" | "tiff" => decode_tiff(path)?,
        "png" => decode_png(path)?,
        ext if RASTER_EXTENSIONS.contains(&ext) => decode_raster(path)?,
        // RAW formats (via umbra-raw/LibRaw)
        ext if umbra_raw::is_raw_extension(ext) => decode_raw(path)?,
        _ => return Err(format!("Unsupported file format: {}", extension)),
    };

    tracing::info!(
        "decoded {} ({}x{}, {} channel{})",
        path.display(),
        image.width,
        image.height,
        image.channels,
        if image.channels == 1 { "" } else { "s" }
    );

    Ok(image)
}

/// Build a buffer from interleaved 8-bit samples with `channels` per pixel,
/// keeping gray or RGB and dropping any alpha sample.
pub(crate) fn from_interleaved(
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<u8>,
) -> std::result::Result<ImageBuffer, String> {
    let expected_len = width as usize * height as usize * channels;
    if samples.len() != expected_len {
        return Err(format!(
            "buffer size mismatch: expected {}, got {}",
            expected_len,
            samples.len()
        ));
    }

    let (data, out_channels) = match channels {
        1 | 3 => (samples, channels as u8),
        // Gray + alpha
        2 => (samples.chunks_exact(2).map(|px| px[0]).collect(), 1),
        // RGBA
        4 => (
            samples
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
            3,
        ),
        n => return Err(format!("Unsupported channel count: {}", n)),
    };

    ImageBuffer::new(width, height, out_channels, data).map_err(|e| e.to_string())
}

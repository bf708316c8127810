//! Image exporters
//!
//! Write an 8-bit [`ImageBuffer`] as PNG, TIFF, JPEG or BMP, chosen by the
//! destination extension.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::buffer::ImageBuffer;
use crate::error::{Result, UmbraError};

/// Extensions accepted by [`export_image`]
pub const EXPORT_EXTENSIONS: &[&str] = &["png", "tif", "tiff", "jpg", "jpeg", "bmp"];

/// Export `image` to `path`; the extension selects the encoder.
pub fn export_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    export_by_extension(image, path).map_err(|reason| UmbraError::Write {
        path: path.to_path_buf(),
        reason,
    })
}

fn export_by_extension(image: &ImageBuffer, path: &Path) -> std::result::Result<(), String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| "No file extension found".to_string())?;

    match extension.as_str() {
        "png" => export_png(image, path),
        "tif" | "tiff" => export_tiff8(image, path),
        "jpg" | "jpeg" | "bmp" => export_raster(image, path),
        _ => Err(format!("Unsupported output format: {}", extension)),
    }
}

/// 8-bit PNG, gray or RGB
fn export_png(image: &ImageBuffer, path: &Path) -> std::result::Result<(), String> {
    let file = File::create(path).map_err(|e| format!("Failed to create PNG file: {}", e))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width, image.height);
    encoder.set_color(match image.channels {
        1 => png::ColorType::Grayscale,
        _ => png::ColorType::Rgb,
    });
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| format!("Failed to write PNG header: {}", e))?;
    writer
        .write_image_data(&image.data)
        .map_err(|e| format!("Failed to write PNG image: {}", e))?;
    writer
        .finish()
        .map_err(|e| format!("Failed to finish PNG file: {}", e))
}

/// 8-bit TIFF, gray or RGB
fn export_tiff8(image: &ImageBuffer, path: &Path) -> std::result::Result<(), String> {
    use tiff::encoder::colortype::{Gray8, RGB8};

    let file = File::create(path).map_err(|e| format!("Failed to create TIFF file: {}", e))?;
    let mut encoder = tiff::encoder::TiffEncoder::new(BufWriter::new(file))
        .map_err(|e| format!("Failed to create TIFF encoder: {}", e))?;

    match image.channels {
        1 => encoder.write_image::<Gray8>(image.width, image.height, &image.data),
        _ => encoder.write_image::<RGB8>(image.width, image.height, &image.data),
    }
    .map_err(|e| format!("Failed to write TIFF image: {}", e))
}

/// JPEG and BMP through the `image` crate encoders
fn export_raster(image: &ImageBuffer, path: &Path) -> std::result::Result<(), String> {
    let color = match image.channels {
        1 => image::ExtendedColorType::L8,
        _ => image::ExtendedColorType::Rgb8,
    };
    image::save_buffer(path, &image.data, image.width, image.height, color)
        .map_err(|e| format!("Failed to save image: {e}"))
}

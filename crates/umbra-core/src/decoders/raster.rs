//! JPEG and BMP decoding through the `image` crate

use std::path::Path;

use image::DynamicImage;

use crate::buffer::ImageBuffer;

pub(crate) fn decode_raster(path: &Path) -> Result<ImageBuffer, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open image: {e}"))?;
    let (width, height) = (img.width(), img.height());

    let (channels, data) = if img.color().has_color() {
        (3, DynamicImage::into_rgb8(img).into_raw())
    } else {
        (1, DynamicImage::into_luma8(img).into_raw())
    };

    ImageBuffer::new(width, height, channels, data).map_err(|e| e.to_string())
}

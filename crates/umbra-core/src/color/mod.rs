//! Color transformations for the shadow normalizer
//!
//! 8-bit sRGB pixels are taken through linear light into CIE L*a*b*, where
//! lightness can be edited without touching the chromatic axes.

mod lab;
mod srgb;


pub use lab::{lab_to_rgb, rgb_to_lab, Lab};
pub use srgb::{decode_u8, encode_u8, linear_to_srgb, srgb_to_linear};

/// Convert an 8-bit sRGB pixel to LAB
#[inline]
pub fn srgb8_to_lab(rgb: [u8; 3]) -> Lab {
    rgb_to_lab(decode_u8(rgb[0]), decode_u8(rgb[1]), decode_u8(rgb[2]))
}

/// Convert LAB to an 8-bit sRGB pixel, clipping out-of-gamut values
#[inline]
pub fn lab_to_srgb8(lab: Lab) -> [u8; 3] {
    let (r, g, b) = lab_to_rgb(lab);
    [encode_u8(r), encode_u8(g), encode_u8(b)]
}

/// 8-bit lightness code (`L * 255 / 100`)
#[inline]
pub fn encode_lightness(l: f32) -> u8 {
    (l * 255.0 / 100.0).round().clamp(0.0, 255.0) as u8
}

/// Lightness of an 8-bit code
#[inline]
pub fn decode_lightness(code: u8) -> f32 {
    code as f32 * 100.0 / 255.0
}

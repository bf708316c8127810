//! sRGB transfer curve between 8-bit encoded samples and linear light.

use std::sync::OnceLock;

/// Linear value of each 8-bit sRGB code
fn decode_table() -> &'static [f32; 256] {
    static TABLE: OnceLock<[f32; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0.0f32; 256];
        for (code, entry) in table.iter_mut().enumerate() {
            *entry = srgb_to_linear(code as f32 / 255.0);
        }
        table
    })
}

/// sRGB electro-optical transfer function (0-1 in, 0-1 out)
#[inline]
pub fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Inverse of [`srgb_to_linear`]
#[inline]
pub fn linear_to_srgb(v: f32) -> f32 {
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Linear value of an 8-bit sRGB sample
#[inline]
pub fn decode_u8(code: u8) -> f32 {
    decode_table()[code as usize]
}

/// Encode a linear value as an 8-bit sRGB sample, clipping out-of-gamut input
#[inline]
pub fn encode_u8(v: f32) -> u8 {
    (linear_to_srgb(v.clamp(0.0, 1.0)) * 255.0).round() as u8
}

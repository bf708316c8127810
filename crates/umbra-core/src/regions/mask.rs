//! Inverse thresholding of an intensity plane.

use crate::buffer::IntensityBuffer;

/// Value of a foreground (dark) pixel in a [`BinaryMask`]
pub const FOREGROUND: u8 = 255;

/// Two-valued mask (0 or 255) with the shape of its source plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: Vec<u8>,
}

impl BinaryMask {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == FOREGROUND).count()
    }
}

/// Mark every pixel strictly darker than `threshold` as foreground.
///
/// A threshold of 0 selects nothing, and no threshold selects a pixel of 255.
pub fn binarize(intensity: &IntensityBuffer, threshold: u8) -> BinaryMask {
    let data = intensity
        .data
        .iter()
        .map(|&v| if v < threshold { FOREGROUND } else { 0 })
        .collect();

    BinaryMask {
        width: intensity.width,
        height: intensity.height,
        data,
    }
}

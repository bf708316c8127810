//! In-memory raster buffers shared by every pipeline stage.

use crate::error::{Result, UmbraError};

/// 8-bit raster image with interleaved samples.
///
/// Channel order is fixed: a single gray channel, or R, G, B. Fields are
/// readable through accessors; buffers are only built by the checked
/// constructors, so the sample count always matches the dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// 1 or 3
    pub(crate) channels: u8,
    /// Interleaved samples, `width * height * channels` long
    pub(crate) data: Vec<u8>,
}

impl ImageBuffer {
    /// Wrap raw samples, checking that the length matches the dimensions.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        if channels != 1 && channels != 3 {
            return Err(UmbraError::invalid(format!(
                "image buffers hold 1 or 3 channels, got {}",
                channels
            )));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(UmbraError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Uniform single-channel image
    pub fn gray(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            channels: 1,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Uniform RGB image
    pub fn rgb(width: u32, height: u32, color: [u8; 3]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * 3);
        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            channels: 3,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Interleaved samples
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Frame area in pixels, the denominator of every percentage
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Samples of the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels as usize;
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.data[idx..idx + c]
    }

    /// Single-channel luma of this image. Gray images are copied as-is.
    pub fn to_intensity(&self) -> IntensityBuffer {
        let data = match self.channels {
            1 => self.data.clone(),
            _ => self
                .data
                .chunks_exact(self.channels as usize)
                .map(|px| luma(px[0], px[1], px[2]))
                .collect(),
        };
        IntensityBuffer {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Single-channel intensity plane (grayscale or luminance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityBuffer {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: Vec<u8>,
}

impl IntensityBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(UmbraError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Rec.601 luma in 14-bit fixed point, rounded.
///
/// Weights 0.299 / 0.587 / 0.114 scaled by 2^14, the same integer form used
/// by common imaging libraries so percentages reproduce across tools.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    const R_WEIGHT: u32 = 4899;
    const G_WEIGHT: u32 = 9617;
    const B_WEIGHT: u32 = 1868;
    const SHIFT: u32 = 14;

    let y = R_WEIGHT * r as u32 + G_WEIGHT * g as u32 + B_WEIGHT * b as u32 + (1 << (SHIFT - 1));
    (y >> SHIFT) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = ImageBuffer::new(4, 4, 3, vec![0; 47]).unwrap_err();
        assert!(matches!(
            err,
            UmbraError::BufferSize {
                expected: 48,
                actual: 47
            }
        ));
    }

    #[test]
    fn test_new_rejects_alpha_channel() {
        let err = ImageBuffer::new(1, 1, 4, vec![0; 4]).unwrap_err();
        assert!(matches!(err, UmbraError::InvalidParameter(_)));
    }

    #[test]
    fn test_accessors_reflect_checked_construction() {
        let image = ImageBuffer::new(2, 1, 3, vec![10, 20, 30, 40, 50, 60]).unwrap();
        assert_eq!((image.width(), image.height(), image.channels()), (2, 1, 3));
        assert_eq!(image.data().len(), 6);
        assert_eq!(image.pixel(1, 0), &[40, 50, 60]);

        // Every channel count that gets past `new` converts without panicking
        for channels in 0..=8u8 {
            if let Ok(image) = ImageBuffer::new(1, 1, channels, vec![7; channels as usize]) {
                assert_eq!(image.to_intensity().data(), &[7]);
            }
        }
        assert_eq!(image.into_data(), vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_zero_sized_image_is_empty() {
        let image = ImageBuffer::new(0, 10, 3, Vec::new()).unwrap();
        assert!(image.is_empty());
        assert_eq!(image.area(), 0.0);
        assert!(image.to_intensity().is_empty());
    }

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
        // Neutral grays map to themselves
        for v in [1u8, 50, 128, 200, 254] {
            assert_eq!(luma(v, v, v), v);
        }
    }

    #[test]
    fn test_to_intensity_gray_passthrough() {
        let image = ImageBuffer::new(2, 1, 1, vec![7, 9]).unwrap();
        assert_eq!(image.to_intensity().data, vec![7, 9]);
    }

    #[test]
    fn test_to_intensity_rgb() {
        let image = ImageBuffer::new(2, 1, 3, vec![255, 0, 0, 10, 10, 10]).unwrap();
        let intensity = image.to_intensity();
        assert_eq!(intensity.data, vec![76, 10]);
        assert_eq!(intensity.get(1, 0), 10);
    }
}

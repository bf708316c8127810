//! Shadow normalization
//!
//! Uneven illumination is estimated with a wide Gaussian blur of the
//! lightness channel and divided out. The corrected lightness is stretched
//! to the full 8-bit range and its mean moved to a target value, then merged
//! back with the untouched chroma.

mod blur;


use rayon::prelude::*;

use crate::buffer::ImageBuffer;
use crate::color::{decode_lightness, encode_lightness, lab_to_srgb8, srgb8_to_lab, Lab};
use crate::params::NormalizationParams;
use crate::PARALLEL_THRESHOLD;

/// Keeps the illumination division finite where the blur is black
const DIVISION_EPSILON: f32 = 1e-6;

/// Lightness means reported by a normalization run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationStats {
    /// Mean of the stretched lightness, before retargeting
    pub mean_before_shift: f64,

    /// Mean of the final 8-bit lightness
    pub mean_after: f64,
}

/// Remove large-scale shading from `image` and retarget its mean lightness.
pub fn normalize(image: &ImageBuffer, params: &NormalizationParams) -> ImageBuffer {
    normalize_with_stats(image, params).0
}

/// [`normalize`], also returning the lightness means before and after the
/// brightness shift.
pub fn normalize_with_stats(
    image: &ImageBuffer,
    params: &NormalizationParams,
) -> (ImageBuffer, NormalizationStats) {
    if image.is_empty() {
        let stats = NormalizationStats {
            mean_before_shift: 0.0,
            mean_after: 0.0,
        };
        return (image.clone(), stats);
    }

    let planes = LabPlanes::split(image);
    let corrected = remove_illumination(
        &planes.lightness,
        image.width as usize,
        image.height as usize,
        params.blur_kernel_size() as usize,
    );
    let (lightness, stats) = retarget_mean(&corrected, params.target_mean_brightness());

    tracing::debug!(
        "lightness normalized: mean before {:.2}, after {:.2}",
        stats.mean_before_shift,
        stats.mean_after
    );

    (planes.merge(image, lightness), stats)
}

/// 8-bit lightness plus the chroma it was separated from.
struct LabPlanes {
    lightness: Vec<u8>,
    /// `None` for single-channel images, whose samples are the lightness
    chroma: Option<Vec<[f32; 2]>>,
}

impl LabPlanes {
    fn split(image: &ImageBuffer) -> Self {
        if image.channels == 1 {
            return Self {
                lightness: image.data.clone(),
                chroma: None,
            };
        }

        let to_lab = |px: &[u8]| srgb8_to_lab([px[0], px[1], px[2]]);
        let labs: Vec<Lab> = if image.pixel_count() >= PARALLEL_THRESHOLD {
            image.data.par_chunks_exact(3).map(to_lab).collect()
        } else {
            image.data.chunks_exact(3).map(to_lab).collect()
        };

        Self {
            lightness: labs.iter().map(|lab| encode_lightness(lab.l)).collect(),
            chroma: Some(labs.iter().map(|lab| [lab.a, lab.b]).collect()),
        }
    }

    fn merge(self, source: &ImageBuffer, lightness: Vec<u8>) -> ImageBuffer {
        let Some(chroma) = self.chroma else {
            return ImageBuffer {
                data: lightness,
                ..source.clone()
            };
        };

        let to_rgb = |(&l, &[a, b]): (&u8, &[f32; 2])| {
            lab_to_srgb8(Lab {
                l: decode_lightness(l),
                a,
                b,
            })
        };
        let pixels: Vec<[u8; 3]> = if lightness.len() >= PARALLEL_THRESHOLD {
            lightness.par_iter().zip(chroma.par_iter()).map(to_rgb).collect()
        } else {
            lightness.iter().zip(chroma.iter()).map(to_rgb).collect()
        };

        ImageBuffer {
            width: source.width,
            height: source.height,
            channels: 3,
            data: pixels.into_iter().flatten().collect(),
        }
    }
}

/// Divide lightness by its blurred estimate and stretch the ratio to 0-255.
///
/// A ratio with no spread stretches to 0 everywhere.
fn remove_illumination(lightness: &[u8], width: usize, height: usize, ksize: usize) -> Vec<f32> {
    let plane: Vec<f32> = lightness.iter().map(|&v| v as f32 / 255.0).collect();
    let illumination = blur::gaussian_blur(&plane, width, height, ksize);

    let ratio: Vec<f32> = plane
        .iter()
        .zip(&illumination)
        .map(|(&v, &i)| v / (i + DIVISION_EPSILON))
        .collect();

    let (min, max) = ratio
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if range <= f32::EPSILON {
        return vec![0.0; ratio.len()];
    }

    let scale = 255.0 / range;
    ratio.iter().map(|&v| (v - min) * scale).collect()
}

/// Shift `values` so their mean becomes `target`, then clip and round.
fn retarget_mean(values: &[f32], target: u8) -> (Vec<u8>, NormalizationStats) {
    let mean_before_shift = mean(values.iter().map(|&v| v as f64), values.len());
    let delta = target as f64 - mean_before_shift;

    let shifted: Vec<u8> = values
        .iter()
        .map(|&v| (v as f64 + delta).clamp(0.0, 255.0).round() as u8)
        .collect();
    let mean_after = mean(shifted.iter().map(|&v| v as f64), shifted.len());

    let stats = NormalizationStats {
        mean_before_shift,
        mean_after,
    };
    (shifted, stats)
}

fn mean(values: impl Iterator<Item = f64>, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    values.sum::<f64>() / len as f64
}

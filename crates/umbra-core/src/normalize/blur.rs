//! Separable Gaussian blur over a single f32 plane.
//!
//! `imageproc` clamps at the image edges, so the plane is first mirrored
//! outwards by the kernel radius and the filtered result cropped back.

use image::{ImageBuffer, Luma};
use imageproc::filter::separable_filter_equal;

/// Sigma implied by a kernel size when none is given explicitly
#[inline]
pub(crate) fn sigma_for_kernel(ksize: usize) -> f64 {
    0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian weights of odd length `ksize`
pub(crate) fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    let sigma = sigma_for_kernel(ksize);
    let radius = (ksize / 2) as f64;
    let scale = -0.5 / (sigma * sigma);

    let weights: Vec<f64> = (0..ksize)
        .map(|i| {
            let d = i as f64 - radius;
            (scale * d * d).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();

    weights.iter().map(|w| (w / sum) as f32).collect()
}

/// Mirror an out-of-range index without repeating the edge sample
/// (`gfedcb|abcdefgh|gfedcba`).
#[inline]
pub(crate) fn reflect_101(mut p: i64, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let len = len as i64;
    // Kernels wider than the plane need more than one bounce
    loop {
        if p < 0 {
            p = -p;
        } else if p >= len {
            p = 2 * len - 2 - p;
        } else {
            return p as usize;
        }
    }
}

/// Blur `plane` (row-major, `width * height`) with a `ksize` x `ksize`
/// Gaussian and reflect-101 borders.
pub(crate) fn gaussian_blur(plane: &[f32], width: usize, height: usize, ksize: usize) -> Vec<f32> {
    if plane.is_empty() || ksize <= 1 {
        return plane.to_vec();
    }

    let kernel = gaussian_kernel(ksize);
    let radius = ksize / 2;
    let padded_width = width + 2 * radius;
    let padded_height = height + 2 * radius;

    let padded = ImageBuffer::from_fn(padded_width as u32, padded_height as u32, |x, y| {
        let sx = reflect_101(x as i64 - radius as i64, width);
        let sy = reflect_101(y as i64 - radius as i64, height);
        Luma([plane[sy * width + sx]])
    });
    let filtered: ImageBuffer<Luma<f32>, Vec<f32>> = separable_filter_equal(&padded, &kernel);

    let data = filtered.into_raw();
    data.chunks_exact(padded_width)
        .skip(radius)
        .take(height)
        .flat_map(|row| row[radius..radius + width].iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct reflect-101 convolution, for comparison
    fn reference_blur(plane: &[f32], width: usize, height: usize, ksize: usize) -> Vec<f32> {
        let kernel = gaussian_kernel(ksize);
        let r = (ksize / 2) as i64;
        let mut out = vec![0.0f32; plane.len()];
        for y in 0..height {
            for x in 0..width {
                let mut acc = 0.0f64;
                for (j, &wy) in kernel.iter().enumerate() {
                    let sy = reflect_101(y as i64 + j as i64 - r, height);
                    for (i, &wx) in kernel.iter().enumerate() {
                        let sx = reflect_101(x as i64 + i as i64 - r, width);
                        acc += (wy * wx) as f64 * plane[sy * width + sx] as f64;
                    }
                }
                out[y * width + x] = acc as f32;
            }
        }
        out
    }

    #[test]
    fn test_edges_mirror_without_repeating_border() {
        // Ramp along x with a bright last column
        let (width, height) = (7usize, 4usize);
        let plane: Vec<f32> = (0..width * height)
            .map(|i| if i % width == width - 1 { 1.0 } else { (i % width) as f32 * 0.1 })
            .collect();

        for ksize in [3usize, 5, 11] {
            let blurred = gaussian_blur(&plane, width, height, ksize);
            let expected = reference_blur(&plane, width, height, ksize);
            for (got, want) in blurred.iter().zip(&expected) {
                assert!((got - want).abs() < 1e-5, "ksize {}: {} vs {}", ksize, got, want);
            }
        }
    }
}

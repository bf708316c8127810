//! Highlight overlay: paint qualifying dark regions onto a copy of the image.

use crate::buffer::{luma, ImageBuffer};
use crate::darkness::AnalysisResult;
use crate::params::{AnalysisParams, Rgb};
use crate::regions::{find_regions, Region};

/// Rendered overlay and the analysis it was drawn from
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub image: ImageBuffer,
    pub analysis: AnalysisResult,
}

/// Copy `image` and fill every qualifying region with `color`.
///
/// Regions are found on the original pixels. Single-channel images are
/// painted with the luma of `color`.
pub fn render_overlay(image: &ImageBuffer, params: &AnalysisParams, color: Rgb) -> Overlay {
    let intensity = image.to_intensity();
    let regions = find_regions(&intensity, params.threshold(), params.min_area());
    let analysis = AnalysisResult::from_regions(&regions, image.area());

    let mut painted = image.clone();
    paint_regions(&mut painted, &regions.regions, color);

    Overlay {
        image: painted,
        analysis,
    }
}

/// Fill the filled extent (border, interior and holes) of each region
pub(crate) fn paint_regions(image: &mut ImageBuffer, regions: &[Region], color: Rgb) {
    let channels = image.channels as usize;
    let width = image.width as usize;
    let gray = [luma(color[0], color[1], color[2])];
    let fill: &[u8] = if channels == 1 { &gray } else { &color };

    for region in regions {
        for span in &region.spans {
            let start = (span.y as usize * width + span.x_start as usize) * channels;
            let end = (span.y as usize * width + span.x_end as usize + 1) * channels;
            for px in image.data[start..end].chunks_exact_mut(channels) {
                px.copy_from_slice(fill);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DEFAULT_HIGHLIGHT_COLOR;

    fn ring_image() -> ImageBuffer {
        // 30x30 white frame with a dark 10x10 ring whose hole is bright
        let mut image = ImageBuffer::rgb(30, 30, [220, 220, 220]);
        for y in 10..20u32 {
            for x in 10..20u32 {
                let hole = (13..17).contains(&x) && (13..17).contains(&y);
                if !hole {
                    let idx = ((y * 30 + x) * 3) as usize;
                    image.data[idx..idx + 3].copy_from_slice(&[20, 20, 20]);
                }
            }
        }
        image
    }

    #[test]
    fn test_overlay_fills_region_and_hole() {
        let image = ring_image();
        let params = AnalysisParams::new(50, 10.0).unwrap();
        let overlay = render_overlay(&image, &params, DEFAULT_HIGHLIGHT_COLOR);

        assert_eq!(overlay.analysis.region_count, 1);
        assert_eq!(overlay.analysis.total_qualifying_area, 81.0);
        assert_eq!(overlay.image.pixel(10, 10), &DEFAULT_HIGHLIGHT_COLOR);
        assert_eq!(overlay.image.pixel(15, 15), &DEFAULT_HIGHLIGHT_COLOR);
        assert_eq!(overlay.image.pixel(19, 19), &DEFAULT_HIGHLIGHT_COLOR);
        assert_eq!(overlay.image.pixel(9, 10), &[220, 220, 220]);
        assert_eq!(overlay.image.pixel(20, 19), &[220, 220, 220]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let image = ring_image();
        let before = image.clone();
        let params = AnalysisParams::new(50, 0.0).unwrap();
        let _ = render_overlay(&image, &params, [0, 255, 0]);
        assert_eq!(image, before);
    }

    #[test]
    fn test_min_area_larger_than_image_returns_copy() {
        let image = ring_image();
        let params = AnalysisParams::new(50, 10_000.0).unwrap();
        let overlay = render_overlay(&image, &params, DEFAULT_HIGHLIGHT_COLOR);

        assert_eq!(overlay.image, image);
        assert_eq!(overlay.analysis.percentage, 0.0);
        assert_eq!(overlay.analysis.region_count, 0);
    }

    #[test]
    fn test_percentage_matches_darkness_computer() {
        let image = ring_image();
        let params = AnalysisParams::new(50, 10.0).unwrap();
        let overlay = render_overlay(&image, &params, DEFAULT_HIGHLIGHT_COLOR);
        assert_eq!(
            overlay.analysis,
            crate::darkness::compute_percentage(&image, &params)
        );
    }

    #[test]
    fn test_gray_image_painted_with_luma() {
        let mut image = ImageBuffer::gray(8, 8, 255);
        for y in 2..6 {
            for x in 2..6 {
                image.data[y * 8 + x] = 0;
            }
        }
        let params = AnalysisParams::new(10, 0.0).unwrap();
        let overlay = render_overlay(&image, &params, [255, 0, 255]);

        assert_eq!(overlay.image.channels, 1);
        let expected = luma(255, 0, 255);
        assert_eq!(overlay.image.pixel(3, 3), &[expected]);
        assert_eq!(overlay.image.pixel(0, 0), &[255]);
    }
}

//! Darkness percentage: the share of the frame covered by qualifying dark
//! regions.

use std::path::Path;

use serde::Serialize;

use crate::buffer::ImageBuffer;
use crate::decoders::decode_image;
use crate::params::AnalysisParams;
use crate::regions::{find_regions, RegionSet};

/// Outcome of a darkness analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Summed polygon area of the qualifying regions
    pub total_qualifying_area: f64,

    /// `width * height`
    pub total_image_area: f64,

    /// `total_qualifying_area / total_image_area * 100`, 0 for an empty frame
    pub percentage: f64,

    /// Number of qualifying regions
    pub region_count: usize,
}

impl AnalysisResult {
    pub(crate) fn from_regions(regions: &RegionSet, image_area: f64) -> Self {
        let percentage = if image_area > 0.0 {
            regions.total_area / image_area * 100.0
        } else {
            0.0
        };

        Self {
            total_qualifying_area: regions.total_area,
            total_image_area: image_area,
            percentage,
            region_count: regions.len(),
        }
    }
}

/// Percentage of `image` covered by dark regions larger than the minimum area.
pub fn compute_percentage(image: &ImageBuffer, params: &AnalysisParams) -> AnalysisResult {
    let intensity = image.to_intensity();
    let regions = find_regions(&intensity, params.threshold(), params.min_area());
    let result = AnalysisResult::from_regions(&regions, image.area());

    tracing::debug!(
        threshold = params.threshold(),
        min_area = params.min_area(),
        regions = result.region_count,
        percentage = result.percentage,
        "darkness analysis"
    );

    result
}

/// Decode `path` and analyze it.
///
/// Returns `None` when the file cannot be decoded; the failure is logged and
/// the caller moves on to the next file.
pub fn analyze_file(path: &Path, params: &AnalysisParams) -> Option<AnalysisResult> {
    match decode_image(path) {
        Ok(image) => Some(compute_percentage(&image, params)),
        Err(e) => {
            tracing::warn!("skipping {}: {}", path.display(), e);
            None
        }
    }
}

//! Dark-region extraction.
//!
//! An intensity plane is inverse-thresholded into a [`BinaryMask`], the
//! outer border of each outermost 8-connected foreground component is
//! traced with `imageproc`, and each border becomes a [`Region`] whose area
//! is the polygon area of its border through pixel centers. That area is
//! smaller than the pixel count: a 10x10 block measures 81, a lone pixel or
//! a one-pixel line measures 0.

mod contour;
mod mask;


pub use contour::{polygon_area, Point};
pub use mask::{binarize, BinaryMask, FOREGROUND};

use crate::buffer::IntensityBuffer;

/// Horizontal run of pixels, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y: u32,
    pub x_start: u32,
    pub x_end: u32,
}

impl Span {
    pub fn width(&self) -> usize {
        (self.x_end - self.x_start + 1) as usize
    }
}

/// One contiguous dark area, described by its outer border.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Compressed border polygon (pixel centers)
    pub boundary: Vec<Point>,

    /// Polygon area of `boundary`
    pub area: f64,

    /// Pixels enclosed by the border, border and holes included
    pub spans: Vec<Span>,
}

impl Region {
    /// Number of pixels covered when the region is filled
    pub fn filled_pixel_count(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, x: u32, y: u32) -> bool {
        self.spans
            .iter()
            .any(|s| s.y == y && s.x_start <= x && x <= s.x_end)
    }
}

/// Regions that passed the area filter, with their summed area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub total_area: f64,
}

impl RegionSet {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl FromIterator<Region> for RegionSet {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let regions: Vec<Region> = iter.into_iter().collect();
        let total_area = regions.iter().map(|r| r.area).sum();
        Self {
            regions,
            total_area,
        }
    }
}

/// Every outermost region below `threshold`, unfiltered.
///
/// Extraction depends only on the threshold, so the result can be reused
/// while the minimum area changes.
pub fn extract_regions(intensity: &IntensityBuffer, threshold: u8) -> Vec<Region> {
    if intensity.is_empty() {
        return Vec::new();
    }
    let mask = binarize(intensity, threshold);
    contour::external_regions(&mask)
}

/// Keep regions whose area is strictly greater than `min_area`.
pub fn filter_regions(regions: &[Region], min_area: f64) -> RegionSet {
    regions
        .iter()
        .filter(|r| r.area > min_area)
        .cloned()
        .collect()
}

/// Dark regions of `intensity` larger than `min_area`, and their total area.
pub fn find_regions(intensity: &IntensityBuffer, threshold: u8, min_area: f64) -> RegionSet {
    filter_regions(&extract_regions(intensity, threshold), min_area)
}

//! Umbra Core Library
//!
//! Quantifies dark regions of photographs as a percentage of the frame and
//! removes uneven illumination from batches of photos.
//!
//! The analysis side ([`regions`], [`darkness`], [`highlight`], [`preview`])
//! and the normalization side ([`normalize`]) are independent pure
//! transforms over [`ImageBuffer`]s. [`decoders`] and [`exporters`] move
//! buffers to and from disk.

pub mod buffer;
pub mod color;
pub mod config;
pub mod darkness;
pub mod decoders;
pub mod error;
pub mod exporters;
pub mod highlight;
pub mod normalize;
pub mod params;
pub mod preview;
pub mod regions;

/// Pixel count above which per-pixel passes switch to rayon
pub(crate) const PARALLEL_THRESHOLD: usize = 100_000;

// Re-export commonly used types
pub use buffer::{luma, ImageBuffer, IntensityBuffer};
pub use config::{load_config, ConfigHandle, UmbraConfig};
pub use darkness::{analyze_file, compute_percentage, AnalysisResult};
pub use decoders::decode_image;
pub use error::{Result, UmbraError};
pub use exporters::export_image;
pub use highlight::{render_overlay, Overlay};
pub use normalize::{normalize, normalize_with_stats, NormalizationStats};
pub use params::{AnalysisParams, NormalizationParams, Rgb, DEFAULT_HIGHLIGHT_COLOR};
pub use preview::{PreviewSession, PreviewUpdate, SubscriptionId};
pub use regions::{
    extract_regions, filter_regions, find_regions, BinaryMask, Point, Region, RegionSet, Span,
};

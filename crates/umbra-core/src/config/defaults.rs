//! Default configuration values and their sanitization.

use serde::{Deserialize, Serialize};

use crate::params::{Rgb, DEFAULT_HIGHLIGHT_COLOR};

/// Darkness analysis and highlight defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisDefaults {
    /// Pixels with intensity strictly below this value are dark (0-255)
    pub threshold: i64,
    /// Regions must be strictly larger than this area to count
    pub min_area: f64,
    /// Overlay color for highlighted regions
    pub highlight_color: Rgb,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            threshold: 50,
            min_area: 100.0,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
        }
    }
}

/// Shadow normalization defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeDefaults {
    /// Desired mean lightness after normalization (0-255)
    pub target_mean_brightness: i64,
    /// Illumination blur kernel size (odd)
    pub blur_kernel_size: i64,
    /// Directory receiving normalized images
    pub output_dir: String,
    /// Appended to the input stem
    pub suffix: String,
    /// Output extension
    pub format: String,
}

impl Default for NormalizeDefaults {
    fn default() -> Self {
        Self {
            target_mean_brightness: 128,
            blur_kernel_size: 101,
            output_dir: "normalized".to_string(),
            suffix: "_normalized".to_string(),
            format: "png".to_string(),
        }
    }
}

impl NormalizeDefaults {
    pub(crate) fn sanitize(&mut self) {
        self.format = normalize_extension(&self.format);
        if self.format.is_empty() {
            self.format = Self::default().format;
        }
    }
}

/// Directory scanning defaults for batch commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchDefaults {
    /// Extensions picked up when a directory is given as input
    pub extensions: Vec<String>,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Worker threads (None = one per core)
    pub threads: Option<usize>,
}

impl Default for BatchDefaults {
    fn default() -> Self {
        Self {
            extensions: [
                "nef", "cr2", "arw", "dng", "jpg", "jpeg", "png", "tif", "tiff", "bmp",
            ]
            .iter()
            .map(|ext| ext.to_string())
            .collect(),
            recursive: false,
            threads: None,
        }
    }
}

impl BatchDefaults {
    pub(crate) fn sanitize(&mut self) {
        let mut extensions: Vec<String> = self
            .extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .filter(|ext| !ext.is_empty())
            .collect();
        extensions.dedup();
        self.extensions = extensions;

        if self.threads == Some(0) {
            self.threads = None;
        }
    }
}

/// `".JPG"` -> `"jpg"`
fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

//! Validated parameter sets for the analysis and normalization pipelines.
//!
//! Both structs are immutable once built. Out-of-domain values are rejected
//! by the constructors instead of being coerced, so a misconfigured batch
//! fails before it touches any image.

use crate::error::{Result, UmbraError};

/// RGB overlay color
pub type Rgb = [u8; 3];

/// Neon magenta used for highlighted regions
pub const DEFAULT_HIGHLIGHT_COLOR: Rgb = [255, 0, 255];

/// Threshold and minimum region area for dark-region analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisParams {
    threshold: u8,
    min_area: f64,
}

impl AnalysisParams {
    /// Pixels strictly below `threshold` are foreground; regions qualify
    /// when their area is strictly greater than `min_area`.
    pub fn new(threshold: i64, min_area: f64) -> Result<Self> {
        Ok(Self {
            threshold: validate_threshold(threshold)?,
            min_area: validate_min_area(min_area)?,
        })
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn min_area(&self) -> f64 {
        self.min_area
    }

    /// Copy with a different threshold
    pub fn with_threshold(self, threshold: i64) -> Result<Self> {
        Ok(Self {
            threshold: validate_threshold(threshold)?,
            ..self
        })
    }

    /// Copy with a different minimum area
    pub fn with_min_area(self, min_area: f64) -> Result<Self> {
        Ok(Self {
            min_area: validate_min_area(min_area)?,
            ..self
        })
    }
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            threshold: 50,
            min_area: 100.0,
        }
    }
}

fn validate_threshold(threshold: i64) -> Result<u8> {
    u8::try_from(threshold).map_err(|_| {
        UmbraError::invalid(format!(
            "threshold must be in range 0-255, got {}",
            threshold
        ))
    })
}

fn validate_min_area(min_area: f64) -> Result<f64> {
    if !min_area.is_finite() || min_area < 0.0 {
        return Err(UmbraError::invalid(format!(
            "minimum area must be a non-negative number, got {}",
            min_area
        )));
    }
    Ok(min_area)
}

/// Target brightness and illumination blur size for shadow normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationParams {
    target_mean_brightness: u8,
    blur_kernel_size: u32,
}

impl NormalizationParams {
    /// `blur_kernel_size` must be odd and positive.
    pub fn new(target_mean_brightness: i64, blur_kernel_size: i64) -> Result<Self> {
        let target = u8::try_from(target_mean_brightness).map_err(|_| {
            UmbraError::invalid(format!(
                "target mean brightness must be in range 0-255, got {}",
                target_mean_brightness
            ))
        })?;

        if blur_kernel_size <= 0 || blur_kernel_size % 2 == 0 || blur_kernel_size > u32::MAX as i64
        {
            return Err(UmbraError::invalid(format!(
                "blur kernel size must be an odd positive integer, got {}",
                blur_kernel_size
            )));
        }

        Ok(Self {
            target_mean_brightness: target,
            blur_kernel_size: blur_kernel_size as u32,
        })
    }

    pub fn target_mean_brightness(&self) -> u8 {
        self.target_mean_brightness
    }

    pub fn blur_kernel_size(&self) -> u32 {
        self.blur_kernel_size
    }
}

impl Default for NormalizationParams {
    fn default() -> Self {
        Self {
            target_mean_brightness: 128,
            blur_kernel_size: 101,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_params_accepts_bounds() {
        assert!(AnalysisParams::new(0, 0.0).is_ok());
        let params = AnalysisParams::new(255, 999_999.0).unwrap();
        assert_eq!(params.threshold(), 255);
        assert_eq!(params.min_area(), 999_999.0);
    }

    #[test]
    fn test_analysis_params_rejects_out_of_range() {
        assert!(AnalysisParams::new(-1, 10.0).is_err());
        assert!(AnalysisParams::new(256, 10.0).is_err());
        assert!(AnalysisParams::new(50, -0.5).is_err());
        assert!(AnalysisParams::new(50, f64::NAN).is_err());
        assert!(AnalysisParams::new(50, f64::INFINITY).is_err());
    }

    #[test]
    fn test_analysis_params_with_updates() {
        let params = AnalysisParams::default().with_threshold(80).unwrap();
        assert_eq!(params.threshold(), 80);
        assert_eq!(params.min_area(), 100.0);
        assert!(params.with_min_area(-3.0).is_err());
    }

    #[test]
    fn test_normalization_params_defaults() {
        let params = NormalizationParams::default();
        assert_eq!(params.target_mean_brightness(), 128);
        assert_eq!(params.blur_kernel_size(), 101);
    }

    #[test]
    fn test_normalization_params_rejects_even_kernel() {
        let err = NormalizationParams::new(128, 100).unwrap_err();
        assert!(err.to_string().contains("odd positive"));
        assert!(NormalizationParams::new(128, 0).is_err());
        assert!(NormalizationParams::new(128, -3).is_err());
        assert!(NormalizationParams::new(128, 1).is_ok());
    }

    #[test]
    fn test_normalization_params_rejects_target_out_of_range() {
        assert!(NormalizationParams::new(256, 101).is_err());
        assert!(NormalizationParams::new(-1, 101).is_err());
        assert!(NormalizationParams::new(0, 101).is_ok());
    }
}

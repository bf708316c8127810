//! Configuration loading.
//!
//! Configuration is read once by the caller and passed down explicitly; this
//! module holds no process-wide state.

mod defaults;


pub use defaults::{AnalysisDefaults, BatchDefaults, NormalizeDefaults};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, UmbraError};
use crate::params::{AnalysisParams, NormalizationParams};

/// Candidate config file names searched for on disk
const CONFIG_FILENAMES: &[&str] = &["umbra.yml", "umbra.yaml"];

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "UMBRA_CONFIG";

/// Loaded configuration, the file it came from, and anything that went wrong
/// while looking for it.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    pub config: UmbraConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

/// Complete configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UmbraConfig {
    pub analysis: AnalysisDefaults,
    pub normalize: NormalizeDefaults,
    pub batch: BatchDefaults,
}

impl UmbraConfig {
    fn sanitize(mut self) -> Self {
        self.normalize.sanitize();
        self.batch.sanitize();
        self
    }

    /// Validated analysis parameters
    pub fn analysis_params(&self) -> Result<AnalysisParams> {
        AnalysisParams::new(self.analysis.threshold, self.analysis.min_area)
            .map_err(|e| UmbraError::Config(format!("analysis: {}", e)))
    }

    /// Validated normalization parameters
    pub fn normalization_params(&self) -> Result<NormalizationParams> {
        NormalizationParams::new(
            self.normalize.target_mean_brightness,
            self.normalize.blur_kernel_size,
        )
        .map_err(|e| UmbraError::Config(format!("normalize: {}", e)))
    }
}

/// Load configuration from disk, optionally forcing a specific path.
///
/// The first candidate that parses wins. Unreadable or malformed candidates
/// are recorded as warnings and the search continues; with nothing usable
/// the built-in defaults are returned.
pub fn load_config(custom_path: Option<&Path>) -> ConfigHandle {
    let mut handle = load_from_candidates(config_candidates(custom_path));
    if let Some(path) = custom_path.filter(|p| !p.is_file()) {
        handle
            .warnings
            .insert(0, format!("Config file not found: {}", path.display()));
    }
    handle
}

fn load_from_candidates(candidates: Vec<PathBuf>) -> ConfigHandle {
    let mut warnings = Vec::new();

    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match serde_yaml::from_str::<UmbraConfig>(&contents) {
                Ok(config) => {
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return ConfigHandle {
                        config: config.sanitize(),
                        source: Some(source),
                        warnings,
                    };
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    ConfigHandle {
        config: UmbraConfig::default(),
        source: None,
        warnings,
    }
}

/// Config file candidates in priority order
pub fn config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(path) = user_config_path() {
        candidates.push(path);
    }

    candidates
}

/// `<config dir>/umbra/umbra.yml`, where `umbra init` writes by default
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("umbra").join(CONFIG_FILENAMES[0]))
}

/// Default configuration rendered as YAML
pub fn default_config_yaml() -> Result<String> {
    serde_yaml::to_string(&UmbraConfig::default())
        .map_err(|e| UmbraError::Config(format!("Failed to serialize defaults: {}", e)))
}

//! Command implementations for the umbra CLI.

mod analyze;
mod highlight;
mod init;
mod normalize;

// Re-export all command functions
pub use analyze::cmd_analyze;
pub use highlight::cmd_highlight;
pub use init::cmd_init;
pub use normalize::cmd_normalize;

/// Warn up front when RAW inputs will fail because this build cannot decode them.
fn warn_unsupported_raw(files: &[std::path::PathBuf]) {
    if umbra_core::decoders::raw_supported() {
        return;
    }
    let raw_count = files
        .iter()
        .filter(|path| umbra_core::decoders::is_raw_path(path))
        .count();
    if raw_count > 0 {
        tracing::warn!(
            "{} RAW files cannot be decoded: this build lacks the `raw` feature",
            raw_count
        );
    }
}

/// Size the global rayon pool. `None` keeps one worker per core.
fn configure_threads(threads: Option<usize>) -> Result<(), String> {
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        tracing::info!("Using {} threads for parallel processing", num_threads);
    }
    Ok(())
}

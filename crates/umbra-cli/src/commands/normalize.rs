use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use umbra_cli::{determine_output_path, expand_inputs, OutputNaming};
use umbra_core::{decode_image, export_image, normalize_with_stats, UmbraConfig};

use super::{configure_threads, warn_unsupported_raw};

/// Remove uneven illumination from every input image and write the results.
///
/// Each file is decoded, normalized and written independently; failures are
/// collected and reported in the summary, and make the command fail once
/// the whole batch has run.
#[allow(clippy::too_many_arguments)]
pub fn cmd_normalize(
    config: &UmbraConfig,
    inputs: Vec<PathBuf>,
    recursive: bool,
    out: Option<PathBuf>,
    target: Option<i64>,
    kernel: Option<i64>,
    suffix: Option<String>,
    format: Option<String>,
    threads: Option<usize>,
) -> Result<(), String> {
    let batch_start = Instant::now();

    let mut settings = config.normalize.clone();
    if let Some(target) = target {
        settings.target_mean_brightness = target;
    }
    if let Some(kernel) = kernel {
        settings.blur_kernel_size = kernel;
    }
    let params = umbra_core::NormalizationParams::new(
        settings.target_mean_brightness,
        settings.blur_kernel_size,
    )
    .map_err(|e| e.to_string())?;

    let naming = OutputNaming {
        dir: out.unwrap_or_else(|| PathBuf::from(&settings.output_dir)),
        suffix: suffix.unwrap_or(settings.suffix),
        format: format
            .map(|f| f.trim_start_matches('.').to_lowercase())
            .unwrap_or(settings.format),
    };
    if !umbra_core::exporters::EXPORT_EXTENSIONS.contains(&naming.format.as_str()) {
        return Err(format!(
            "Unsupported output format: {} (supported: {})",
            naming.format,
            umbra_core::exporters::EXPORT_EXTENSIONS.join(", ")
        ));
    }

    if inputs.is_empty() {
        return Err("No input files or directories specified".to_string());
    }
    let files = expand_inputs(
        &inputs,
        recursive || config.batch.recursive,
        &config.batch.extensions,
    )?;
    if files.is_empty() {
        return Err(format!(
            "No supported image files found (supported: {})",
            config.batch.extensions.join(", ")
        ));
    }

    println!("Found {} image files to process", files.len());
    warn_unsupported_raw(&files);
    configure_threads(threads.or(config.batch.threads))?;

    if !naming.dir.exists() {
        std::fs::create_dir_all(&naming.dir)
            .map_err(|e| format!("Failed to create output directory: {}", e))?;
    }

    println!(
        "\nNormalizing to mean brightness {} (blur kernel {})...\n",
        params.target_mean_brightness(),
        params.blur_kernel_size()
    );

    // Progress tracking
    let processed_count = AtomicUsize::new(0);
    let total_files = files.len();

    let results: Vec<Result<PathBuf, String>> = files
        .par_iter()
        .map(|input| {
            let file_start = Instant::now();

            let image = decode_image(input).map_err(|e| e.to_string())?;
            let (normalized, stats) = normalize_with_stats(&image, &params);

            let output_path = determine_output_path(input, &naming)?;
            export_image(&normalized, &output_path).map_err(|e| e.to_string())?;

            let count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
            println!(
                "[{}/{}] {} -> {} (mean {:.2} -> {:.2}, {:.2}s)",
                count,
                total_files,
                input.display(),
                output_path.display(),
                stats.mean_before_shift,
                stats.mean_after,
                file_start.elapsed().as_secs_f64()
            );

            Ok(output_path)
        })
        .collect();

    // Summarize results
    let mut success_count = 0;
    let mut errors: Vec<(&PathBuf, &String)> = Vec::new();

    for (input, result) in files.iter().zip(results.iter()) {
        match result {
            Ok(_) => success_count += 1,
            Err(e) => errors.push((input, e)),
        }
    }

    let batch_elapsed = batch_start.elapsed();

    println!("\n========================================");
    println!("NORMALIZATION COMPLETE");
    println!("========================================");
    println!("  Successful: {}", success_count);
    println!("  Failed:     {}", errors.len());
    println!("  Output dir: {}", naming.dir.display());
    println!("  Total time: {:.2}s", batch_elapsed.as_secs_f64());

    if !errors.is_empty() {
        println!("\nErrors:");
        for (path, error) in &errors {
            println!("  {}: {}", path.display(), error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("{} files failed to process", errors.len()))
    }
}

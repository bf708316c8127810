use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

use umbra_cli::expand_inputs;
use umbra_core::{analyze_file, AnalysisResult, UmbraConfig};

use super::{configure_threads, warn_unsupported_raw};

/// Per-file entry of the darkness report.
///
/// `analysis` is `None` when the file could not be decoded.
#[derive(Serialize)]
pub struct FileReport {
    pub file: String,
    pub analysis: Option<AnalysisResult>,
}

/// Report the dark-region percentage of every input image.
///
/// Files that cannot be decoded are listed as unreadable and do not fail
/// the command.
#[allow(clippy::too_many_arguments)]
pub fn cmd_analyze(
    config: &UmbraConfig,
    inputs: Vec<PathBuf>,
    recursive: bool,
    threshold: Option<i64>,
    min_area: Option<f64>,
    json: bool,
    threads: Option<usize>,
) -> Result<(), String> {
    let mut params = config.analysis_params().map_err(|e| e.to_string())?;
    if let Some(threshold) = threshold {
        params = params.with_threshold(threshold).map_err(|e| e.to_string())?;
    }
    if let Some(min_area) = min_area {
        params = params.with_min_area(min_area).map_err(|e| e.to_string())?;
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

    warn_unsupported_raw(&files);
    configure_threads(threads.or(config.batch.threads))?;
    tracing::info!(
        "Analyzing {} files (threshold {}, min area {})",
        files.len(),
        params.threshold(),
        params.min_area()
    );

    // Results come back in input order
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| FileReport {
            file: path.display().to_string(),
            analysis: analyze_file(path, &params),
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&reports)
            .map_err(|e| format!("Failed to serialize report: {}", e))?;
        println!("{}", out);
        return Ok(());
    }

    print_table(&reports);
    Ok(())
}

fn print_table(reports: &[FileReport]) {
    let name_width = reports
        .iter()
        .map(|r| r.file.len())
        .max()
        .unwrap_or(0)
        .max("File".len());

    println!(
        "{:<width$}  {:>12}  {:>8}",
        "File",
        "Dark area",
        "Regions",
        width = name_width
    );
    println!("{}", "-".repeat(name_width + 24));

    let mut unreadable = 0;
    for report in reports {
        match &report.analysis {
            Some(result) => println!(
                "{:<width$}  {:>11.2}%  {:>8}",
                report.file,
                result.percentage,
                result.region_count,
                width = name_width
            ),
            None => {
                unreadable += 1;
                println!(
                    "{:<width$}  {:>12}  {:>8}",
                    report.file,
                    "unreadable",
                    "-",
                    width = name_width
                );
            }
        }
    }

    println!();
    println!(
        "Analyzed {} files ({} unreadable)",
        reports.len(),
        unreadable
    );
}

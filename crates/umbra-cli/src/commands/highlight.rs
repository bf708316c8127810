use std::path::{Path, PathBuf};

use umbra_cli::parse_rgb;
use umbra_core::{decode_image, export_image, render_overlay, UmbraConfig};

/// Paint the qualifying dark regions of one image and save the result.
///
/// Without `out` the overlay is written next to the input as
/// `<stem>_highlighted.png`.
pub fn cmd_highlight(
    config: &UmbraConfig,
    input: PathBuf,
    out: Option<PathBuf>,
    threshold: Option<i64>,
    min_area: Option<f64>,
    color: Option<String>,
) -> Result<(), String> {
    let mut params = config.analysis_params().map_err(|e| e.to_string())?;
    if let Some(threshold) = threshold {
        params = params.with_threshold(threshold).map_err(|e| e.to_string())?;
    }
    if let Some(min_area) = min_area {
        params = params.with_min_area(min_area).map_err(|e| e.to_string())?;
    }
    let color = match color {
        Some(color) => parse_rgb(&color)?,
        None => config.analysis.highlight_color,
    };

    let image = decode_image(&input).map_err(|e| e.to_string())?;
    let overlay = render_overlay(&image, &params, color);

    let output_path = match out {
        Some(path) => path,
        None => default_output_path(&input)?,
    };
    export_image(&overlay.image, &output_path).map_err(|e| e.to_string())?;

    println!(
        "{}: {:.2}% dark ({} regions, area {:.1} of {:.0})",
        input.display(),
        overlay.analysis.percentage,
        overlay.analysis.region_count,
        overlay.analysis.total_qualifying_area,
        overlay.analysis.total_image_area
    );
    println!("Saved overlay to {}", output_path.display());

    Ok(())
}

fn default_output_path(input: &Path) -> Result<PathBuf, String> {
    let stem = input
        .file_stem()
        .ok_or_else(|| format!("Invalid input filename: {}", input.display()))?
        .to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new("."));
    Ok(parent.join(format!("{}_highlighted.png", stem)))
}

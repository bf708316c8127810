//! Input file handling and path utilities.

use std::path::{Path, PathBuf};

/// How output files are named and where they go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    /// Destination directory
    pub dir: PathBuf,
    /// Appended to the input file stem
    pub suffix: String,
    /// Output extension, without the dot
    pub format: String,
}

/// Determine the output path for `input`: `<dir>/<stem><suffix>.<format>`
pub fn determine_output_path(input: &Path, naming: &OutputNaming) -> Result<PathBuf, String> {
    let stem = input
        .file_stem()
        .ok_or_else(|| format!("Invalid input filename: {}", input.display()))?
        .to_string_lossy();

    Ok(naming
        .dir
        .join(format!("{}{}.{}", stem, naming.suffix, naming.format)))
}

/// Expand a list of inputs (files and directories) into a list of image files.
///
/// Directories are scanned for files whose lowercase extension is in
/// `extensions`. If `recursive` is true, subdirectories are also scanned.
/// Explicitly named files are kept whatever their extension.
pub fn expand_inputs(
    inputs: &[PathBuf],
    recursive: bool,
    extensions: &[String],
) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            collect_images_from_dir(input, recursive, extensions, &mut files)?;
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(format!("Path not found: {}", input.display()));
        }
    }

    // Sort for consistent ordering
    files.sort();
    files.dedup();
    Ok(files)
}

/// Recursively collect image files from a directory.
fn collect_images_from_dir(
    dir: &Path,
    recursive: bool,
    extensions: &[String],
    files: &mut Vec<PathBuf>,
) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;
        let path = entry.path();

        if path.is_dir() && recursive {
            collect_images_from_dir(&path, recursive, extensions, files)?;
        } else if path.is_file() {
            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                let ext = ext.to_lowercase();
                if extensions.iter().any(|allowed| *allowed == ext) {
                    files.push(path);
                }
            }
        }
    }
    Ok(())
}

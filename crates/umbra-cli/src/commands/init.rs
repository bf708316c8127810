use std::path::PathBuf;

use umbra_core::config::{default_config_yaml, user_config_path};

/// Write the default configuration file.
///
/// Targets `path` or the per-user config location. An existing file is kept
/// unless `force` is true.
pub fn cmd_init(path: Option<PathBuf>, force: bool) -> Result<(), String> {
    let target = path
        .or_else(user_config_path)
        .ok_or("Could not determine the user configuration directory; pass --path")?;

    if target.exists() && !force {
        println!(
            "Skipped: {} (already exists, use --force to overwrite)",
            target.display()
        );
        return Ok(());
    }

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
    }

    let yaml = default_config_yaml().map_err(|e| e.to_string())?;
    std::fs::write(&target, yaml)
        .map_err(|e| format!("Failed to write {}: {}", target.display(), e))?;

    println!("Wrote default configuration to {}", target.display());
    Ok(())
}

//! Overlay color parsing.

use umbra_core::Rgb;

/// Parse an overlay color in format "R,G,B" with 0-255 components
pub fn parse_rgb(color_str: &str) -> Result<Rgb, String> {
    let parts: Vec<&str> = color_str.split(',').collect();
    if parts.len() != 3 {
        return Err(format!(
            "Color must be in format R,G,B (e.g., 255,0,255), got: {}",
            color_str
        ));
    }

    let mut rgb = [0u8; 3];
    for ((value, part), name) in rgb.iter_mut().zip(&parts).zip(["red", "green", "blue"]) {
        *value = part
            .trim()
            .parse::<u8>()
            .map_err(|_| format!("Invalid {} value (expected 0-255): {}", name, part.trim()))?;
    }

    Ok(rgb)
}

use color::{AlphaColor, ParseError};
use image::Rgb;

use crate::splitter::labeling::Connectivity;

pub(crate) fn validate_tolerance(value: &str) -> Result<f32, String> {
    let num = value
        .parse::<f32>()
        .map_err(|_| "Not a valid floating point number".to_string())?;
    if !num.is_finite() {
        return Err("Number must be finite".to_string());
    }
    if num < 0.0 {
        return Err("Number must not be negative".to_string());
    }
    Ok(num)
}

pub(crate) fn validate_connectivity(value: &str) -> Result<Connectivity, String> {
    match value {
        "4" => Ok(Connectivity::Four),
        "8" => Ok(Connectivity::Eight),
        _ => Err("Connectivity must be 4 or 8".to_string()),
    }
}

pub(crate) fn validate_background_color(value: &str) -> Result<Rgb<u8>, String> {
    match parse_color(value) {
        Ok(color) => Ok(color),
        Err(e) => Err(e.to_string()),
    }
}

/// Parse a string into a color, with format like this #RRGGBB
fn parse_color(color: &str) -> Result<Rgb<u8>, ParseError> {
    let color = color::parse_color(color)?;
    let color: AlphaColor<color::Srgb> = color.to_alpha_color();
    let [red, green, blue, _alpha] = color.to_rgba8().to_u8_array();
    Ok(Rgb([red, green, blue]))
}

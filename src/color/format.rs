//! Color string conversion and validation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fallback fill for entities without a usable color (Tailwind gray-200).
pub const DEFAULT_COLOR: &str = "#e5e7eb";

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

static RGB_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^rgb\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*\)$").expect("valid rgb color regex")
});

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digits regex"));

/// Named colors recognized by [`is_valid_color`], with their hex values.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "#ff0000"),
    ("blue", "#0000ff"),
    ("green", "#008000"),
    ("yellow", "#ffff00"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("gray", "#808080"),
    ("grey", "#808080"),
];

pub fn default_color() -> &'static str {
    DEFAULT_COLOR
}

/// Convert an `rgb(...)` string to `#rrggbb`.
///
/// Input that does not start with `rgb` is returned unchanged. An `rgb`
/// string with fewer than three integer components yields [`DEFAULT_COLOR`].
/// Components above 255 are clamped.
pub fn rgb_to_hex(rgb: &str) -> String {
    if !rgb.starts_with("rgb") {
        return rgb.to_string();
    }

    let components: Vec<u8> = DIGITS
        .find_iter(rgb)
        .take(3)
        .map(|m| m.as_str().parse::<u32>().map_or(255, |c| c.min(255) as u8))
        .collect();
    if components.len() < 3 {
        return DEFAULT_COLOR.to_string();
    }

    format!(
        "#{:02x}{:02x}{:02x}",
        components[0], components[1], components[2]
    )
}

/// Whether `color` is `#rrggbb`, `rgb(r, g, b)`, or one of the named colors.
pub fn is_valid_color(color: &str) -> bool {
    if color.is_empty() {
        return false;
    }
    if color.starts_with('#') {
        return HEX_COLOR.is_match(color);
    }
    if RGB_COLOR.is_match(color) {
        return true;
    }
    named_color(color).is_some()
}

/// Canonical lowercase `#rrggbb` for any valid color, [`DEFAULT_COLOR`]
/// otherwise.
pub fn canonical_hex(color: Option<&str>) -> String {
    let Some(color) = color.map(str::trim).filter(|c| !c.is_empty()) else {
        return DEFAULT_COLOR.to_string();
    };

    if HEX_COLOR.is_match(color) {
        return color.to_ascii_lowercase();
    }
    if RGB_COLOR.is_match(color) {
        return rgb_to_hex(&color.to_ascii_lowercase());
    }
    named_color(color)
        .unwrap_or(DEFAULT_COLOR)
        .to_string()
}

fn named_color(color: &str) -> Option<&'static str> {
    let lower = color.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, hex)| *hex)
}

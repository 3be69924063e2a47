use serde::Serialize;

use crate::color::{canonical_hex, is_valid_color};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorReport {
    pub input: String,
    pub hex: String,
    pub valid: bool,
}

pub fn describe_colors(values: &[String]) -> Vec<ColorReport> {
    values
        .iter()
        .map(|value| ColorReport {
            input: value.clone(),
            hex: canonical_hex(Some(value)),
            valid: is_valid_color(value),
        })
        .collect()
}

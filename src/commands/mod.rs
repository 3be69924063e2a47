//! CLI command implementations for bucketmap.
//!
//! Available commands:
//! - **normalize**: Normalize entity fields into buckets
//! - **stats**: Print per-field min/max statistics
//! - **classify**: Look ranks up in a classification table
//! - **color**: Canonicalize color strings
//! - **init**: Write a default configuration file

pub mod classify;
pub mod color;
pub mod init;
pub mod normalize;

pub use classify::{classify_ranks, RankClassification};
pub use color::{describe_colors, ColorReport};
pub use init::init_config;
pub use normalize::{handle_normalize, handle_stats, read_entities, NormalizeOptions};

use crate::config::{load_config, load_config_from_path, BucketmapConfig};
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Explicit config file if given, otherwise the nearest `.bucketmap.toml`.
pub fn resolve_config(path: Option<&Path>) -> Result<BucketmapConfig> {
    match path {
        Some(path) => Ok(load_config_from_path(path)?),
        None => Ok(load_config()),
    }
}

/// Serialize `value` as JSON to `output` or stdout.
pub fn write_json<T: serde::Serialize>(
    value: &T,
    output: Option<&PathBuf>,
    pretty: bool,
) -> Result<()> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');

    match output {
        Some(path) => std::fs::write(path, json)?,
        None => std::io::stdout().lock().write_all(json.as_bytes())?,
    }
    Ok(())
}

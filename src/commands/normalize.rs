use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{resolve_config, write_json};
use crate::config::{BucketmapConfig, ParallelConfig};
use crate::core::EntityMap;
use crate::normalize::{NormalizationPlan, Normalizer};

/// Options shared by the `normalize` and `stats` commands
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    pub input: PathBuf,
    pub fields: Option<Vec<String>>,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub pretty: bool,
    pub sequential: bool,
}

/// Read a JSON object of entities from a file, or stdin for `-`.
pub fn read_entities(input: &Path) -> Result<EntityMap> {
    let contents = if input == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read entities from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
    };

    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON object of entities", input.display()))
}

pub fn handle_normalize(options: NormalizeOptions) -> Result<()> {
    let (normalizer, config) = build_normalizer(&options)?;
    let fields = resolve_fields(&options, &config)?;
    let entities = read_entities(&options.input)?;

    tracing::info!(
        entities = entities.len(),
        fields = fields.len(),
        "Normalizing {}",
        options.input.display()
    );
    let normalized = normalizer.normalize(&entities, &fields);
    write_json(&normalized, options.output.as_ref(), options.pretty)
}

pub fn handle_stats(options: NormalizeOptions) -> Result<()> {
    let (normalizer, config) = build_normalizer(&options)?;
    let fields = resolve_fields(&options, &config)?;
    let entities = read_entities(&options.input)?;

    let stats = normalizer.gather(&entities, &fields);
    write_json(&stats, options.output.as_ref(), options.pretty)
}

fn build_normalizer(options: &NormalizeOptions) -> Result<(Normalizer, BucketmapConfig)> {
    let config = resolve_config(options.config.as_deref())?;
    let mut plan = NormalizationPlan::from_config(&config)?;
    if options.sequential {
        plan = plan.with_parallel(ParallelConfig::sequential());
    }
    Ok((Normalizer::new(plan), config))
}

fn resolve_fields(options: &NormalizeOptions, config: &BucketmapConfig) -> Result<Vec<String>> {
    let fields = options
        .fields
        .clone()
        .unwrap_or_else(|| config.default_fields());
    if fields.is_empty() {
        anyhow::bail!("No fields to normalize. Pass --fields or set normalization.fields in config.");
    }
    Ok(fields)
}

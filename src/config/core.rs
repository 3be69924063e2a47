use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::fields::FieldPolicy;
use super::parallel::ParallelConfig;
use super::presets::Preset;
use crate::buckets::{ClassRange, ScaleRange};

/// Root configuration structure for bucketmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BucketmapConfig {
    /// Normalization settings
    #[serde(default)]
    pub normalization: Option<NormalizationConfig>,

    /// Custom classification tables, keyed by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tables: BTreeMap<String, Vec<ClassRange>>,

    /// Parallel processing configuration
    #[serde(default)]
    pub parallel: Option<ParallelConfig>,
}

impl BucketmapConfig {
    /// Normalization settings, or the defaults when the section is absent.
    pub fn normalization(&self) -> NormalizationConfig {
        self.normalization.clone().unwrap_or_default()
    }

    pub fn parallel(&self) -> ParallelConfig {
        self.parallel.clone().unwrap_or_default()
    }

    /// Fields to normalize when the caller does not name any.
    pub fn default_fields(&self) -> Vec<String> {
        self.normalization
            .as_ref()
            .map(|n| n.fields.clone())
            .unwrap_or_default()
    }
}

/// How entities are tagged and which policy each field follows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizationConfig {
    /// Field the entity identifier is injected under (default: "isoCode")
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Fields normalized when none are given on the command line
    #[serde(default)]
    pub fields: Vec<String>,

    /// Range for scaled fields without an explicit range (default: [3, 6])
    #[serde(default = "default_scale")]
    pub default_scale: ScaleRange,

    /// Policy bundle applied before `policies` (default: "rank-groups")
    #[serde(default)]
    pub preset: Preset,

    /// Per-field policies; these override the preset
    #[serde(default)]
    pub policies: BTreeMap<String, FieldPolicy>,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            id_field: default_id_field(),
            fields: Vec::new(),
            default_scale: default_scale(),
            preset: Preset::default(),
            policies: BTreeMap::new(),
        }
    }
}

pub fn default_id_field() -> String {
    "isoCode".to_string()
}

pub fn default_scale() -> ScaleRange {
    ScaleRange::GENERIC
}

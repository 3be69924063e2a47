//! Field policy presets.
//!
//! - **RankGroups**: `access_rank` uses the restriction groups and
//!   `needs_rank` the shortage groups; everything else is scaled.
//! - **None**: every field is scaled unless configured otherwise.
//!
//! # Example
//!
//! ```rust
//! use bucketmap::config::{FieldPolicy, Preset};
//!
//! let policies = Preset::RankGroups.policies();
//! assert_eq!(policies["access_rank"], FieldPolicy::ClassifyRestriction);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::fields::FieldPolicy;

/// Field carrying an access rank in the rank-groups preset
pub const ACCESS_RANK_FIELD: &str = "access_rank";

/// Field carrying a needs rank in the rank-groups preset
pub const NEEDS_RANK_FIELD: &str = "needs_rank";

/// Named bundles of field policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Rank fields classified through the built-in group tables (default)
    #[default]
    RankGroups,
    /// No preset policies
    None,
}

impl Preset {
    /// Field policies contributed by this preset.
    pub fn policies(self) -> BTreeMap<String, FieldPolicy> {
        match self {
            Preset::RankGroups => BTreeMap::from([
                (
                    ACCESS_RANK_FIELD.to_string(),
                    FieldPolicy::ClassifyRestriction,
                ),
                (NEEDS_RANK_FIELD.to_string(), FieldPolicy::ClassifyShortage),
            ]),
            Preset::None => BTreeMap::new(),
        }
    }
}

/// Preset policies overlaid with explicit ones. Explicit entries win.
pub fn merge_preset_with_policies(
    preset: Preset,
    policies: &BTreeMap<String, FieldPolicy>,
) -> BTreeMap<String, FieldPolicy> {
    let mut merged = preset.policies();
    merged.extend(policies.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

use serde::{Deserialize, Serialize};

use crate::buckets::ScaleRange;

/// How one field is turned into buckets.
///
/// In TOML:
///
/// ```toml
/// [normalization.policies]
/// access_rank = { policy = "classify-restriction" }
/// gdp = { policy = "scale", range = [1, 11] }
/// risk = { policy = "classify", table = "risk_tiers" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum FieldPolicy {
    /// Built-in restriction groups (1-5)
    ClassifyRestriction,
    /// Built-in shortage groups (1-10)
    ClassifyShortage,
    /// A named table, built-in or from `[tables]`
    Classify { table: String },
    /// Linear scaling against the field's observed range. Without an explicit
    /// range the plan's default scale applies.
    Scale {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        range: Option<ScaleRange>,
    },
}

impl FieldPolicy {
    /// Scale with the plan's default range.
    pub fn scale() -> Self {
        Self::Scale { range: None }
    }

    /// Scale into an explicit range.
    pub fn scale_into(range: ScaleRange) -> Self {
        Self::Scale { range: Some(range) }
    }

    pub fn classify(table: impl Into<String>) -> Self {
        Self::Classify {
            table: table.into(),
        }
    }

    /// Name of the classification table this policy reads, if any.
    pub fn table_name(&self) -> Option<&str> {
        match self {
            Self::ClassifyRestriction => Some("restriction"),
            Self::ClassifyShortage => Some("shortage"),
            Self::Classify { table } => Some(table),
            Self::Scale { .. } => None,
        }
    }
}

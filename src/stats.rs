//! Per-field statistics over a collection of entity records.
//!
//! Only valid values contribute: null, absent, empty-string and
//! non-numeric values are skipped. A field with no valid values keeps the
//! `+inf` / `-inf` sentinels, and [`FieldStats::has_data`] reports it.
//! Serialized stats write the sentinels as `"Infinity"` / `"-Infinity"`.

use crate::core::{EntityRecord, RawValue};
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Observed range of one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    #[serde(serialize_with = "serialize_bound")]
    pub min: f64,
    #[serde(serialize_with = "serialize_bound")]
    pub max: f64,
    /// Number of valid values folded into `min`/`max`
    pub count: usize,
}

impl FieldStats {
    /// Stats before any value has been seen.
    pub const EMPTY: FieldStats = FieldStats {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
        count: 0,
    };

    /// Fold one more valid value into the range.
    pub fn observe(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
            count: self.count + 1,
        }
    }

    /// Compute the stats of `field` across `records`.
    pub fn gather<'a, I>(records: I, field: &str) -> Self
    where
        I: IntoIterator<Item = &'a EntityRecord>,
    {
        records
            .into_iter()
            .filter_map(|record| record.number(field))
            .fold(Self::EMPTY, Self::observe)
    }

    /// False when no valid value was observed and the range is undefined.
    pub fn has_data(&self) -> bool {
        self.count > 0
    }

    /// True when every observed value was identical.
    pub fn is_constant(&self) -> bool {
        self.has_data() && self.min == self.max
    }
}

impl Default for FieldStats {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Finite bounds as numbers, the empty-field sentinels as strings.
fn serialize_bound<S: Serializer>(bound: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    RawValue::from_f64(*bound).serialize(serializer)
}

/// Stats keyed by field name.
pub type FieldStatsMap = BTreeMap<String, FieldStats>;

/// Gather min/max for each of `fields` across `records`.
///
/// Every requested field gets an entry, even when none of its values were
/// valid. An empty `fields` slice yields an empty map.
pub fn gather_stats<S: AsRef<str>>(records: &[EntityRecord], fields: &[S]) -> FieldStatsMap {
    fields
        .iter()
        .map(|field| {
            let field = field.as_ref();
            (field.to_string(), FieldStats::gather(records, field))
        })
        .collect()
}

/// Same as [`gather_stats`], with fields processed on rayon's pool.
pub fn gather_stats_parallel<S: AsRef<str> + Sync>(
    records: &[EntityRecord],
    fields: &[S],
) -> FieldStatsMap {
    fields
        .par_iter()
        .map(|field| {
            let field = field.as_ref();
            (field.to_string(), FieldStats::gather(records, field))
        })
        .collect()
}

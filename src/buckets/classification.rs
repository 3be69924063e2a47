//! Fixed classification tables mapping ranks to preset groups.
//!
//! Unlike scaling, these tables do not depend on the observed data: a rank
//! falls into whichever inclusive `[low, high]` range contains it, or into no
//! group at all. The two built-in tables follow the BAL 2025 groupings.

use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One inclusive `[low, high] -> bucket` entry of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRange {
    pub low: f64,
    pub high: f64,
    pub bucket: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ClassRange {
    pub fn new(low: f64, high: f64, bucket: i64) -> Self {
        Self {
            low,
            high,
            bucket,
            label: None,
        }
    }

    pub fn labeled(low: f64, high: f64, bucket: i64, label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            ..Self::new(low, high, bucket)
        }
    }

    pub fn contains(&self, rank: f64) -> bool {
        rank >= self.low && rank <= self.high
    }
}

/// Ordered, non-overlapping set of ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationTable {
    name: String,
    ranges: Vec<ClassRange>,
}

impl ClassificationTable {
    /// Build a table, sorting the ranges and rejecting empty, non-positive,
    /// inverted or overlapping entries.
    pub fn new(name: impl Into<String>, mut ranges: Vec<ClassRange>) -> Result<Self> {
        let name = name.into();
        if ranges.is_empty() {
            return Err(Error::invalid_table(name, "no ranges defined"));
        }

        for range in &ranges {
            if !(range.low > 0.0) || !range.high.is_finite() {
                return Err(Error::invalid_table(
                    name,
                    format!("range [{}, {}] must be positive and finite", range.low, range.high),
                ));
            }
            if range.low > range.high {
                return Err(Error::invalid_table(
                    name,
                    format!("range [{}, {}] has low above high", range.low, range.high),
                ));
            }
        }

        ranges.sort_by(|a, b| a.low.total_cmp(&b.low));
        if let Some(pair) = ranges.windows(2).find(|pair| pair[1].low <= pair[0].high) {
            return Err(Error::invalid_table(
                name,
                format!(
                    "ranges [{}, {}] and [{}, {}] overlap",
                    pair[0].low, pair[0].high, pair[1].low, pair[1].high
                ),
            ));
        }

        Ok(Self { name, ranges })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ranges(&self) -> &[ClassRange] {
        &self.ranges
    }

    /// Bucket for `rank`, or `None` when the rank is not positive, not a
    /// number, or falls outside every range.
    pub fn classify(&self, rank: f64) -> Option<i64> {
        self.range_for(rank).map(|range| range.bucket)
    }

    /// Label of the range containing `rank`, if it has one.
    pub fn label_for(&self, rank: f64) -> Option<&str> {
        self.range_for(rank).and_then(|range| range.label.as_deref())
    }

    /// Distinct buckets in range order.
    pub fn buckets(&self) -> Vec<i64> {
        let mut buckets: Vec<i64> = Vec::with_capacity(self.ranges.len());
        for range in &self.ranges {
            if !buckets.contains(&range.bucket) {
                buckets.push(range.bucket);
            }
        }
        buckets
    }

    fn range_for(&self, rank: f64) -> Option<&ClassRange> {
        if !(rank > 0.0) {
            return None;
        }
        let idx = self.ranges.partition_point(|range| range.high < rank);
        self.ranges.get(idx).filter(|range| range.contains(rank))
    }
}

static RESTRICTION_GROUPS: Lazy<ClassificationTable> = Lazy::new(|| ClassificationTable {
    name: "restriction".to_string(),
    ranges: vec![
        ClassRange::labeled(1.0, 15.0, 1, "Extreme"),
        ClassRange::labeled(16.0, 33.0, 2, "Severe"),
        ClassRange::labeled(34.0, 50.0, 3, "Considerable"),
        ClassRange::labeled(51.0, 55.0, 4, "Some"),
        ClassRange::labeled(56.0, 88.0, 5, "Minimal"),
    ],
});

static SHORTAGE_GROUPS: Lazy<ClassificationTable> = Lazy::new(|| ClassificationTable {
    name: "shortage".to_string(),
    ranges: vec![
        ClassRange::labeled(1.0, 4.0, 1, ">10m"),
        ClassRange::labeled(5.0, 6.0, 2, "5-10m"),
        ClassRange::labeled(7.0, 9.0, 3, "3-5m"),
        ClassRange::labeled(10.0, 19.0, 4, "1-3m"),
        ClassRange::labeled(20.0, 28.0, 5, "500k-1m"),
        ClassRange::labeled(29.0, 32.0, 6, "250-500k"),
        ClassRange::labeled(33.0, 38.0, 7, "100-250k"),
        ClassRange::labeled(39.0, 45.0, 8, "50-100k"),
        ClassRange::labeled(46.0, 59.0, 9, "10-50k"),
        ClassRange::labeled(60.0, 76.0, 10, "<10k"),
    ],
});

/// Access-restriction groups 1-5 over ranks 1-88.
pub fn restriction_groups() -> &'static ClassificationTable {
    &RESTRICTION_GROUPS
}

/// Labour-shortage groups 1-10 over ranks 1-76.
pub fn shortage_groups() -> &'static ClassificationTable {
    &SHORTAGE_GROUPS
}

/// Restriction group (1-5) for an access rank.
pub fn restriction_group(rank: f64) -> Option<i64> {
    RESTRICTION_GROUPS.classify(rank)
}

/// Shortage group (1-10) for a needs rank.
pub fn shortage_group(rank: f64) -> Option<i64> {
    SHORTAGE_GROUPS.classify(rank)
}

/// Built-in table by name.
pub fn builtin_table(name: &str) -> Option<&'static ClassificationTable> {
    match name {
        "restriction" => Some(restriction_groups()),
        "shortage" => Some(shortage_groups()),
        _ => None,
    }
}

//! Normalization of an entity collection into buckets.
//!
//! The pipeline has two phases separated by a single barrier:
//!
//! 1. **Gather**: min/max for every requested field across all entities.
//! 2. **Apply**: each entity's targeted fields are replaced by a bucket, or by
//!    `null` when the raw value is missing, non-numeric, or unclassifiable.
//!
//! Fields are independent during gather and entities are independent during
//! apply, so both phases run on rayon's pool for large collections.
//!
//! Normalization is a one-way transform. Feeding normalized output back in
//! re-reads buckets as raw values and classifies them again.

pub mod plan;

pub use plan::{FieldRule, NormalizationPlan};

use rayon::prelude::*;
use tracing::{debug, debug_span};

use crate::core::{
    flatten_entities, EntityMap, EntityRecord, NormalizedMap, NormalizedRecord, NormalizedValue,
};
use crate::stats::{FieldStats, FieldStatsMap};

/// Applies a [`NormalizationPlan`] to entity collections.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    plan: NormalizationPlan,
}

impl Normalizer {
    pub fn new(plan: NormalizationPlan) -> Self {
        Self { plan }
    }

    /// Normalizer with the rank-groups preset.
    pub fn rank_groups() -> Self {
        Self::new(NormalizationPlan::rank_groups())
    }

    pub fn plan(&self) -> &NormalizationPlan {
        &self.plan
    }

    /// Stats for `fields` across all entities, identifiers injected.
    pub fn gather<S>(&self, entities: &EntityMap, fields: &[S]) -> FieldStatsMap
    where
        S: AsRef<str> + Sync,
    {
        let tagged = flatten_entities(entities, self.plan.id_field());
        let fields: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();
        self.gather_phase(&tagged, &fields)
    }

    /// Normalize `fields` of every entity.
    ///
    /// The output has exactly the keys of `entities`. Each record starts as a
    /// copy of the input record plus the injected identifier.
    pub fn normalize<S>(&self, entities: &EntityMap, fields: &[S]) -> NormalizedMap
    where
        S: AsRef<str> + Sync,
    {
        let _span = debug_span!(
            "normalize",
            entities = entities.len(),
            fields = fields.len()
        )
        .entered();

        let tagged = flatten_entities(entities, self.plan.id_field());
        let fields: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();

        let stats = self.gather_phase(&tagged, &fields);
        for (field, field_stats) in &stats {
            if !field_stats.has_data() {
                debug!(field = %field, "no valid values; field normalizes to null");
            }
        }

        let rules: Vec<(&str, FieldRule, FieldStats)> = fields
            .iter()
            .map(|field| {
                let field_stats = stats.get(*field).copied().unwrap_or_default();
                (*field, self.plan.rule_for(field), field_stats)
            })
            .collect();

        let _apply = debug_span!("apply").entered();
        if self.plan.parallel().should_parallelize(tagged.len()) {
            tagged
                .par_iter()
                .map(|(id, record)| (id.clone(), normalize_record(record, &rules)))
                .collect()
        } else {
            tagged
                .iter()
                .map(|(id, record)| (id.clone(), normalize_record(record, &rules)))
                .collect()
        }
    }

    fn gather_phase(&self, tagged: &[(String, EntityRecord)], fields: &[&str]) -> FieldStatsMap {
        let _span = debug_span!("gather", fields = fields.len()).entered();
        let gather_field = |field: &&str| {
            let records = tagged.iter().map(|(_, record)| record);
            (field.to_string(), FieldStats::gather(records, field))
        };

        if self.plan.parallel().should_parallelize(tagged.len()) {
            fields.par_iter().map(gather_field).collect()
        } else {
            fields.iter().map(gather_field).collect()
        }
    }
}

/// Copy `record` and replace each ruled field with its bucket or `null`.
fn normalize_record(record: &EntityRecord, rules: &[(&str, FieldRule, FieldStats)]) -> NormalizedRecord {
    let mut normalized = NormalizedRecord::from_raw(record);
    for (field, rule, stats) in rules {
        let bucket = record
            .number(field)
            .and_then(|value| rule.bucket(value, stats));
        normalized.set(*field, NormalizedValue::from(bucket));
    }
    normalized
}

/// Normalize `fields` of `entities` with the rank-groups preset.
///
/// `access_rank` and `needs_rank` go through the restriction and shortage
/// tables; every other field is scaled into `3..=6` against its observed
/// range. Missing and non-numeric values become `null`.
///
/// # Example
///
/// ```rust
/// use bucketmap::core::{EntityMap, EntityRecord};
/// use bucketmap::create_normalized_object;
///
/// let mut entities = EntityMap::new();
/// entities.insert("US".into(), [("access_rank", 15_i64), ("gdp", 20000)].into_iter().collect());
/// entities.insert("CA".into(), [("access_rank", 25_i64), ("gdp", 1800)].into_iter().collect());
///
/// let normalized = create_normalized_object(&entities, &["access_rank", "gdp"]);
/// assert_eq!(normalized["US"].bucket("access_rank"), Some(1));
/// assert_eq!(normalized["CA"].bucket("access_rank"), Some(2));
/// assert_eq!(normalized["US"].bucket("gdp"), Some(6));
/// assert_eq!(normalized["CA"].bucket("gdp"), Some(3));
/// ```
pub fn create_normalized_object<S>(entities: &EntityMap, fields: &[S]) -> NormalizedMap
where
    S: AsRef<str> + Sync,
{
    Normalizer::rank_groups().normalize(entities, fields)
}

//! Entity records and their normalized counterparts.

use super::value::RawValue;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Named raw attributes for one identified entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord {
    fields: BTreeMap<String, RawValue>,
}

impl EntityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field. `None` is the "undefined" case.
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.fields.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, RawValue> {
        self.fields.iter()
    }

    /// Numeric value of a field, or `None` when it is absent, missing, or
    /// not a number.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(RawValue::valid_number)
    }

    /// Copy of this record with the identifier injected under `id_field`.
    ///
    /// The record's own fields are applied last, so a record that already
    /// carries `id_field` keeps its own value.
    pub fn tagged(&self, id_field: &str, id: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(id_field.to_string(), RawValue::from(id));
        fields.extend(self.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for EntityRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EntityRecord {
    type Item = (&'a String, &'a RawValue);
    type IntoIter = btree_map::Iter<'a, String, RawValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Entities keyed by identifier (e.g. ISO country code).
pub type EntityMap = BTreeMap<String, EntityRecord>;

/// Flatten an entity map into records tagged with their identifier.
pub fn flatten_entities(entities: &EntityMap, id_field: &str) -> Vec<(String, EntityRecord)> {
    entities
        .iter()
        .map(|(id, record)| (id.clone(), record.tagged(id_field, id)))
        .collect()
}

/// A field value after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedValue {
    /// Discrete bucket derived from the raw value
    Bucket(i64),
    /// Targeted field whose raw value was missing, non-numeric, or
    /// outside every classification range. Serializes as `null`.
    Missing,
    /// Untargeted field copied from the input
    Raw(RawValue),
}

impl NormalizedValue {
    pub fn bucket(&self) -> Option<i64> {
        match self {
            Self::Bucket(bucket) => Some(*bucket),
            _ => None,
        }
    }
}

impl From<Option<i64>> for NormalizedValue {
    fn from(bucket: Option<i64>) -> Self {
        bucket.map_or(Self::Missing, Self::Bucket)
    }
}

/// Shallow copy of an entity record with targeted fields replaced by buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedRecord {
    fields: BTreeMap<String, NormalizedValue>,
}

impl NormalizedRecord {
    /// Start from a pass-through copy of every field in `record`.
    pub fn from_raw(record: &EntityRecord) -> Self {
        Self {
            fields: record
                .iter()
                .map(|(k, v)| (k.clone(), NormalizedValue::Raw(v.clone())))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&NormalizedValue> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: NormalizedValue) {
        self.fields.insert(field.into(), value);
    }

    /// Bucket assigned to `field`, if any.
    pub fn bucket(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(NormalizedValue::bucket)
    }

    /// True when `field` was targeted but produced no bucket.
    pub fn is_missing(&self, field: &str) -> bool {
        matches!(self.get(field), Some(NormalizedValue::Missing))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, NormalizedValue> {
        self.fields.iter()
    }
}

/// Normalized records keyed by the same identifiers as the input.
pub type NormalizedMap = BTreeMap<String, NormalizedRecord>;

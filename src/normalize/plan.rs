//! Resolved per-field policies.
//!
//! A [`NormalizationPlan`] is built once, from code or from a
//! [`BucketmapConfig`], and all table references are checked at that point.
//! Applying a plan to data cannot fail.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::buckets::{builtin_table, scale_value_to_bucket, ClassificationTable, ScaleRange};
use crate::config::{
    default_id_field, merge_preset_with_policies, BucketmapConfig, FieldPolicy, ParallelConfig,
    Preset,
};
use crate::errors::{Error, Result};
use crate::stats::FieldStats;

/// What happens to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    /// Look the raw value up in a fixed table
    Classify(Arc<ClassificationTable>),
    /// Scale the raw value against the field's observed range
    Scale(ScaleRange),
}

impl FieldRule {
    /// Bucket for a valid numeric `value`, given the field's stats.
    pub fn bucket(&self, value: f64, stats: &FieldStats) -> Option<i64> {
        match self {
            Self::Classify(table) => table.classify(value),
            Self::Scale(range) => Some(scale_value_to_bucket(value, stats.min, stats.max, *range)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NormalizationPlan {
    id_field: String,
    default_scale: ScaleRange,
    rules: BTreeMap<String, FieldRule>,
    tables: BTreeMap<String, Arc<ClassificationTable>>,
    parallel: ParallelConfig,
}

impl Default for NormalizationPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizationPlan {
    /// Every field scaled into `3..=6`, identifiers injected as `isoCode`.
    pub fn new() -> Self {
        Self {
            id_field: default_id_field(),
            default_scale: ScaleRange::GENERIC,
            rules: BTreeMap::new(),
            tables: BTreeMap::new(),
            parallel: ParallelConfig::default(),
        }
    }

    /// Plan with the rank-groups preset applied.
    pub fn rank_groups() -> Self {
        let mut plan = Self::new();
        for (field, policy) in Preset::RankGroups.policies() {
            let rule = plan.resolve(&policy);
            // Built-in tables always resolve.
            if let Ok(rule) = rule {
                plan.rules.insert(field, rule);
            }
        }
        plan
    }

    /// Build a plan from configuration, validating every table and reference.
    pub fn from_config(config: &BucketmapConfig) -> Result<Self> {
        let normalization = config.normalization();
        let mut plan = Self::new()
            .with_id_field(normalization.id_field.clone())
            .with_default_scale(normalization.default_scale)
            .with_parallel(config.parallel());

        for (name, ranges) in &config.tables {
            let table = ClassificationTable::new(name.clone(), ranges.clone())?;
            plan = plan.with_table(table)?;
        }

        let policies = merge_preset_with_policies(normalization.preset, &normalization.policies);
        for (field, policy) in policies {
            plan = plan.with_policy(field, policy)?;
        }
        Ok(plan)
    }

    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Range for fields without a policy, and for scale policies added after
    /// this call that do not name their own range.
    pub fn with_default_scale(mut self, range: ScaleRange) -> Self {
        self.default_scale = range;
        self
    }

    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Register a custom table. Built-in table names are reserved.
    pub fn with_table(mut self, table: ClassificationTable) -> Result<Self> {
        if builtin_table(table.name()).is_some() {
            return Err(Error::invalid_table(
                table.name(),
                "name is reserved for a built-in table",
            ));
        }
        self.tables
            .insert(table.name().to_string(), Arc::new(table));
        Ok(self)
    }

    /// Set the policy for one field.
    pub fn with_policy(mut self, field: impl Into<String>, policy: FieldPolicy) -> Result<Self> {
        let rule = self.resolve(&policy)?;
        self.rules.insert(field.into(), rule);
        Ok(self)
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn default_scale(&self) -> ScaleRange {
        self.default_scale
    }

    pub fn parallel(&self) -> &ParallelConfig {
        &self.parallel
    }

    /// Rule for `field`; fields without a policy scale into the default range.
    pub fn rule_for(&self, field: &str) -> FieldRule {
        self.rules
            .get(field)
            .cloned()
            .unwrap_or(FieldRule::Scale(self.default_scale))
    }

    /// Table registered or built in under `name`.
    pub fn table(&self, name: &str) -> Option<Arc<ClassificationTable>> {
        self.tables
            .get(name)
            .cloned()
            .or_else(|| builtin_table(name).map(|table| Arc::new(table.clone())))
    }

    fn resolve(&self, policy: &FieldPolicy) -> Result<FieldRule> {
        match policy {
            FieldPolicy::Scale { range } => {
                Ok(FieldRule::Scale(range.unwrap_or(self.default_scale)))
            }
            _ => {
                let name = policy.table_name().unwrap_or_default();
                self.table(name)
                    .map(FieldRule::Classify)
                    .ok_or_else(|| Error::UnknownTable(name.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::ClassRange;
    use crate::config::NormalizationConfig;

    fn risk_table() -> ClassificationTable {
        ClassificationTable::new(
            "risk",
            vec![ClassRange::new(1.0, 10.0, 1), ClassRange::new(11.0, 20.0, 2)],
        )
        .unwrap()
    }

    #[test]
    fn test_new_plan_scales_everything_into_generic_range() {
        let plan = NormalizationPlan::new();
        assert_eq!(plan.rule_for("access_rank"), FieldRule::Scale(ScaleRange::GENERIC));
        assert_eq!(plan.id_field(), "isoCode");
    }

    #[test]
    fn test_rank_groups_plan_classifies_rank_fields() {
        let plan = NormalizationPlan::rank_groups();
        match plan.rule_for("access_rank") {
            FieldRule::Classify(table) => assert_eq!(table.name(), "restriction"),
            other => panic!("unexpected rule {other:?}"),
        }
        match plan.rule_for("needs_rank") {
            FieldRule::Classify(table) => assert_eq!(table.name(), "shortage"),
            other => panic!("unexpected rule {other:?}"),
        }
        assert_eq!(plan.rule_for("gdp"), FieldRule::Scale(ScaleRange::GENERIC));
    }

    #[test]
    fn test_custom_table_policy() {
        let plan = NormalizationPlan::new()
            .with_table(risk_table())
            .unwrap()
            .with_policy("risk", FieldPolicy::classify("risk"))
            .unwrap();
        let rule = plan.rule_for("risk");
        assert_eq!(rule.bucket(15.0, &FieldStats::EMPTY), Some(2));
        assert_eq!(rule.bucket(25.0, &FieldStats::EMPTY), None);
    }

    #[test]
    fn test_unknown_table_rejected() {
        let result = NormalizationPlan::new().with_policy("risk", FieldPolicy::classify("risk"));
        assert!(matches!(result, Err(Error::UnknownTable(name)) if name == "risk"));
    }

    #[test]
    fn test_reserved_table_name_rejected() {
        let table = ClassificationTable::new("shortage", vec![ClassRange::new(1.0, 2.0, 1)]).unwrap();
        assert!(NormalizationPlan::new().with_table(table).is_err());
    }

    #[test]
    fn test_scale_policy_uses_default_scale_when_unset() {
        let range = ScaleRange::new(0, 9).unwrap();
        let plan = NormalizationPlan::new()
            .with_default_scale(range)
            .with_policy("gdp", FieldPolicy::scale())
            .unwrap();
        assert_eq!(plan.rule_for("gdp"), FieldRule::Scale(range));
    }

    #[test]
    fn test_from_config_merges_preset_and_policies() {
        let config = BucketmapConfig {
            normalization: Some(NormalizationConfig {
                id_field: "code".to_string(),
                policies: BTreeMap::from([
                    ("risk".to_string(), FieldPolicy::classify("risk")),
                    (
                        "access_rank".to_string(),
                        FieldPolicy::scale_into(ScaleRange::DEFAULT),
                    ),
                ]),
                ..Default::default()
            }),
            tables: BTreeMap::from([("risk".to_string(), risk_table().ranges().to_vec())]),
            parallel: None,
        };
        let plan = NormalizationPlan::from_config(&config).unwrap();

        assert_eq!(plan.id_field(), "code");
        assert_eq!(plan.rule_for("access_rank"), FieldRule::Scale(ScaleRange::DEFAULT));
        assert!(matches!(plan.rule_for("needs_rank"), FieldRule::Classify(_)));
        assert!(matches!(plan.rule_for("risk"), FieldRule::Classify(_)));
    }

    #[test]
    fn test_from_config_with_none_preset() {
        let config = BucketmapConfig {
            normalization: Some(NormalizationConfig {
                preset: Preset::None,
                ..Default::default()
            }),
            ..Default::default()
        };
        let plan = NormalizationPlan::from_config(&config).unwrap();
        assert_eq!(plan.rule_for("access_rank"), FieldRule::Scale(ScaleRange::GENERIC));
    }

    #[test]
    fn test_from_config_reports_unknown_table() {
        let config = BucketmapConfig {
            normalization: Some(NormalizationConfig {
                policies: BTreeMap::from([("risk".to_string(), FieldPolicy::classify("nope"))]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = NormalizationPlan::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::UnknownTable(name) if name == "nope"));
    }
}

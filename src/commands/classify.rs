use anyhow::Result;
use serde::Serialize;

use crate::config::BucketmapConfig;
use crate::normalize::NormalizationPlan;

/// One rank and the group it falls into
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankClassification {
    pub rank: f64,
    pub bucket: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Classify `ranks` against the named table (built-in or from config).
pub fn classify_ranks(
    config: &BucketmapConfig,
    table: &str,
    ranks: &[f64],
) -> Result<Vec<RankClassification>> {
    let plan = NormalizationPlan::from_config(config)?;
    let table = plan
        .table(table)
        .ok_or_else(|| anyhow::anyhow!("Unknown classification table '{}'", table))?;

    Ok(ranks
        .iter()
        .map(|&rank| RankClassification {
            rank,
            bucket: table.classify(rank),
            label: table.label_for(rank).map(str::to_string),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::ClassRange;
    use std::collections::BTreeMap;

    #[test]
    fn test_classify_builtin_table() {
        let results =
            classify_ranks(&BucketmapConfig::default(), "restriction", &[10.0, 40.0, 0.0]).unwrap();
        assert_eq!(results[0].bucket, Some(1));
        assert_eq!(results[0].label.as_deref(), Some("Extreme"));
        assert_eq!(results[1].bucket, Some(3));
        assert_eq!(results[2].bucket, None);
        assert_eq!(results[2].label, None);
    }

    #[test]
    fn test_classify_config_table() {
        let config = BucketmapConfig {
            tables: BTreeMap::from([(
                "tiers".to_string(),
                vec![ClassRange::labeled(1.0, 5.0, 7, "Top")],
            )]),
            ..Default::default()
        };
        let results = classify_ranks(&config, "tiers", &[3.0]).unwrap();
        assert_eq!(results[0].bucket, Some(7));
        assert_eq!(results[0].label.as_deref(), Some("Top"));
    }

    #[test]
    fn test_classify_unknown_table() {
        assert!(classify_ranks(&BucketmapConfig::default(), "nope", &[1.0]).is_err());
    }
}

// Export modules for library usage
pub mod buckets;
pub mod cli;
pub mod color;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod normalize;
pub mod observability;
pub mod stats;

// Re-export commonly used types
pub use crate::core::{
    EntityMap, EntityRecord, NormalizedMap, NormalizedRecord, NormalizedValue, RawValue,
};

pub use crate::buckets::{
    restriction_group, restriction_groups, scale_value_to_bucket, shortage_group,
    shortage_groups, ClassRange, ClassificationTable, ScaleRange,
};

pub use crate::stats::{gather_stats, gather_stats_parallel, FieldStats, FieldStatsMap};

pub use crate::normalize::{create_normalized_object, FieldRule, NormalizationPlan, Normalizer};

pub use crate::config::{BucketmapConfig, FieldPolicy, ParallelConfig, Preset};

pub use crate::errors::{Error, Result};

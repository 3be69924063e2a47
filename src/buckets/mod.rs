//! Turning raw numbers into discrete buckets.
//!
//! Two strategies: data-driven linear [`scaling`], and fixed
//! [`classification`] tables that ignore the observed distribution.

pub mod classification;
pub mod scaling;

pub use classification::{
    builtin_table, restriction_group, restriction_groups, shortage_group, shortage_groups,
    ClassRange, ClassificationTable,
};
pub use scaling::{round_half_up, scale_value_to_bucket, ScaleRange};

//! Linear scaling of raw values into integer buckets.
//!
//! A value's position inside the observed `[min, max]` of its field is mapped
//! linearly onto a [`ScaleRange`] and rounded to the nearest bucket. Values at
//! or beyond the observed bounds clamp to the range endpoints, and a field
//! with no variation maps everything to the middle bucket.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Inclusive integer range of buckets, e.g. `3..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[i64; 2]", into = "[i64; 2]")]
pub struct ScaleRange {
    min: i64,
    max: i64,
}

impl ScaleRange {
    /// `1..=11`, the scaler's own default.
    pub const DEFAULT: ScaleRange = ScaleRange { min: 1, max: 11 };

    /// `3..=6`, the sub-range generic fields are normalized into.
    pub const GENERIC: ScaleRange = ScaleRange { min: 3, max: 6 };

    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidScaleRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Middle bucket, rounded half-up.
    pub fn midpoint(&self) -> i64 {
        let mid = round_half_up((self.min as f64 + self.max as f64) / 2.0) as i64;
        mid.clamp(self.min, self.max)
    }

    pub fn contains(&self, bucket: i64) -> bool {
        (self.min..=self.max).contains(&bucket)
    }
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<[i64; 2]> for ScaleRange {
    type Error = Error;

    fn try_from([min, max]: [i64; 2]) -> std::result::Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<ScaleRange> for [i64; 2] {
    fn from(range: ScaleRange) -> Self {
        [range.min, range.max]
    }
}

/// Round to the nearest integer, with exact halves going toward +inf.
///
/// `2.5 -> 3`, `-2.5 -> -2`. This is the rounding rule for every bucket.
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Map `value` into `range` given the field's observed `min` and `max`.
///
/// - `min == max`: the range midpoint.
/// - `value <= min`: `range.min()`; `value >= max`: `range.max()`.
/// - otherwise linear interpolation, rounded half-up.
///
/// The result is always inside `range`. When `min`/`max` are the `+inf`/`-inf`
/// sentinels of a field without data, every finite value takes the
/// `value <= min` branch and lands on `range.min()`.
pub fn scale_value_to_bucket(value: f64, min: f64, max: f64, range: ScaleRange) -> i64 {
    if min == max {
        return range.midpoint();
    }
    if value <= min {
        return range.min;
    }
    if value >= max {
        return range.max;
    }

    let ratio = (value - min) / (max - min);
    // i64 subtraction overflows for ranges wider than i64::MAX.
    let span = range.max as f64 - range.min as f64;
    let scaled = round_half_up(range.min as f64 + ratio * span);

    // NaN casts to 0 and infinities saturate; the clamp keeps both in range.
    (scaled as i64).clamp(range.min, range.max)
}

//! Color helpers used alongside normalization.
//!
//! Buckets become colors in the rendering layer; these helpers cover the
//! reverse direction (reading a rendered fill back) and canonicalizing color
//! strings. All of them degrade to [`DEFAULT_COLOR`] instead of failing.

pub mod format;
pub mod lookup;

pub use format::{canonical_hex, default_color, is_valid_color, rgb_to_hex, DEFAULT_COLOR};
pub use lookup::{entity_color, lookup_error, FillSource, StaticFills};

//! Reading an entity's rendered fill from a drawing surface.
//!
//! The surface itself (an SVG document, a canvas scene graph, a test double)
//! lives outside this crate behind [`FillSource`]. [`entity_color`] never
//! fails: every problem degrades to [`DEFAULT_COLOR`].

use std::collections::BTreeMap;

use super::format::{canonical_hex, rgb_to_hex, DEFAULT_COLOR};
use crate::errors::{Error, Result};

/// A rendering surface that can report the computed fill of an entity's
/// visual element.
pub trait FillSource {
    /// Computed fill of the element drawn for `entity_id`.
    ///
    /// `Ok(None)` means the surface has no element for that entity.
    fn computed_fill(&self, entity_id: &str) -> Result<Option<String>>;
}

/// Fills held in memory, keyed by entity id.
#[derive(Debug, Clone, Default)]
pub struct StaticFills {
    fills: BTreeMap<String, String>,
}

impl StaticFills {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, entity_id: impl Into<String>, fill: impl Into<String>) -> Self {
        self.fills.insert(entity_id.into(), fill.into());
        self
    }
}

impl FillSource for StaticFills {
    fn computed_fill(&self, entity_id: &str) -> Result<Option<String>> {
        Ok(self.fills.get(entity_id).cloned())
    }
}

/// Hex fill of the element drawn for `entity_id`, or [`DEFAULT_COLOR`].
pub fn entity_color(entity_id: &str, source: Option<&dyn FillSource>) -> String {
    let Some(source) = source.filter(|_| !entity_id.is_empty()) else {
        return DEFAULT_COLOR.to_string();
    };

    match source.computed_fill(entity_id) {
        Ok(Some(fill)) => canonical_hex(Some(&rgb_to_hex(fill.trim()))),
        Ok(None) => DEFAULT_COLOR.to_string(),
        Err(e) => {
            tracing::warn!(entity = entity_id, "Failed to get color: {}", e);
            DEFAULT_COLOR.to_string()
        }
    }
}

/// Build a lookup error for `entity_id`, for [`FillSource`] implementors.
pub fn lookup_error(entity_id: &str, message: impl Into<String>) -> Error {
    Error::Lookup {
        entity: entity_id.to_string(),
        message: message.into(),
    }
}

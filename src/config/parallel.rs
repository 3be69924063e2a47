//! Parallelism configuration for normalization runs.
//!
//! Stats are gathered per field and records normalized per entity; both
//! phases can run on rayon's pool once a collection is large enough to be
//! worth the scheduling overhead.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

/// Default entity count below which work stays on the calling thread
fn default_min_entities() -> usize {
    256
}

/// Configuration for parallel processing.
///
/// # Example
///
/// ```rust
/// use bucketmap::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     min_entities: 1000,
/// };
/// assert!(!config.should_parallelize(200));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Enable parallel processing (default: true)
    ///
    /// When disabled, everything runs sequentially.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Minimum number of entities before going parallel (default: 256)
    #[serde(default = "default_min_entities")]
    pub min_entities: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_entities: default_min_entities(),
        }
    }
}

impl ParallelConfig {
    /// Create a new parallel config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Whether a collection of `entity_count` entities goes to the pool.
    pub fn should_parallelize(&self, entity_count: usize) -> bool {
        self.enabled && entity_count >= self.min_entities
    }
}

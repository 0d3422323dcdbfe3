//! Tunables for predicate construction and batch allocation.

use serde::{Deserialize, Serialize};

/// Default number of rows per batch.
pub const DEFAULT_BATCH_CAPACITY: usize = 1024;

/// Largest batch a `u16` selection vector can address.
pub const MAX_BATCH_CAPACITY: usize = u16::MAX as usize + 1;

/// Sets with at most this many distinct keys are probed linearly.
pub const DEFAULT_LINEAR_SCAN_THRESHOLD: usize = 8;

/// Configuration shared by predicate builders and batch constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredicateConfig {
    /// Distinct-key count at or below which a membership set uses a flat slice.
    pub linear_scan_threshold: usize,
    /// Row capacity for batches created with [`crate::RowBatch::with_config`].
    pub batch_capacity: usize,
}

impl Default for PredicateConfig {
    fn default() -> Self {
        Self {
            linear_scan_threshold: DEFAULT_LINEAR_SCAN_THRESHOLD,
            batch_capacity: DEFAULT_BATCH_CAPACITY,
        }
    }
}

impl PredicateConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the linear-scan threshold. Zero forces hashed sets.
    #[must_use]
    pub fn with_linear_scan_threshold(mut self, threshold: usize) -> Self {
        self.linear_scan_threshold = threshold;
        self
    }

    /// Sets the default batch capacity.
    #[must_use]
    pub fn with_batch_capacity(mut self, capacity: usize) -> Self {
        self.batch_capacity = capacity;
        self
    }
}

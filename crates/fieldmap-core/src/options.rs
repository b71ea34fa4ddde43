//! Configuration options for batch mapping.

use serde::{Deserialize, Serialize};

use crate::mapper::Strategy;

/// Options controlling [`map_batch`](crate::batch::map_batch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Strategy used for every record in the batch.
    pub strategy: Strategy,

    /// End the batch at the first record that fails to map.
    /// Default: false (failed records are collected and skipped).
    pub stop_on_first_failure: bool,

    /// End the batch once this many records have failed.
    /// Default: no limit.
    pub max_failures: Option<usize>,
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_stop_on_first_failure(mut self, enable: bool) -> Self {
        self.stop_on_first_failure = enable;
        self
    }

    pub fn with_max_failures(mut self, limit: usize) -> Self {
        self.max_failures = Some(limit);
        self
    }

    /// Whether a batch with `failures` failed records so far must stop.
    pub(crate) fn should_stop(&self, failures: usize) -> bool {
        (self.stop_on_first_failure && failures > 0)
            || self.max_failures.is_some_and(|limit| failures >= limit)
    }
}

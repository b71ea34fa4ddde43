//! Batch import: map many records, keep going past failures.

use std::time::Instant;

use tracing::{info, info_span, warn};

use crate::error::MappingError;
use crate::mapper::{Mappable, map};
use crate::options::BatchOptions;
use crate::record::Record;

/// A record that could not be mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Zero-based position of the record in the input.
    pub index: usize,
    pub error: MappingError,
}

/// Result of [`map_batch`].
#[derive(Debug, Clone)]
pub struct BatchOutcome<T> {
    pub mapped: Vec<T>,
    pub failures: Vec<RecordFailure>,
    /// The batch ended before the last record.
    pub stopped_early: bool,
}

impl<T> BatchOutcome<T> {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn processed(&self) -> usize {
        self.mapped.len() + self.failures.len()
    }
}

/// Maps each record to a `T`, collecting failures instead of returning the
/// first one. Failed records are logged with their index, field and reason;
/// raw values are left out of the log.
pub fn map_batch<'a, T, I>(records: I, options: &BatchOptions) -> BatchOutcome<T>
where
    T: Mappable,
    I: IntoIterator<Item = &'a Record>,
{
    let span = info_span!("map_batch", target_type = T::TYPE_NAME, strategy = %options.strategy);
    let _guard = span.enter();
    let start = Instant::now();

    let mut records = records.into_iter();
    let mut outcome = BatchOutcome {
        mapped: Vec::with_capacity(records.size_hint().0),
        failures: Vec::new(),
        stopped_early: false,
    };

    for (index, record) in records.by_ref().enumerate() {
        match map::<T>(options.strategy, record) {
            Ok(instance) => outcome.mapped.push(instance),
            Err(error) => {
                warn!(
                    index,
                    field = %error.field,
                    reason = error.kind.reason(),
                    "record skipped"
                );
                outcome.failures.push(RecordFailure { index, error });
                if options.should_stop(outcome.failures.len()) {
                    break;
                }
            }
        }
    }
    outcome.stopped_early = records.next().is_some();

    info!(
        mapped = outcome.mapped.len(),
        failed = outcome.failures.len(),
        stopped_early = outcome.stopped_early,
        duration_ms = start.elapsed().as_millis(),
        "batch complete"
    );
    outcome
}

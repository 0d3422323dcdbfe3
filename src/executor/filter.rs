//! Conjunctive filter over row batches.

use rayon::prelude::*;

use crate::executor::vectorized::RowBatch;
use crate::observability::log_trace;
use crate::predicate::ColumnPredicate;

/// A conjunction of column predicates applied in order.
///
/// Every predicate runs on every batch; an emptied batch is not
/// short-circuited. The filter holds only immutable state and can be shared
/// across threads.
#[derive(Debug, Default)]
pub struct BatchFilter {
    predicates: Vec<Box<dyn ColumnPredicate>>,
}

impl BatchFilter {
    /// Creates a filter from predicates evaluated left to right.
    #[must_use]
    pub fn new(predicates: Vec<Box<dyn ColumnPredicate>>) -> Self {
        BatchFilter { predicates }
    }

    /// Appends a predicate.
    #[must_use]
    pub fn with_predicate(mut self, predicate: Box<dyn ColumnPredicate>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Returns the predicates in evaluation order.
    #[must_use]
    pub fn predicates(&self) -> &[Box<dyn ColumnPredicate>] {
        &self.predicates
    }

    /// Filters one batch in place.
    ///
    /// # Panics
    ///
    /// Panics if a predicate does not fit the batch layout.
    pub fn apply(&self, batch: &mut RowBatch<'_>) {
        let rows_in = batch.size();
        for predicate in &self.predicates {
            predicate.evaluate(batch);
        }
        log_trace!(
            event = "batch_filtered",
            predicates = self.predicates.len(),
            rows_in,
            rows_out = batch.size(),
        );
    }

    /// Filters independent batches in parallel.
    ///
    /// # Panics
    ///
    /// Panics if a predicate does not fit a batch layout.
    pub fn apply_all(&self, batches: &mut [RowBatch<'_>]) {
        batches.par_iter_mut().for_each(|batch| self.apply(batch));
    }
}

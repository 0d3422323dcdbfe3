//! `IN` and `NOT IN` list predicates.

use crate::executor::vectorized::RowBatch;

use super::member::MemberType;
use super::membership::MembershipSet;
use super::{typed_values, ColumnPredicate, PredicateKind};

/// Keeps non-null rows whose value is a member of a literal set.
#[derive(Debug, Clone)]
pub struct InListPredicate<T: MemberType> {
    column_id: u32,
    values: MembershipSet<T>,
}

impl<T: MemberType> InListPredicate<T> {
    /// Binds `values` to column `column_id`.
    #[must_use]
    pub fn new(column_id: u32, values: MembershipSet<T>) -> Self {
        InListPredicate { column_id, values }
    }

    /// Returns the literal set.
    #[must_use]
    pub fn values(&self) -> &MembershipSet<T> {
        &self.values
    }
}

impl<T: MemberType> ColumnPredicate for InListPredicate<T> {
    fn kind(&self) -> PredicateKind {
        PredicateKind::InList
    }

    fn column_id(&self) -> u32 {
        self.column_id
    }

    fn evaluate(&self, batch: &mut RowBatch<'_>) {
        let (column, mut selection) = batch.column_with_selection(self.column_id as usize);
        let data = typed_values::<T>(column, self.column_id);
        match column.null_mask() {
            None => selection.retain(|row| self.values.contains(data[row])),
            Some(is_null) => {
                selection.retain(|row| !is_null[row] && self.values.contains(data[row]));
            }
        }
    }
}

/// Keeps non-null rows whose value is not a member of a literal set.
#[derive(Debug, Clone)]
pub struct NotInListPredicate<T: MemberType> {
    column_id: u32,
    values: MembershipSet<T>,
}

impl<T: MemberType> NotInListPredicate<T> {
    /// Binds `values` to column `column_id`.
    #[must_use]
    pub fn new(column_id: u32, values: MembershipSet<T>) -> Self {
        NotInListPredicate { column_id, values }
    }

    /// Returns the literal set.
    #[must_use]
    pub fn values(&self) -> &MembershipSet<T> {
        &self.values
    }
}

impl<T: MemberType> ColumnPredicate for NotInListPredicate<T> {
    fn kind(&self) -> PredicateKind {
        PredicateKind::NotInList
    }

    fn column_id(&self) -> u32 {
        self.column_id
    }

    fn evaluate(&self, batch: &mut RowBatch<'_>) {
        let (column, mut selection) = batch.column_with_selection(self.column_id as usize);
        let data = typed_values::<T>(column, self.column_id);
        match column.null_mask() {
            None => selection.retain(|row| !self.values.contains(data[row])),
            Some(is_null) => {
                selection.retain(|row| !is_null[row] && !self.values.contains(data[row]));
            }
        }
    }
}

//! Vectorized column predicates.
//!
//! A [`ColumnPredicate`] binds one column of a [`RowBatch`] and filters the
//! batch in place. Every predicate shares the same contract:
//!
//! - the surviving rows are a subsequence of the incoming logical rows, in
//!   their original order, so the selection vector stays strictly increasing;
//! - a null row never survives, except under [`NullPredicate`] with
//!   `IS NULL`;
//! - after evaluation the selection vector is in use, even if every row
//!   survived;
//! - nothing is allocated and nothing is logged.
//!
//! Evaluation has no error channel. Binding a predicate to a column of the
//! wrong type, or to a column index the batch does not have, panics.

mod builder;
mod comparison;
mod in_list;
mod member;
mod membership;
mod null;

use std::fmt;

use crate::executor::vectorized::{ColumnVector, RowBatch};

pub use builder::{
    make_in_list_predicate, make_not_in_list_predicate, ParseLiteral, PredicateBuilder,
};
pub use comparison::{CompareOp, ComparisonPredicate};
pub use in_list::{InListPredicate, NotInListPredicate};
pub use member::MemberType;
pub use membership::MembershipSet;
pub use null::NullPredicate;

/// Variant tag of a [`ColumnPredicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    InList,
    NotInList,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    IsNull,
    IsNotNull,
}

impl PredicateKind {
    /// Returns the SQL spelling of the predicate.
    #[must_use]
    pub fn sql(self) -> &'static str {
        match self {
            PredicateKind::InList => "IN",
            PredicateKind::NotInList => "NOT IN",
            PredicateKind::Eq => "=",
            PredicateKind::Ne => "<>",
            PredicateKind::Lt => "<",
            PredicateKind::Le => "<=",
            PredicateKind::Gt => ">",
            PredicateKind::Ge => ">=",
            PredicateKind::IsNull => "IS NULL",
            PredicateKind::IsNotNull => "IS NOT NULL",
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

/// A filter over one column of a row batch.
pub trait ColumnPredicate: Send + Sync + fmt::Debug {
    /// Returns which predicate this is.
    fn kind(&self) -> PredicateKind;

    /// Returns the index of the column the predicate reads.
    fn column_id(&self) -> u32;

    /// Filters `batch` in place.
    ///
    /// # Panics
    ///
    /// Panics if the column index is out of range for `batch`, or if the
    /// column's storage does not match the predicate's value type.
    fn evaluate(&self, batch: &mut RowBatch<'_>);
}

/// Borrows a column buffer as `T` elements.
///
/// # Panics
///
/// Panics if the column does not store `T` values.
pub(crate) fn typed_values<'b, 'a, T: MemberType>(
    column: &'b ColumnVector<'a>,
    column_id: u32,
) -> &'b [T::Elem<'a>] {
    T::column_values(column.data()).unwrap_or_else(|| {
        panic!(
            "column {column_id} of type {} stores {} values, predicate expects {}",
            column.field_type(),
            column.data().storage_name(),
            T::FIELD_TYPES
                .iter()
                .map(|ty| ty.name())
                .collect::<Vec<_>>()
                .join("/"),
        )
    })
}

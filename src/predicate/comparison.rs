//! Single-literal comparison predicates.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{PredicateError, Result};
use crate::executor::vectorized::RowBatch;

use super::member::MemberType;
use super::{typed_values, ColumnPredicate, PredicateKind};

/// Binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Returns true if a row ordered `ord` against the literal passes.
    #[inline]
    #[must_use]
    pub fn accepts(self, ord: Ordering) -> bool {
        match self {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Ne => ord != Ordering::Equal,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Le => ord != Ordering::Greater,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Ge => ord != Ordering::Less,
        }
    }
}

impl From<CompareOp> for PredicateKind {
    fn from(op: CompareOp) -> Self {
        match op {
            CompareOp::Eq => PredicateKind::Eq,
            CompareOp::Ne => PredicateKind::Ne,
            CompareOp::Lt => PredicateKind::Lt,
            CompareOp::Le => PredicateKind::Le,
            CompareOp::Gt => PredicateKind::Gt,
            CompareOp::Ge => PredicateKind::Ge,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PredicateKind::from(*self).sql())
    }
}

/// Keeps non-null rows that compare to a literal as `op` requires.
///
/// Floats use the IEEE partial order, so a `NaN` row never passes, not even
/// `<>`.
pub struct ComparisonPredicate<T: MemberType> {
    column_id: u32,
    op: CompareOp,
    literal: T::Key,
}

impl<T: MemberType> ComparisonPredicate<T> {
    /// Binds `op literal` to column `column_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PredicateError::InvalidLiteral`] if `literal` is unordered
    /// (float `NaN`).
    pub fn new(column_id: u32, op: CompareOp, literal: T) -> Result<Self> {
        let literal = literal.into_key().ok_or_else(|| PredicateError::InvalidLiteral {
            field_type: T::FIELD_TYPES[0].name(),
            literal: "NaN".to_string(),
            reason: "comparison against NaN is always false".to_string(),
        })?;
        Ok(ComparisonPredicate {
            column_id,
            op,
            literal,
        })
    }

    /// Returns the comparison operator.
    #[must_use]
    pub fn op(&self) -> CompareOp {
        self.op
    }
}

impl<T: MemberType> fmt::Debug for ComparisonPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparisonPredicate")
            .field("column_id", &self.column_id)
            .field("op", &self.op)
            .field("literal", &self.literal)
            .finish()
    }
}

impl<T: MemberType> ColumnPredicate for ComparisonPredicate<T> {
    fn kind(&self) -> PredicateKind {
        self.op.into()
    }

    fn column_id(&self) -> u32 {
        self.column_id
    }

    fn evaluate(&self, batch: &mut RowBatch<'_>) {
        let (column, mut selection) = batch.column_with_selection(self.column_id as usize);
        let data = typed_values::<T>(column, self.column_id);
        let op = self.op;
        let literal = &self.literal;
        let passes = |row: usize| T::compare(data[row], literal).is_some_and(|ord| op.accepts(ord));
        match column.null_mask() {
            None => selection.retain(passes),
            Some(is_null) => selection.retain(|row| !is_null[row] && passes(row)),
        }
    }
}

//! `IS NULL` / `IS NOT NULL`.

use crate::executor::vectorized::RowBatch;

use super::{ColumnPredicate, PredicateKind};

/// Keeps rows by null status. Works on a column of any type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullPredicate {
    column_id: u32,
    is_null: bool,
}

impl NullPredicate {
    /// `IS NULL` on column `column_id`.
    #[must_use]
    pub fn is_null(column_id: u32) -> Self {
        NullPredicate {
            column_id,
            is_null: true,
        }
    }

    /// `IS NOT NULL` on column `column_id`.
    #[must_use]
    pub fn is_not_null(column_id: u32) -> Self {
        NullPredicate {
            column_id,
            is_null: false,
        }
    }
}

impl ColumnPredicate for NullPredicate {
    fn kind(&self) -> PredicateKind {
        if self.is_null {
            PredicateKind::IsNull
        } else {
            PredicateKind::IsNotNull
        }
    }

    fn column_id(&self) -> u32 {
        self.column_id
    }

    fn evaluate(&self, batch: &mut RowBatch<'_>) {
        let (column, mut selection) = batch.column_with_selection(self.column_id as usize);
        let wanted = self.is_null;
        match column.null_mask() {
            None => selection.retain(|_| !wanted),
            Some(is_null) => selection.retain(|row| is_null[row] == wanted),
        }
    }
}

//! Vectorized execution primitives.
//!
//! A [`RowBatch`] holds typed column buffers plus a selection vector that
//! predicates narrow in place.

mod arrow_import;
pub mod batch;
pub mod column;

pub use batch::{RowBatch, Selection};
pub use column::{ColumnData, ColumnVector};

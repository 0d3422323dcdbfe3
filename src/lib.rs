//! colfilter - vectorized column predicates for columnar scans
//!
//! Filters fixed-capacity row batches in place: each predicate narrows the
//! batch's selection vector, keeping row order and never allocating during
//! evaluation. The centerpiece is the `IN` list predicate, backed by an
//! immutable [`MembershipSet`] with O(1) expected lookups, alongside `NOT IN`,
//! comparison and null-test predicates that share the same batch contract.
//!
//! ```ignore
//! use colfilter::{make_in_list_predicate, FieldInfo, FieldType, RowBatch, Schema};
//!
//! let field = FieldInfo::new("id", FieldType::Int)?;
//! let schema = Schema::new(vec![field.clone()])?;
//! let mut batch = RowBatch::new(&schema, 1024)?;
//! // ... fill batch.column_mut(0) ...
//! let pred = make_in_list_predicate(&field, 0, &["4", "5", "6"])?;
//! pred.evaluate(&mut batch);
//! for row in batch.selected_rows() { /* ... */ }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub(crate) mod observability;
pub mod predicate;
pub mod types;

pub use catalog::{FieldInfo, Schema};
pub use config::PredicateConfig;
pub use error::{PredicateError, Result};
pub use executor::vectorized::{ColumnData, ColumnVector, RowBatch, Selection};
pub use executor::BatchFilter;
pub use predicate::{
    make_in_list_predicate, make_not_in_list_predicate, ColumnPredicate, CompareOp,
    ComparisonPredicate, InListPredicate, MemberType, MembershipSet, NotInListPredicate,
    NullPredicate, ParseLiteral, PredicateBuilder, PredicateKind,
};
pub use types::{
    decode_date, decode_datetime, encode_date, encode_datetime, Date24, Datetime64, Decimal12,
    FieldType, StrSlice,
};

//! Batch execution.
//!
//! [`vectorized`] holds the row batch and column containers predicates
//! operate on. [`BatchFilter`] applies a conjunction of predicates to one
//! batch or, in parallel, to many.

mod filter;
pub mod vectorized;

pub use filter::BatchFilter;

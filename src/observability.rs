//! Logging helpers for colfilter.
//!
//! All events go through `tracing` with target `"colfilter"` and carry an
//! `event` field. The crate never installs a subscriber; applications
//! configure one themselves.
//!
//! Predicate evaluation does not log. Events are emitted at construction
//! time and around whole-batch filter passes only.

/// Target for all colfilter log events.
pub(crate) const COLFILTER_TARGET: &str = "colfilter";

/// Debug-level event.
///
/// # Example
/// ```ignore
/// log_debug!(
///     event = "predicate_built",
///     column = column_id,
///     field_type = %field.field_type,
/// );
/// ```
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::COLFILTER_TARGET, $($field)*)
    };
}

/// Trace-level event.
macro_rules! log_trace {
    ($($field:tt)*) => {
        ::tracing::trace!(target: $crate::observability::COLFILTER_TARGET, $($field)*)
    };
}

/// Warn-level event.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::COLFILTER_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_trace;
pub(crate) use log_warn;

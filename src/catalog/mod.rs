//! Field and schema descriptors.

mod schema;

pub use schema::{FieldInfo, Schema};

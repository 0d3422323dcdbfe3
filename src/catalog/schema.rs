//! Field descriptors mapping column positions to value types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{PredicateError, Result};
use crate::types::FieldType;

/// Description of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Column name.
    pub name: String,
    /// Column value type.
    pub field_type: FieldType,
    /// Declared length for `CHAR(n)` / `VARCHAR(n)`; zero means unbounded.
    pub length: u32,
    /// Whether the column may hold nulls.
    pub is_nullable: bool,
    /// Whether the column is part of the sort key.
    pub is_key: bool,
    /// Stable identifier surviving renames.
    pub unique_id: u32,
}

impl FieldInfo {
    /// Creates a nullable, non-key field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field name is empty.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(PredicateError::SchemaError(
                "Field name cannot be empty".into(),
            ));
        }
        Ok(FieldInfo {
            name,
            field_type,
            length: 0,
            is_nullable: true,
            is_key: false,
            unique_id: 0,
        })
    }

    /// Sets the declared string length.
    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Sets nullability.
    #[must_use]
    pub fn with_nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = is_nullable;
        self
    }

    /// Marks the field as a key column.
    #[must_use]
    pub fn with_key(mut self, is_key: bool) -> Self {
        self.is_key = is_key;
        self
    }
}

/// Ordered set of fields; a field's position is its column index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldInfo>,
}

impl Schema {
    /// Creates a schema, assigning `unique_id` by position.
    ///
    /// # Errors
    ///
    /// Returns an error if two fields share a name.
    pub fn new(mut fields: Vec<FieldInfo>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (i, field) in fields.iter_mut().enumerate() {
            if !seen.insert(field.name.clone()) {
                return Err(PredicateError::SchemaError(format!(
                    "Duplicate field name '{}'",
                    field.name
                )));
            }
            field.unique_id = i as u32;
        }
        Ok(Schema { fields })
    }

    /// Returns the field at `index`.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    /// Returns the column index of the field called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns all fields in column order.
    #[must_use]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

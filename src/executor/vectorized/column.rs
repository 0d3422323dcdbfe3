//! Typed column buffers with a parallel null mask.

use crate::error::{PredicateError, Result};
use crate::types::{Date24, Datetime64, Decimal12, FieldType, StrSlice};

/// Value buffer of one column, one variant per storage type.
///
/// `CHAR` and `VARCHAR` share the `Str` variant; string bytes are borrowed
/// from memory that outlives the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData<'a> {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Int128(Vec<i128>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Decimal(Vec<Decimal12>),
    Date(Vec<Date24>),
    Datetime(Vec<Datetime64>),
    Str(Vec<StrSlice<'a>>),
}

impl<'a> ColumnData<'a> {
    /// Allocates a zeroed buffer of `len` values for `field_type`.
    #[must_use]
    pub fn zeroed(field_type: FieldType, len: usize) -> Self {
        match field_type {
            FieldType::Tinyint => ColumnData::Int8(vec![0; len]),
            FieldType::Smallint => ColumnData::Int16(vec![0; len]),
            FieldType::Int => ColumnData::Int32(vec![0; len]),
            FieldType::Bigint => ColumnData::Int64(vec![0; len]),
            FieldType::Largeint => ColumnData::Int128(vec![0; len]),
            FieldType::Float => ColumnData::Float32(vec![0.0; len]),
            FieldType::Double => ColumnData::Float64(vec![0.0; len]),
            FieldType::Decimal => ColumnData::Decimal(vec![Decimal12::default(); len]),
            FieldType::Date => ColumnData::Date(vec![Date24::default(); len]),
            FieldType::Datetime => ColumnData::Datetime(vec![Datetime64::default(); len]),
            FieldType::Char | FieldType::Varchar => {
                ColumnData::Str(vec![StrSlice::default(); len])
            }
        }
    }

    /// Returns the number of values in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int8(v) => v.len(),
            ColumnData::Int16(v) => v.len(),
            ColumnData::Int32(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::Int128(v) => v.len(),
            ColumnData::Float32(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
            ColumnData::Decimal(v) => v.len(),
            ColumnData::Date(v) => v.len(),
            ColumnData::Datetime(v) => v.len(),
            ColumnData::Str(v) => v.len(),
        }
    }

    /// Returns true if the buffer holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a short name of the storage variant, for error messages.
    #[must_use]
    pub fn storage_name(&self) -> &'static str {
        match self {
            ColumnData::Int8(_) => "Int8",
            ColumnData::Int16(_) => "Int16",
            ColumnData::Int32(_) => "Int32",
            ColumnData::Int64(_) => "Int64",
            ColumnData::Int128(_) => "Int128",
            ColumnData::Float32(_) => "Float32",
            ColumnData::Float64(_) => "Float64",
            ColumnData::Decimal(_) => "Decimal",
            ColumnData::Date(_) => "Date",
            ColumnData::Datetime(_) => "Datetime",
            ColumnData::Str(_) => "Str",
        }
    }

    /// Returns true if this buffer is the storage variant for `field_type`.
    #[must_use]
    pub fn stores(&self, field_type: FieldType) -> bool {
        matches!(
            (self, field_type),
            (ColumnData::Int8(_), FieldType::Tinyint)
                | (ColumnData::Int16(_), FieldType::Smallint)
                | (ColumnData::Int32(_), FieldType::Int)
                | (ColumnData::Int64(_), FieldType::Bigint)
                | (ColumnData::Int128(_), FieldType::Largeint)
                | (ColumnData::Float32(_), FieldType::Float)
                | (ColumnData::Float64(_), FieldType::Double)
                | (ColumnData::Decimal(_), FieldType::Decimal)
                | (ColumnData::Date(_), FieldType::Date)
                | (ColumnData::Datetime(_), FieldType::Datetime)
                | (ColumnData::Str(_), FieldType::Char | FieldType::Varchar)
        )
    }
}

/// One column of a [`super::RowBatch`].
///
/// `is_null` is always allocated at batch capacity; it is only consulted
/// when `no_nulls` is false.
#[derive(Debug, Clone)]
pub struct ColumnVector<'a> {
    field_type: FieldType,
    data: ColumnData<'a>,
    is_null: Vec<bool>,
    no_nulls: bool,
}

impl<'a> ColumnVector<'a> {
    /// Creates a zeroed, null-free column of `capacity` rows.
    #[must_use]
    pub fn new(field_type: FieldType, capacity: usize) -> Self {
        ColumnVector {
            field_type,
            data: ColumnData::zeroed(field_type, capacity),
            is_null: vec![false; capacity],
            no_nulls: true,
        }
    }

    /// Returns the column's value type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the number of rows the column can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.is_null.len()
    }

    /// Returns the value buffer.
    #[must_use]
    pub fn data(&self) -> &ColumnData<'a> {
        &self.data
    }

    /// Returns the value buffer for in-place updates.
    pub fn data_mut(&mut self) -> &mut ColumnData<'a> {
        &mut self.data
    }

    /// Replaces the value buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is not the storage variant of this column's
    /// type or its length differs from the column capacity.
    pub fn set_data(&mut self, data: ColumnData<'a>) -> Result<()> {
        if !data.stores(self.field_type) {
            return Err(PredicateError::TypeError {
                expected: self.field_type.name().to_string(),
                actual: data.storage_name().to_string(),
            });
        }
        if data.len() != self.capacity() {
            return Err(PredicateError::TypeError {
                expected: format!("{} values", self.capacity()),
                actual: format!("{} values", data.len()),
            });
        }
        self.data = data;
        Ok(())
    }

    /// Returns true if the null mask is to be ignored.
    #[must_use]
    pub fn no_nulls(&self) -> bool {
        self.no_nulls
    }

    /// Declares whether the column has nulls.
    pub fn set_no_nulls(&mut self, no_nulls: bool) {
        self.no_nulls = no_nulls;
    }

    /// Returns the raw null mask (`true` = null), regardless of `no_nulls`.
    #[must_use]
    pub fn is_null(&self) -> &[bool] {
        &self.is_null
    }

    /// Returns the raw null mask for in-place updates.
    pub fn is_null_mut(&mut self) -> &mut [bool] {
        &mut self.is_null
    }

    /// Returns the null mask when it is authoritative, `None` when `no_nulls`.
    #[must_use]
    pub fn null_mask(&self) -> Option<&[bool]> {
        if self.no_nulls {
            None
        } else {
            Some(&self.is_null)
        }
    }

    /// Returns true if `row` is null under the current `no_nulls` setting.
    #[must_use]
    pub fn is_null_at(&self, row: usize) -> bool {
        !self.no_nulls && self.is_null[row]
    }
}

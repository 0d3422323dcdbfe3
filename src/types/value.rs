//! `FieldType` definitions for colfilter.

use std::fmt;

use arrow::datatypes::{DataType as ArrowDataType, TimeUnit};
use serde::{Deserialize, Serialize};

use super::decimal::FRAC_DIGITS;

/// Column types a predicate can be built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// 8-bit signed integer.
    Tinyint,
    /// 16-bit signed integer.
    Smallint,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Bigint,
    /// 128-bit signed integer.
    Largeint,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// Fixed-point decimal stored as `(integer, fraction)`.
    Decimal,
    /// Fixed-length string, zero-padded to the field length.
    Char,
    /// Variable-length string.
    Varchar,
    /// Packed 24-bit date.
    Date,
    /// Packed 64-bit `YYYYMMDDhhmmss` datetime.
    Datetime,
}

impl FieldType {
    /// Returns the SQL name of the type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Tinyint => "TINYINT",
            FieldType::Smallint => "SMALLINT",
            FieldType::Int => "INT",
            FieldType::Bigint => "BIGINT",
            FieldType::Largeint => "LARGEINT",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Decimal => "DECIMAL",
            FieldType::Char => "CHAR",
            FieldType::Varchar => "VARCHAR",
            FieldType::Date => "DATE",
            FieldType::Datetime => "DATETIME",
        }
    }

    /// Returns whether values of this type are byte strings.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, FieldType::Char | FieldType::Varchar)
    }

    /// Returns whether this type is numeric.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldType::Tinyint
                | FieldType::Smallint
                | FieldType::Int
                | FieldType::Bigint
                | FieldType::Largeint
                | FieldType::Float
                | FieldType::Double
                | FieldType::Decimal
        )
    }

    /// Returns the on-disk byte size for fixed-width types.
    #[must_use]
    pub fn byte_size(&self) -> Option<usize> {
        match self {
            FieldType::Tinyint => Some(1),
            FieldType::Smallint => Some(2),
            FieldType::Int | FieldType::Float => Some(4),
            FieldType::Bigint | FieldType::Double | FieldType::Datetime => Some(8),
            FieldType::Largeint => Some(16),
            FieldType::Decimal => Some(12),
            FieldType::Date => Some(3),
            FieldType::Char | FieldType::Varchar => None, // variable width
        }
    }

    /// Converts to the Arrow type used when importing record batches.
    #[must_use]
    pub fn to_arrow(&self) -> ArrowDataType {
        match self {
            FieldType::Tinyint => ArrowDataType::Int8,
            FieldType::Smallint => ArrowDataType::Int16,
            FieldType::Int => ArrowDataType::Int32,
            FieldType::Bigint => ArrowDataType::Int64,
            FieldType::Largeint => ArrowDataType::Decimal128(38, 0),
            FieldType::Float => ArrowDataType::Float32,
            FieldType::Double => ArrowDataType::Float64,
            FieldType::Decimal => ArrowDataType::Decimal128(27, FRAC_DIGITS as i8),
            FieldType::Char | FieldType::Varchar => ArrowDataType::Utf8,
            FieldType::Date => ArrowDataType::Date32,
            FieldType::Datetime => ArrowDataType::Timestamp(TimeUnit::Second, None),
        }
    }

    /// Converts from an Arrow data type.
    ///
    /// Returns None for Arrow types with no column representation.
    #[must_use]
    pub fn from_arrow(arrow_type: &ArrowDataType) -> Option<Self> {
        match arrow_type {
            ArrowDataType::Int8 => Some(FieldType::Tinyint),
            ArrowDataType::Int16 => Some(FieldType::Smallint),
            ArrowDataType::Int32 => Some(FieldType::Int),
            ArrowDataType::Int64 => Some(FieldType::Bigint),
            ArrowDataType::Decimal128(_, 0) => Some(FieldType::Largeint),
            ArrowDataType::Decimal128(_, scale) if (1..=FRAC_DIGITS as i8).contains(scale) => {
                Some(FieldType::Decimal)
            }
            ArrowDataType::Float32 => Some(FieldType::Float),
            ArrowDataType::Float64 => Some(FieldType::Double),
            ArrowDataType::Utf8 => Some(FieldType::Varchar),
            ArrowDataType::Date32 => Some(FieldType::Date),
            ArrowDataType::Timestamp(_, _) => Some(FieldType::Datetime),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Predicate construction from SQL literal text.
//!
//! The builder is the only place literals are parsed and validated. It picks
//! the concrete [`MemberType`] from the field type and hands back a boxed
//! [`ColumnPredicate`], so callers never name the generic types.

use crate::catalog::FieldInfo;
use crate::config::PredicateConfig;
use crate::error::{PredicateError, Result};
use crate::observability::log_debug;
use crate::types::{Date24, Datetime64, Decimal12, FieldType};

use super::comparison::{CompareOp, ComparisonPredicate};
use super::in_list::{InListPredicate, NotInListPredicate};
use super::member::MemberType;
use super::membership::MembershipSet;
use super::null::NullPredicate;
use super::{ColumnPredicate, PredicateKind};

/// A [`MemberType`] that can be parsed from SQL literal text.
pub trait ParseLiteral: MemberType + Sized {
    /// Parses `literal` as a value of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`PredicateError::InvalidLiteral`] if the text is malformed or
    /// out of range for the field.
    fn parse_literal(literal: &str, field: &FieldInfo) -> Result<Self>;
}

fn invalid_literal(field: &FieldInfo, literal: &str, reason: impl ToString) -> PredicateError {
    PredicateError::InvalidLiteral {
        field_type: field.field_type.name(),
        literal: literal.to_string(),
        reason: reason.to_string(),
    }
}

macro_rules! impl_parse_number {
    ($($ty:ty),+) => {
        $(
            impl ParseLiteral for $ty {
                fn parse_literal(literal: &str, field: &FieldInfo) -> Result<Self> {
                    literal
                        .trim()
                        .parse::<$ty>()
                        .map_err(|e| invalid_literal(field, literal, e))
                }
            }
        )+
    };
}

impl_parse_number!(i8, i16, i32, i64, i128, f32, f64);

macro_rules! impl_parse_from_str {
    ($($ty:ty),+) => {
        $(
            impl ParseLiteral for $ty {
                fn parse_literal(literal: &str, _field: &FieldInfo) -> Result<Self> {
                    literal.parse()
                }
            }
        )+
    };
}

impl_parse_from_str!(Decimal12, Date24, Datetime64);

impl ParseLiteral for Vec<u8> {
    /// `CHAR(n)` literals are zero-padded to `n` bytes to match the stored
    /// column width. A length of 0 means the width is unknown.
    fn parse_literal(literal: &str, field: &FieldInfo) -> Result<Self> {
        let width = field.length as usize;
        if width > 0 && literal.len() > width {
            return Err(invalid_literal(
                field,
                literal,
                format!("{} bytes exceed the column width of {width}", literal.len()),
            ));
        }
        let mut bytes = literal.as_bytes().to_vec();
        if field.field_type == FieldType::Char && width > 0 {
            bytes.resize(width, 0);
        }
        Ok(bytes)
    }
}

/// Runs `$body` with `$t` bound to the member type for `$field_type`.
macro_rules! with_member_type {
    ($field_type:expr, $t:ident => $body:expr) => {
        match $field_type {
            FieldType::Tinyint => {
                type $t = i8;
                $body
            }
            FieldType::Smallint => {
                type $t = i16;
                $body
            }
            FieldType::Int => {
                type $t = i32;
                $body
            }
            FieldType::Bigint => {
                type $t = i64;
                $body
            }
            FieldType::Largeint => {
                type $t = i128;
                $body
            }
            FieldType::Float => {
                type $t = f32;
                $body
            }
            FieldType::Double => {
                type $t = f64;
                $body
            }
            FieldType::Decimal => {
                type $t = Decimal12;
                $body
            }
            FieldType::Date => {
                type $t = Date24;
                $body
            }
            FieldType::Datetime => {
                type $t = Datetime64;
                $body
            }
            FieldType::Char | FieldType::Varchar => {
                type $t = Vec<u8>;
                $body
            }
        }
    };
}

fn parse_all<T: ParseLiteral, S: AsRef<str>>(field: &FieldInfo, literals: &[S]) -> Result<Vec<T>> {
    literals
        .iter()
        .map(|literal| T::parse_literal(literal.as_ref(), field))
        .collect()
}

/// Builds predicates against a [`PredicateConfig`].
#[derive(Debug, Clone, Default)]
pub struct PredicateBuilder {
    config: PredicateConfig,
}

impl PredicateBuilder {
    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn new(config: PredicateConfig) -> Self {
        PredicateBuilder { config }
    }

    /// Returns the builder configuration.
    #[must_use]
    pub fn config(&self) -> &PredicateConfig {
        &self.config
    }

    /// Builds `column IN (literals...)`.
    ///
    /// # Errors
    ///
    /// Returns [`PredicateError::EmptyInList`] if `literals` is empty, or
    /// [`PredicateError::InvalidLiteral`] if any literal does not parse as a
    /// value of `field`.
    pub fn in_list<S: AsRef<str>>(
        &self,
        field: &FieldInfo,
        column_id: u32,
        literals: &[S],
    ) -> Result<Box<dyn ColumnPredicate>> {
        self.build_list(field, column_id, literals, PredicateKind::InList)
    }

    /// Builds `column NOT IN (literals...)`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::in_list`].
    pub fn not_in_list<S: AsRef<str>>(
        &self,
        field: &FieldInfo,
        column_id: u32,
        literals: &[S],
    ) -> Result<Box<dyn ColumnPredicate>> {
        self.build_list(field, column_id, literals, PredicateKind::NotInList)
    }

    /// Builds `column op literal`.
    ///
    /// # Errors
    ///
    /// Returns [`PredicateError::InvalidLiteral`] if `literal` does not parse
    /// as a value of `field` or is a float `NaN`.
    pub fn comparison(
        &self,
        field: &FieldInfo,
        column_id: u32,
        op: CompareOp,
        literal: &str,
    ) -> Result<Box<dyn ColumnPredicate>> {
        let predicate: Box<dyn ColumnPredicate> = with_member_type!(field.field_type, T => {
            let value = T::parse_literal(literal, field)?;
            Box::new(ComparisonPredicate::<T>::new(column_id, op, value)?)
        });
        log_debug!(
            event = "predicate_built",
            kind = %predicate.kind(),
            column = column_id,
            field = %field.name,
            field_type = %field.field_type,
        );
        Ok(predicate)
    }

    /// Builds `column IS NULL`.
    #[must_use]
    pub fn is_null(&self, column_id: u32) -> Box<dyn ColumnPredicate> {
        Box::new(NullPredicate::is_null(column_id))
    }

    /// Builds `column IS NOT NULL`.
    #[must_use]
    pub fn is_not_null(&self, column_id: u32) -> Box<dyn ColumnPredicate> {
        Box::new(NullPredicate::is_not_null(column_id))
    }

    fn build_list<S: AsRef<str>>(
        &self,
        field: &FieldInfo,
        column_id: u32,
        literals: &[S],
        kind: PredicateKind,
    ) -> Result<Box<dyn ColumnPredicate>> {
        if literals.is_empty() {
            return Err(PredicateError::EmptyInList);
        }
        let (predicate, distinct): (Box<dyn ColumnPredicate>, u32) =
            with_member_type!(field.field_type, T => {
                let values = MembershipSet::build_with(parse_all::<T, S>(field, literals)?, &self.config)?;
                let distinct = values.size();
                let predicate: Box<dyn ColumnPredicate> = if kind == PredicateKind::NotInList {
                    Box::new(NotInListPredicate::new(column_id, values))
                } else {
                    Box::new(InListPredicate::new(column_id, values))
                };
                (predicate, distinct)
            });
        log_debug!(
            event = "predicate_built",
            kind = %kind,
            column = column_id,
            field = %field.name,
            field_type = %field.field_type,
            literals = literals.len(),
            distinct,
        );
        Ok(predicate)
    }
}

/// Builds `column IN (literals...)` with the default configuration.
///
/// # Errors
///
/// See [`PredicateBuilder::in_list`].
pub fn make_in_list_predicate<S: AsRef<str>>(
    field: &FieldInfo,
    column_index: u32,
    literals: &[S],
) -> Result<Box<dyn ColumnPredicate>> {
    PredicateBuilder::default().in_list(field, column_index, literals)
}

/// Builds `column NOT IN (literals...)` with the default configuration.
///
/// # Errors
///
/// See [`PredicateBuilder::not_in_list`].
pub fn make_not_in_list_predicate<S: AsRef<str>>(
    field: &FieldInfo,
    column_index: u32,
    literals: &[S],
) -> Result<Box<dyn ColumnPredicate>> {
    PredicateBuilder::default().not_in_list(field, column_index, literals)
}

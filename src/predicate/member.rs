//! Per-type glue between column buffers and membership keys.
//!
//! [`MemberType`] is implemented once per literal type. It names the element
//! type found in a column buffer, the normalized key a [`MembershipSet`]
//! stores, and how to compare the two. Every predicate loop is generic over
//! it, so the per-row path is monomorphic.
//!
//! [`MembershipSet`]: super::MembershipSet

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use hashbrown::HashSet;

use crate::executor::vectorized::ColumnData;
use crate::types::{Date24, Datetime64, Decimal12, FieldType, StrSlice};

/// A literal type predicates can be built over.
pub trait MemberType: Debug + Send + Sync + 'static {
    /// Element type held in the column buffer.
    type Elem<'a>: Copy;

    /// Normalized, hashable form of a literal.
    type Key: Eq + Hash + Clone + Debug + Send + Sync;

    /// Field types whose columns hold [`Self::Elem`].
    const FIELD_TYPES: &'static [FieldType];

    /// Normalizes a literal. `None` means the literal can never match a row.
    fn into_key(self) -> Option<Self::Key>;

    /// Borrows the column buffer as `Elem`s, or `None` on a storage mismatch.
    fn column_values<'b, 'a>(data: &'b ColumnData<'a>) -> Option<&'b [Self::Elem<'a>]>;

    /// Returns true if `elem` equals `key`.
    fn key_eq(key: &Self::Key, elem: Self::Elem<'_>) -> bool;

    /// Probes a hashed key table for `elem`.
    fn table_contains(table: &HashSet<Self::Key>, elem: Self::Elem<'_>) -> bool;

    /// Orders `elem` against `key`; `None` when the two are unordered (NaN).
    fn compare(elem: Self::Elem<'_>, key: &Self::Key) -> Option<Ordering>;
}

macro_rules! impl_exact_member {
    ($ty:ty, $variant:ident, [$($field_type:ident),+]) => {
        impl MemberType for $ty {
            type Elem<'a> = $ty;
            type Key = $ty;

            const FIELD_TYPES: &'static [FieldType] = &[$(FieldType::$field_type),+];

            fn into_key(self) -> Option<$ty> {
                Some(self)
            }

            fn column_values<'b, 'a>(data: &'b ColumnData<'a>) -> Option<&'b [$ty]> {
                match data {
                    ColumnData::$variant(values) => Some(values.as_slice()),
                    _ => None,
                }
            }

            #[inline]
            fn key_eq(key: &$ty, elem: $ty) -> bool {
                *key == elem
            }

            #[inline]
            fn table_contains(table: &HashSet<$ty>, elem: $ty) -> bool {
                table.contains(&elem)
            }

            #[inline]
            fn compare(elem: $ty, key: &$ty) -> Option<Ordering> {
                Some(elem.cmp(key))
            }
        }
    };
}

impl_exact_member!(i8, Int8, [Tinyint]);
impl_exact_member!(i16, Int16, [Smallint]);
impl_exact_member!(i32, Int32, [Int]);
impl_exact_member!(i64, Int64, [Bigint]);
impl_exact_member!(i128, Int128, [Largeint]);
impl_exact_member!(Decimal12, Decimal, [Decimal]);
impl_exact_member!(Date24, Date, [Date]);
impl_exact_member!(Datetime64, Datetime, [Datetime]);

/// Floats are keyed by bit pattern after folding `-0.0` into `+0.0`.
/// `NaN` has no key, so it never matches.
macro_rules! impl_float_member {
    ($ty:ty, $bits:ty, $variant:ident, $field_type:ident) => {
        impl MemberType for $ty {
            type Elem<'a> = $ty;
            type Key = $bits;

            const FIELD_TYPES: &'static [FieldType] = &[FieldType::$field_type];

            fn into_key(self) -> Option<$bits> {
                if self.is_nan() {
                    None
                } else if self == 0.0 {
                    Some(0)
                } else {
                    Some(self.to_bits())
                }
            }

            fn column_values<'b, 'a>(data: &'b ColumnData<'a>) -> Option<&'b [$ty]> {
                match data {
                    ColumnData::$variant(values) => Some(values.as_slice()),
                    _ => None,
                }
            }

            #[inline]
            fn key_eq(key: &$bits, elem: $ty) -> bool {
                elem.into_key() == Some(*key)
            }

            #[inline]
            fn table_contains(table: &HashSet<$bits>, elem: $ty) -> bool {
                elem.into_key().is_some_and(|bits| table.contains(&bits))
            }

            #[inline]
            fn compare(elem: $ty, key: &$bits) -> Option<Ordering> {
                elem.partial_cmp(&<$ty>::from_bits(*key))
            }
        }
    };
}

impl_float_member!(f32, u32, Float32, Float);
impl_float_member!(f64, u64, Float64, Double);

/// String literals are owned byte strings; column values are borrowed
/// [`StrSlice`]s compared byte-wise.
impl MemberType for Vec<u8> {
    type Elem<'a> = StrSlice<'a>;
    type Key = Box<[u8]>;

    const FIELD_TYPES: &'static [FieldType] = &[FieldType::Char, FieldType::Varchar];

    fn into_key(self) -> Option<Box<[u8]>> {
        Some(self.into_boxed_slice())
    }

    fn column_values<'b, 'a>(data: &'b ColumnData<'a>) -> Option<&'b [StrSlice<'a>]> {
        match data {
            ColumnData::Str(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    #[inline]
    fn key_eq(key: &Self::Key, elem: StrSlice<'_>) -> bool {
        **key == *elem.as_bytes()
    }

    #[inline]
    fn table_contains(table: &HashSet<Self::Key>, elem: StrSlice<'_>) -> bool {
        table.contains(elem.as_bytes())
    }

    #[inline]
    fn compare(elem: StrSlice<'_>, key: &Self::Key) -> Option<Ordering> {
        Some(elem.as_bytes().cmp(&**key))
    }
}

//! Value types that can appear in a column.

pub mod datetime;
pub mod decimal;
pub mod string;
mod value;

pub use datetime::{
    decode_date, decode_datetime, encode_date, encode_datetime, Date24, Datetime64,
};
pub use decimal::{Decimal12, FRAC_RATIO};
pub use string::StrSlice;
pub use value::FieldType;

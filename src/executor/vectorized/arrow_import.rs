//! Building row batches from Arrow record batches.
//!
//! Fixed-width values are copied into the batch's own buffers. String
//! columns borrow their bytes from the Arrow value buffers, so the returned
//! batch cannot outlive the record batch. For the same reason `CHAR(n)`
//! values are not padded here: they must already be `n` bytes long.
//!
//! Timestamps are read as wall-clock time in the column's timezone. Fixed
//! offsets such as `+02:00` are supported; named zones are rejected.

use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    ArrowPrimitiveType, DataType as ArrowDataType, Date32Type, Decimal128Type, Float32Type,
    Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, TimeUnit, TimestampMicrosecondType,
    TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType,
};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::catalog::{FieldInfo, Schema};
use crate::error::{PredicateError, Result};
use crate::observability::log_trace;
use crate::types::decimal::FRAC_DIGITS;
use crate::types::{Date24, Datetime64, Decimal12, FieldType, StrSlice};

use super::batch::RowBatch;
use super::column::ColumnData;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

impl<'a> RowBatch<'a> {
    /// Builds a batch whose capacity and size equal the record batch row count.
    ///
    /// Column `i` of `batch` is read as the type of field `i` of `schema`.
    ///
    /// # Errors
    ///
    /// Returns an error if the column counts differ, an Arrow column does not
    /// have the layout its field type expects, or a value does not fit the
    /// packed encoding.
    pub fn from_record_batch(schema: &Schema, batch: &'a RecordBatch) -> Result<Self> {
        if schema.len() != batch.num_columns() {
            return Err(PredicateError::SchemaError(format!(
                "Schema has {} fields but record batch has {} columns",
                schema.len(),
                batch.num_columns()
            )));
        }

        let mut row_batch = RowBatch::new(schema, batch.num_rows())?;
        for (index, field) in schema.fields().iter().enumerate() {
            let array = batch.column(index).as_ref();
            let column = row_batch.column_mut(index);
            column.set_data(convert_array(field, array)?)?;
            if array.null_count() > 0 {
                column.set_no_nulls(false);
                for (row, slot) in column.is_null_mut().iter_mut().enumerate() {
                    *slot = array.is_null(row);
                }
            }
        }

        log_trace!(
            event = "record_batch_imported",
            rows = batch.num_rows(),
            columns = batch.num_columns(),
        );
        Ok(row_batch)
    }
}

fn convert_array<'a>(field: &FieldInfo, array: &'a dyn Array) -> Result<ColumnData<'a>> {
    let mismatch = || PredicateError::TypeError {
        expected: format!(
            "{} for {} column '{}'",
            field.field_type.to_arrow(),
            field.field_type,
            field.name
        ),
        actual: array.data_type().to_string(),
    };

    let data = match field.field_type {
        FieldType::Tinyint => {
            ColumnData::Int8(primitive_values::<Int8Type>(array).ok_or_else(mismatch)?)
        }
        FieldType::Smallint => {
            ColumnData::Int16(primitive_values::<Int16Type>(array).ok_or_else(mismatch)?)
        }
        FieldType::Int => {
            ColumnData::Int32(primitive_values::<Int32Type>(array).ok_or_else(mismatch)?)
        }
        FieldType::Bigint => {
            ColumnData::Int64(primitive_values::<Int64Type>(array).ok_or_else(mismatch)?)
        }
        FieldType::Float => {
            ColumnData::Float32(primitive_values::<Float32Type>(array).ok_or_else(mismatch)?)
        }
        FieldType::Double => {
            ColumnData::Float64(primitive_values::<Float64Type>(array).ok_or_else(mismatch)?)
        }
        FieldType::Largeint => match array.data_type() {
            ArrowDataType::Decimal128(_, 0) => ColumnData::Int128(
                primitive_values::<Decimal128Type>(array).ok_or_else(mismatch)?,
            ),
            _ => return Err(mismatch()),
        },
        FieldType::Decimal => {
            let scale = match array.data_type() {
                ArrowDataType::Decimal128(_, scale) => u32::try_from(*scale)
                    .ok()
                    .filter(|s| *s <= FRAC_DIGITS)
                    .ok_or_else(|| {
                        PredicateError::UnsupportedType(format!(
                            "decimal scale {scale} on column '{}'",
                            field.name
                        ))
                    })?,
                _ => return Err(mismatch()),
            };
            let values: &[i128] = array
                .as_primitive_opt::<Decimal128Type>()
                .ok_or_else(mismatch)?
                .values();
            ColumnData::Decimal(convert_rows(array, values, |v| {
                Decimal12::from_scaled(v, scale)
            })?)
        }
        FieldType::Char | FieldType::Varchar => {
            let strings = array.as_string_opt::<i32>().ok_or_else(mismatch)?;
            let width = field.length as usize;
            let fixed_width = field.field_type == FieldType::Char && width > 0;
            ColumnData::Str(
                (0..strings.len())
                    .map(|row| {
                        let bytes = strings.value(row).as_bytes();
                        if fixed_width && !strings.is_null(row) && bytes.len() != width {
                            return Err(PredicateError::ConversionError(format!(
                                "CHAR({width}) column '{}' row {row} holds {} bytes, expected \
                                 a value zero-padded to {width}",
                                field.name,
                                bytes.len()
                            )));
                        }
                        Ok(StrSlice::new(bytes))
                    })
                    .collect::<Result<_>>()?,
            )
        }
        FieldType::Date => {
            let days: &[i32] = array
                .as_primitive_opt::<Date32Type>()
                .ok_or_else(mismatch)?
                .values();
            ColumnData::Date(convert_rows(array, days, date_from_epoch_days)?)
        }
        FieldType::Datetime => {
            let (values, per_second) = timestamp_values(array).ok_or_else(mismatch)?;
            let offset = timestamp_offset(field, array)?;
            ColumnData::Datetime(convert_rows(array, values, |v| {
                datetime_from_epoch(v, per_second, offset)
            })?)
        }
    };
    Ok(data)
}

fn primitive_values<T: ArrowPrimitiveType>(array: &dyn Array) -> Option<Vec<T::Native>> {
    array.as_primitive_opt::<T>().map(|a| a.values().to_vec())
}

/// Converts non-null slots with `convert`; null slots get the default value.
fn convert_rows<N, V, F>(array: &dyn Array, values: &[N], mut convert: F) -> Result<Vec<V>>
where
    N: Copy,
    V: Default,
    F: FnMut(N) -> Result<V>,
{
    values
        .iter()
        .enumerate()
        .map(|(row, &v)| {
            if array.is_null(row) {
                Ok(V::default())
            } else {
                convert(v)
            }
        })
        .collect()
}

/// Returns the raw timestamp values and the number of units per second.
fn timestamp_values(array: &dyn Array) -> Option<(&[i64], i64)> {
    match array.data_type() {
        ArrowDataType::Timestamp(TimeUnit::Second, _) => array
            .as_primitive_opt::<TimestampSecondType>()
            .map(|a| (&a.values()[..], 1)),
        ArrowDataType::Timestamp(TimeUnit::Millisecond, _) => array
            .as_primitive_opt::<TimestampMillisecondType>()
            .map(|a| (&a.values()[..], 1_000)),
        ArrowDataType::Timestamp(TimeUnit::Microsecond, _) => array
            .as_primitive_opt::<TimestampMicrosecondType>()
            .map(|a| (&a.values()[..], 1_000_000)),
        ArrowDataType::Timestamp(TimeUnit::Nanosecond, _) => array
            .as_primitive_opt::<TimestampNanosecondType>()
            .map(|a| (&a.values()[..], 1_000_000_000)),
        _ => None,
    }
}

/// Offset that turns a column's UTC instants into its local wall-clock time.
fn timestamp_offset(field: &FieldInfo, array: &dyn Array) -> Result<FixedOffset> {
    match array.data_type() {
        ArrowDataType::Timestamp(_, Some(tz)) if !tz.eq_ignore_ascii_case("UTC") => {
            tz.parse::<FixedOffset>().map_err(|_| {
                PredicateError::UnsupportedType(format!(
                    "timezone '{tz}' on column '{}', expected a fixed offset like +02:00",
                    field.name
                ))
            })
        }
        _ => Ok(Utc.fix()),
    }
}

fn date_from_epoch_days(days: i32) -> Result<Date24> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| PredicateError::ConversionError(format!("Date32 value {days} out of range")))
        .and_then(Date24::from_naive)
}

fn datetime_from_epoch(value: i64, per_second: i64, offset: FixedOffset) -> Result<Datetime64> {
    DateTime::from_timestamp(value.div_euclid(per_second), 0)
        .ok_or_else(|| {
            PredicateError::ConversionError(format!("timestamp value {value} out of range"))
        })
        .and_then(|dt| Datetime64::from_naive(dt.with_timezone(&offset).naive_local()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{
        ArrayRef, Date32Array, Decimal128Array, Int32Array, StringArray,
        TimestampSecondArray,
    };
    use arrow::datatypes::{Field, Schema as ArrowSchema};

    use super::*;

    fn record_batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect();
        let arrays = columns.into_iter().map(|(_, a)| a).collect();
        RecordBatch::try_new(Arc::new(ArrowSchema::new(fields)), arrays).unwrap()
    }

    #[test]
    fn test_import_ints_with_nulls() {
        let rb = record_batch(vec![(
            "v",
            Arc::new(Int32Array::from(vec![Some(1), None, Some(3)])) as ArrayRef,
        )]);
        let schema = Schema::new(vec![FieldInfo::new("v", FieldType::Int).unwrap()]).unwrap();
        let batch = RowBatch::from_record_batch(&schema, &rb).unwrap();

        assert_eq!(batch.size(), 3);
        let column = batch.column(0);
        assert!(!column.no_nulls());
        assert_eq!(column.is_null(), &[false, true, false]);
        match column.data() {
            ColumnData::Int32(values) => {
                assert_eq!(values[0], 1);
                assert_eq!(values[2], 3);
            }
            other => panic!("unexpected storage {}", other.storage_name()),
        }
    }

    #[test]
    fn test_import_strings_borrow_arrow_buffers() {
        let rb = record_batch(vec![(
            "s",
            Arc::new(StringArray::from(vec!["a", "bb", "ccc"])) as ArrayRef,
        )]);
        let schema =
            Schema::new(vec![FieldInfo::new("s", FieldType::Varchar).unwrap()]).unwrap();
        let batch = RowBatch::from_record_batch(&schema, &rb).unwrap();

        assert!(batch.column(0).no_nulls());
        match batch.column(0).data() {
            ColumnData::Str(values) => assert_eq!(values[1], StrSlice::from("bb")),
            other => panic!("unexpected storage {}", other.storage_name()),
        }
    }

    #[test]
    fn test_import_dates_and_datetimes() {
        // 2017-09-10 is 17419 days after the epoch.
        let rb = record_batch(vec![
            ("d", Arc::new(Date32Array::from(vec![17_419])) as ArrayRef),
            (
                "t",
                Arc::new(TimestampSecondArray::from(vec![1_505_005_323])) as ArrayRef,
            ),
        ]);
        let schema = Schema::new(vec![
            FieldInfo::new("d", FieldType::Date).unwrap(),
            FieldInfo::new("t", FieldType::Datetime).unwrap(),
        ])
        .unwrap();
        let batch = RowBatch::from_record_batch(&schema, &rb).unwrap();

        match batch.column(0).data() {
            ColumnData::Date(values) => assert_eq!(values[0].to_string(), "2017-09-10"),
            other => panic!("unexpected storage {}", other.storage_name()),
        }
        match batch.column(1).data() {
            ColumnData::Datetime(values) => {
                assert_eq!(values[0].to_string(), "2017-09-10 01:02:03");
            }
            other => panic!("unexpected storage {}", other.storage_name()),
        }
    }

    #[test]
    fn test_import_timestamp_uses_column_offset() {
        let local = TimestampSecondArray::from(vec![1_505_005_323]).with_timezone("+02:00");
        let utc = TimestampSecondArray::from(vec![1_505_005_323]).with_timezone("UTC");
        let rb = record_batch(vec![
            ("local", Arc::new(local) as ArrayRef),
            ("utc", Arc::new(utc) as ArrayRef),
        ]);
        let schema = Schema::new(vec![
            FieldInfo::new("local", FieldType::Datetime).unwrap(),
            FieldInfo::new("utc", FieldType::Datetime).unwrap(),
        ])
        .unwrap();
        let batch = RowBatch::from_record_batch(&schema, &rb).unwrap();

        match (batch.column(0).data(), batch.column(1).data()) {
            (ColumnData::Datetime(local), ColumnData::Datetime(utc)) => {
                assert_eq!(local[0].to_string(), "2017-09-10 03:02:03");
                assert_eq!(utc[0].to_string(), "2017-09-10 01:02:03");
            }
            _ => panic!("expected DATETIME storage"),
        }
    }

    #[test]
    fn test_import_rejects_named_timezone() {
        let array = TimestampSecondArray::from(vec![0]).with_timezone("Europe/Paris");
        let rb = record_batch(vec![("t", Arc::new(array) as ArrayRef)]);
        let schema =
            Schema::new(vec![FieldInfo::new("t", FieldType::Datetime).unwrap()]).unwrap();
        assert!(matches!(
            RowBatch::from_record_batch(&schema, &rb),
            Err(PredicateError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_import_char_requires_padded_values() {
        let schema = Schema::new(vec![FieldInfo::new("c", FieldType::Char)
            .unwrap()
            .with_length(3)])
        .unwrap();

        let padded = record_batch(vec![(
            "c",
            Arc::new(StringArray::from(vec![Some("ab\0"), None, Some("xyz")])) as ArrayRef,
        )]);
        assert!(RowBatch::from_record_batch(&schema, &padded).is_ok());

        let short = record_batch(vec![(
            "c",
            Arc::new(StringArray::from(vec!["ab", "xyz"])) as ArrayRef,
        )]);
        assert!(matches!(
            RowBatch::from_record_batch(&schema, &short),
            Err(PredicateError::ConversionError(_))
        ));
    }

    #[test]
    fn test_import_decimal() {
        let array = Decimal128Array::from(vec![12_500, -1_250])
            .with_precision_and_scale(10, 3)
            .unwrap();
        let rb = record_batch(vec![("m", Arc::new(array) as ArrayRef)]);
        let schema =
            Schema::new(vec![FieldInfo::new("m", FieldType::Decimal).unwrap()]).unwrap();
        let batch = RowBatch::from_record_batch(&schema, &rb).unwrap();

        match batch.column(0).data() {
            ColumnData::Decimal(values) => {
                assert_eq!(values[0], Decimal12::new(12, 500_000_000));
                assert_eq!(values[1], Decimal12::new(-1, -250_000_000));
            }
            other => panic!("unexpected storage {}", other.storage_name()),
        }
    }

    #[test]
    fn test_import_type_mismatch() {
        let rb = record_batch(vec![(
            "v",
            Arc::new(StringArray::from(vec!["x"])) as ArrayRef,
        )]);
        let schema = Schema::new(vec![FieldInfo::new("v", FieldType::Int).unwrap()]).unwrap();
        assert!(matches!(
            RowBatch::from_record_batch(&schema, &rb),
            Err(PredicateError::TypeError { .. })
        ));
    }

    #[test]
    fn test_import_column_count_mismatch() {
        let rb = record_batch(vec![(
            "v",
            Arc::new(Int32Array::from(vec![1])) as ArrayRef,
        )]);
        let schema = Schema::new(vec![
            FieldInfo::new("v", FieldType::Int).unwrap(),
            FieldInfo::new("w", FieldType::Int).unwrap(),
        ])
        .unwrap();
        assert!(matches!(
            RowBatch::from_record_batch(&schema, &rb),
            Err(PredicateError::SchemaError(_))
        ));
    }
}

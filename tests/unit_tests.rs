//! Unit tests for colfilter.

use colfilter::types::FRAC_RATIO;
use colfilter::{
    ColumnData, ColumnVector, Date24, Datetime64, Decimal12, FieldInfo, FieldType,
    PredicateConfig, PredicateError, RowBatch, Schema, StrSlice,
};
use serde::de::value::{Error as ValueError, MapDeserializer};
use serde::Deserialize;

// =============================================================================
// Error Tests
// =============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_empty_in_list_display() {
        let err = PredicateError::EmptyInList;
        assert!(err.to_string().contains("at least one literal"));
    }

    #[test]
    fn test_type_error_display() {
        let err = PredicateError::TypeError {
            expected: "INT".into(),
            actual: "Int64".into(),
        };
        assert!(err.to_string().contains("INT"));
        assert!(err.to_string().contains("Int64"));
    }

    #[test]
    fn test_batch_capacity_display() {
        let err = PredicateError::InvalidBatchCapacity {
            capacity: 70_000,
            max: 65_536,
        };
        assert!(err.to_string().contains("70000"));
        assert!(err.to_string().contains("65536"));
    }
}

// =============================================================================
// Config Tests
// =============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_config_fills_defaults() {
        let entries = vec![("linear_scan_threshold", 32_usize)];
        let deserializer = MapDeserializer::<_, ValueError>::new(entries.into_iter());
        let config = PredicateConfig::deserialize(deserializer).unwrap();
        assert_eq!(config.linear_scan_threshold, 32);
        assert_eq!(config.batch_capacity, 1024);
    }

    #[test]
    fn test_batch_from_config() {
        let schema = Schema::new(vec![FieldInfo::new("a", FieldType::Int).unwrap()]).unwrap();
        let config = PredicateConfig::new().with_batch_capacity(4096);
        assert_eq!(RowBatch::with_config(&schema, &config).unwrap().capacity(), 4096);

        let too_big = PredicateConfig::new().with_batch_capacity(65_537);
        assert!(matches!(
            RowBatch::with_config(&schema, &too_big),
            Err(PredicateError::InvalidBatchCapacity { .. })
        ));
    }
}

// =============================================================================
// Types Tests
// =============================================================================

mod types_tests {
    use super::*;

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::Largeint.name(), "LARGEINT");
        assert_eq!(FieldType::Varchar.to_string(), "VARCHAR");
        assert!(FieldType::Char.is_string());
        assert!(FieldType::Decimal.is_numeric());
        assert!(!FieldType::Date.is_numeric());
    }

    #[test]
    fn test_field_type_arrow_mapping() {
        for ty in [
            FieldType::Tinyint,
            FieldType::Int,
            FieldType::Double,
            FieldType::Decimal,
            FieldType::Date,
            FieldType::Datetime,
        ] {
            assert_eq!(FieldType::from_arrow(&ty.to_arrow()), Some(ty));
        }
    }

    #[test]
    fn test_decimal_parse_and_display() {
        let d: Decimal12 = "-12.5".parse().unwrap();
        assert_eq!(d, Decimal12::new(-12, -500_000_000));
        assert_eq!(d.to_string(), "-12.5");

        let small: Decimal12 = "0.000000001".parse().unwrap();
        assert_eq!(small, Decimal12::new(0, 1));
        assert_eq!(i64::from(Decimal12::new(0, 999_999_999).fraction) + 1, FRAC_RATIO);
    }

    #[test]
    fn test_decimal_ordering_is_lexicographic() {
        assert!(Decimal12::new(1, 0) > Decimal12::new(0, 999_999_999));
        assert!(Decimal12::new(1, 2) < Decimal12::new(1, 3));
    }

    #[test]
    fn test_date_parse_and_display() {
        let date: Date24 = "2017-09-10".parse().unwrap();
        assert_eq!(date.parts(), (2017, 9, 10));
        assert_eq!(date.to_string(), "2017-09-10");
        assert!("2017-09-31".parse::<Date24>().is_err());
    }

    #[test]
    fn test_datetime_packed_value() {
        let dt: Datetime64 = "2017-09-10 01:02:03".parse().unwrap();
        assert_eq!(dt.packed(), 20_170_910_010_203);
        assert_eq!(dt.to_string(), "2017-09-10 01:02:03");
    }

    #[test]
    fn test_str_slice_equality_ignores_backing_buffer() {
        let first = b"xxabcxx";
        let second = b"abc";
        assert_eq!(StrSlice::new(&first[2..5]), StrSlice::new(second));
        assert_eq!(StrSlice::from("abc").len(), 3);
        assert!(StrSlice::from("").is_empty());
    }
}

// =============================================================================
// Schema Tests
// =============================================================================

mod schema_tests {
    use super::*;

    #[test]
    fn test_schema_lookup() {
        let schema = Schema::new(vec![
            FieldInfo::new("k", FieldType::Bigint).unwrap().with_key(true),
            FieldInfo::new("v", FieldType::Varchar).unwrap().with_length(32),
        ])
        .unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.index_of("v"), Some(1));
        assert_eq!(schema.field(1).unwrap().length, 32);
        assert_eq!(schema.field(1).unwrap().unique_id, 1);
        assert!(schema.field(0).unwrap().is_key);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = Schema::new(vec![
            FieldInfo::new("a", FieldType::Int).unwrap(),
            FieldInfo::new("a", FieldType::Date).unwrap(),
        ]);
        assert!(matches!(result, Err(PredicateError::SchemaError(_))));
    }

    #[test]
    fn test_empty_field_name_rejected() {
        assert!(FieldInfo::new("", FieldType::Int).is_err());
    }
}

// =============================================================================
// Batch Tests
// =============================================================================

mod batch_tests {
    use super::*;

    #[test]
    fn test_column_vector_rejects_wrong_storage() {
        let mut column = ColumnVector::new(FieldType::Date, 2);
        let err = column
            .set_data(ColumnData::Datetime(vec![Datetime64::default(); 2]))
            .unwrap_err();
        assert!(matches!(err, PredicateError::TypeError { .. }));
    }

    #[test]
    fn test_batch_columns_follow_schema() {
        let schema = Schema::new(vec![
            FieldInfo::new("a", FieldType::Smallint).unwrap(),
            FieldInfo::new("b", FieldType::Char).unwrap(),
        ])
        .unwrap();
        let batch = RowBatch::new(&schema, 16).unwrap();
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.column(1).field_type(), FieldType::Char);
        assert!(matches!(batch.column(0).data(), ColumnData::Int16(v) if v.len() == 16));
    }
}

use super::*;
use crate::channel::ChannelBuilder;

#[test]
fn test_prohibited_keyword() {
    let err = check_prohibited_fields(&["timestamp"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    assert!(err.to_string().contains("Prohibited keyword"));

    // Prohibition is case-insensitive.
    assert!(check_prohibited_fields(&["TimeStamp"]).is_err());
}

#[test]
fn test_casing_collision_names_canonical_spelling() {
    let err = check_prohibited_fields(&["Unit_Str"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    let message = err.to_string();
    assert!(message.contains("'Unit_Str' is an invalid keyword"));
    assert!(message.contains("use 'unit_str' instead"));

    // Canonical spellings pass both passes untouched.
    assert!(check_prohibited_fields(&["data", "name", "unit_str", "time"]).is_ok());
}

#[test]
fn test_collision_reported_before_missing_keyword() {
    // `name` is missing AND `Unit_Str` collides: the collision wins because
    // the keyword rules run before the compulsory check.
    let mut channel = ChannelBuilder::new("test", "m")
        .data(vec![1.0, 2.0, 3.0])
        .time(vec![1.0, 2.0, 3.0])
        .build();
    channel.remove(NAME);
    let unit = channel.remove(UNIT_STR).unwrap();
    channel.insert("Unit_Str".to_string(), unit);

    let err = validate_channel(&channel.into()).unwrap_err();
    assert!(matches!(err, ComplianceError::InvalidKeyword { .. }));
}

#[test]
fn test_compulsory_keywords_alone_are_not_enough() {
    // All three compulsory keywords but no way to replicate time.
    let err = check_compulsory_fields(&COMPULSORY_FIELDS).unwrap_err();
    assert!(matches!(err, ComplianceError::MissingTimeInformation));
    assert_eq!(err.kind(), ErrorKind::Value);
}

#[test]
fn test_fs_satisfies_the_time_alternative() {
    let mut keywords = COMPULSORY_FIELDS.to_vec();
    keywords.push(FS);
    assert!(check_compulsory_fields(&keywords).is_ok());

    let mut keywords = COMPULSORY_FIELDS.to_vec();
    keywords.push(TIME);
    assert!(check_compulsory_fields(&keywords).is_ok());
}

#[test]
fn test_each_compulsory_keyword_is_required() {
    for missing in COMPULSORY_FIELDS {
        let mut keywords = COMPULSORY_FIELDS.to_vec();
        keywords.retain(|keyword| *keyword != missing);
        keywords.push(FS);

        let err = check_compulsory_fields(&keywords).unwrap_err();
        match err {
            ComplianceError::MissingKeyword { keyword } => assert_eq!(keyword, missing),
            other => panic!("expected a missing-keyword error, got {other}"),
        }
    }
}

#[test]
fn test_timestamps_must_be_iso8601() {
    let channel = ChannelBuilder::new("test", "m")
        .field("start_timestamp", "2023-08-23T12:00:00")
        .build();
    assert!(check_timestamps(&channel).is_ok());

    let channel = ChannelBuilder::new("test", "m")
        .field("start_timestamp", "2023-08-23T12:00:00")
        .field("end_timestamp", "2023/08/23 1200")
        .build();
    let err = check_timestamps(&channel).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(err.to_string().contains("end_timestamp"));
}

#[test]
fn test_timestamp_values_must_be_text() {
    let channel = ChannelBuilder::new("test", "m")
        .field("start_timestamp", 1_692_792_000.0)
        .build();
    let err = check_timestamps(&channel).unwrap_err();
    assert!(matches!(err, ComplianceError::MalformedTimestamp { .. }));
}

#[test]
fn test_timestamp_substring_match_is_unanchored() {
    // Neither prefix nor suffix: still treated as a timestamp keyword.
    let channel = ChannelBuilder::new("test", "m")
        .field("first_timestamp_utc", "not a date")
        .build();
    assert!(check_timestamps(&channel).is_err());
}

#[test]
fn test_data_container_must_be_a_sample_array() {
    // A generic list of numbers is not a sample array.
    let channel = ChannelBuilder::new("test", "m")
        .data(Value::List(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
        ]))
        .fs(50.0)
        .build();

    let err = validate_channel(&channel.into()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(err.to_string().contains("Invalid datatype list"));
}

#[test]
fn test_non_numeric_sample_arrays_are_rejected() {
    use arrow::array::{ArrayRef, StringArray};
    use std::sync::Arc;

    let labels: ArrayRef = Arc::new(StringArray::from(vec!["a", "b", "c"]));
    let channel = ChannelBuilder::new("test", "m")
        .data(labels)
        .fs(50.0)
        .build();

    let err = validate_channel(&channel.into()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_length_check_runs_before_data_container_check() {
    // `data` as a plain list still has a length, so a 2 vs. 3 mismatch is
    // reported as a mismatch, not as a container error.
    let channel = ChannelBuilder::new("test", "m")
        .data(Value::List(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
        ]))
        .time(vec![1.0, 3.0])
        .build();

    let err = validate_channel(&channel.into()).unwrap_err();
    match err {
        ComplianceError::VectorLengthMismatch { time_len, data_len } => {
            assert_eq!(time_len, 2);
            assert_eq!(data_len, 3);
        }
        other => panic!("expected a length mismatch, got {other}"),
    }
}

#[test]
fn test_guideline_pointer_is_stable() {
    assert!(SEP005_GUIDELINE.starts_with("https://"));
    assert!(SEP005_GUIDELINE.contains("sep-0005"));
}

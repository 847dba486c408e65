// tests/value_tests.rs

use evitaql_parser::value::JsonValueError;
use evitaql_parser::{parse_value, Arguments, ErrorKind, ParseError, Range, Value, ValueKind};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::json;

fn value(text: &str) -> Value {
    parse_value(text, &Arguments::new()).unwrap()
}

fn value_error(text: &str) -> ParseError {
    parse_value(text, &Arguments::new()).unwrap_err()
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn test_scalar_kinds() {
    let cases = vec![
        ("'abc'", ValueKind::String),
        ("10", ValueKind::Int),
        ("10.0", ValueKind::Float),
        ("true", ValueKind::Boolean),
        ("2021-01-01", ValueKind::Date),
        ("10:00:00", ValueKind::Time),
        ("2021-01-01T10:00:00", ValueKind::DateTime),
        ("2021-01-01T10:00:00+02:00", ValueKind::OffsetDateTime),
        ("NOT_NULL", ValueKind::Enum),
        ("123e4567-e89b-12d3-a456-426614174000", ValueKind::Uuid),
    ];

    for (text, kind) in cases {
        assert_eq!(value(text).kind(), kind, "kind of {}", text);
    }
}

#[test]
fn test_integer_and_decimal_stay_distinct() {
    assert_eq!(value("10"), Value::Int(10));
    assert_eq!(value("10.25"), Value::Float(Decimal::new(1025, 2)));
    assert_ne!(value("10").kind(), value("10.0").kind());
}

#[test]
fn test_null_is_not_a_value() {
    assert_eq!(value_error("null").kind(), ErrorKind::Syntax);
}

// ============================================================================
// Ranges
// ============================================================================

#[test]
fn test_closed_and_open_ranges() {
    assert_eq!(value("[1,100]"), Value::IntRange(Range::between(1, 100)));
    assert_eq!(value("[,100]"), Value::IntRange(Range::until(100)));
    assert_eq!(value("[1,]"), Value::IntRange(Range::since(1)));
    assert_eq!(value("[null,5]"), Value::IntRange(Range::until(5)));
    assert_eq!(
        value("[1.5, 2.5]"),
        Value::FloatRange(Range::between(Decimal::new(15, 1), Decimal::new(25, 1)))
    );
}

#[test]
fn test_date_time_range() {
    match value("[2021-01-01T00:00:00+01:00,]") {
        Value::DateTimeRange(range) => {
            assert!(range.lower().is_some());
            assert!(range.upper().is_none());
        }
        other => panic!("expected date-time range, got {:?}", other),
    }
}

#[test]
fn test_range_needs_two_slots() {
    assert_eq!(value_error("[]").kind(), ErrorKind::Syntax);
    assert_eq!(value_error("[5]").kind(), ErrorKind::Syntax);
    assert_eq!(value_error("[1,2,3]").kind(), ErrorKind::Syntax);
}

#[test]
fn test_range_needs_a_bound() {
    assert!(matches!(
        value_error("[,]"),
        ParseError::TypeMismatch { offset: 0, .. }
    ));
}

#[test]
fn test_range_bounds_share_a_kind() {
    let err = value_error("[1,2.5]");
    match err {
        ParseError::TypeMismatch { offset, actual, .. } => {
            assert_eq!(offset, 3);
            assert_eq!(actual, "integer and decimal");
        }
        other => panic!("expected type mismatch, got {:?}", other),
    }
}

#[test]
fn test_range_rejects_unordered_kinds() {
    assert_eq!(value_error("['a','b']").kind(), ErrorKind::TypeMismatch);
    assert_eq!(value_error("[2021-01-01,2021-02-01]").kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_range_display() {
    assert_eq!(value("[ 1 , ]").to_string(), "[1,]");
    assert_eq!(value("[,2.50]").to_string(), "[,2.50]");
}

// ============================================================================
// Multiple values
// ============================================================================

#[test]
fn test_multiple() {
    assert_eq!(
        value("{1, 2, 3}"),
        Value::Multiple(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    assert_eq!(value("{'a'}").to_string(), "{'a'}");
    assert_eq!(value_error("{}").kind(), ErrorKind::Syntax);
}

// ============================================================================
// JSON arguments
// ============================================================================

#[test]
fn test_json_numbers() {
    assert_eq!(Value::try_from(json!(7)).unwrap(), Value::Int(7));
    assert_eq!(
        Value::try_from(json!(7.25)).unwrap(),
        Value::Float(Decimal::new(725, 2))
    );
    assert_eq!(
        Value::try_from(json!(u64::MAX)).unwrap().kind(),
        ValueKind::Float
    );
}

#[test]
fn test_json_nested_arrays() {
    assert_eq!(
        Value::try_from(json!(["a", [1, false]])).unwrap(),
        Value::Multiple(vec![
            Value::from("a"),
            Value::Multiple(vec![Value::Int(1), Value::Boolean(false)]),
        ])
    );
}

#[test]
fn test_json_rejections() {
    assert_eq!(Value::try_from(json!(null)), Err(JsonValueError::Null));
    assert_eq!(Value::try_from(json!({"a": 1})), Err(JsonValueError::Object));
    assert_eq!(Value::try_from(json!([1, null])), Err(JsonValueError::Null));
}

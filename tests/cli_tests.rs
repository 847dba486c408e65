// tests/cli_tests.rs
#![cfg(feature = "cli")]

use evitaql_parser::cli::{
    build_arguments, execute_check, get_keyword_category, get_keywords_overview, literal_argument,
    named_argument, CheckOptions, CliError, Unit,
};
use evitaql_parser::{Arguments, ErrorKind, Range, Value};
use pretty_assertions::assert_eq;

fn check(query: &str, unit: Unit, arguments: Arguments) -> Result<String, CliError> {
    execute_check(&CheckOptions {
        query: query.to_string(),
        unit,
        arguments,
        ..Default::default()
    })
    .map(|result| result.render(false))
}

// ============================================================================
// Arguments
// ============================================================================

#[test]
fn test_json_array_is_positional() {
    let args = build_arguments(Some(r#"[10, "abc", [1, 2]]"#), &[], &[]).unwrap();
    assert_eq!(
        args,
        Arguments::positional([
            Value::Int(10),
            Value::from("abc"),
            Value::Multiple(vec![Value::Int(1), Value::Int(2)]),
        ])
    );
}

#[test]
fn test_json_object_is_named() {
    let args = build_arguments(Some(r#"{"code": "abc", "visible": true}"#), &[], &[]).unwrap();
    assert_eq!(
        args,
        Arguments::named([
            ("code", Value::from("abc")),
            ("visible", Value::Boolean(true)),
        ])
    );
}

#[test]
fn test_json_rejections() {
    assert!(matches!(
        build_arguments(Some("[null]"), &[], &[]),
        Err(CliError::Argument(_))
    ));
    assert!(matches!(
        build_arguments(Some("5"), &[], &[]),
        Err(CliError::Argument(_))
    ));
    assert!(matches!(
        build_arguments(Some("[1,"), &[], &[]),
        Err(CliError::Json(_))
    ));
}

#[test]
fn test_literal_arguments() {
    assert_eq!(literal_argument("'abc'").unwrap(), Value::from("abc"));
    assert_eq!(
        literal_argument("[1,5]").unwrap(),
        Value::IntRange(Range::between(1, 5))
    );
    assert!(matches!(literal_argument("abc"), Err(CliError::Parse { .. })));
}

#[test]
fn test_named_argument() {
    assert_eq!(
        named_argument("code = 'abc'").unwrap(),
        ("code".to_string(), Value::from("abc"))
    );
    assert!(matches!(named_argument("code"), Err(CliError::Argument(_))));
    assert!(matches!(named_argument("my-code=1"), Err(CliError::Argument(_))));
    assert!(matches!(named_argument("=1"), Err(CliError::Argument(_))));
}

#[test]
fn test_positional_args_follow_json() {
    let args = build_arguments(
        Some("[1]"),
        &["2".to_string()],
        &["x='y'".to_string()],
    )
    .unwrap();
    assert_eq!(
        args,
        Arguments::positional([1, 2]).with_named("x", "y")
    );
}

// ============================================================================
// Check
// ============================================================================

#[test]
fn test_check_query_with_arguments() {
    let args = build_arguments(None, &["10".to_string(), "20".to_string()], &[]).unwrap();
    assert_eq!(
        check("query(collection('p'), filterBy(priceBetween(?, ?)))", Unit::Query, args).unwrap(),
        "query(collection('p'),filterBy(priceBetween(10,20)))"
    );
}

#[test]
fn test_check_value_unit() {
    assert_eq!(check("{1, 2}", Unit::Value, Arguments::new()).unwrap(), "{1,2}");
}

#[test]
fn test_check_order_unit() {
    assert_eq!(
        check("random(), priceNatural()", Unit::Order, Arguments::new()).unwrap(),
        "random(),priceNatural(ASC)"
    );
}

#[test]
fn test_parse_error_reports_line_and_column() {
    let text = "query(\n  collection('a'),\n  bogus('x')\n)";
    let err = check(text, Unit::Query, Arguments::new()).unwrap_err();
    match &err {
        CliError::Parse { error, position } => {
            assert_eq!(error.kind(), ErrorKind::Syntax);
            assert_eq!((position.line, position.column), (3, 3));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Parse error (line 3, column 3): "));
}

// ============================================================================
// Keywords
// ============================================================================

#[test]
fn test_keywords_overview() {
    let overview = get_keywords_overview();
    assert!(overview.starts_with("EVITAQL KEYWORDS\n"));
    assert!(overview.contains("hierarchyWithin"));
    assert!(overview.contains("SHAPES"));
}

#[test]
fn test_keywords_category() {
    let listing = get_keyword_category("head").unwrap();
    assert!(listing.starts_with("HEAD\n"));
    assert!(listing.contains("collection"));
    assert!(get_keyword_category("nope").is_err());
}

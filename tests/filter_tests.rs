// tests/filter_tests.rs

use evitaql_parser::ast::AttributeSpecialValue;
use evitaql_parser::{
    parse_filter_list, to_evitaql, Arguments, ErrorKind, FilterConstraint, HierarchySpecification,
    ParseError, Range, Value,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn filter(text: &str) -> FilterConstraint {
    let mut list = parse_filter_list(text, &Arguments::new()).unwrap();
    assert_eq!(list.len(), 1, "expected a single constraint in {}", text);
    list.remove(0)
}

fn filter_error(text: &str) -> ParseError {
    parse_filter_list(text, &Arguments::new()).unwrap_err()
}

fn equals(attribute: &str, value: impl Into<Value>) -> FilterConstraint {
    FilterConstraint::AttributeEquals {
        attribute: attribute.to_string(),
        value: value.into(),
    }
}

// ============================================================================
// Logical containers
// ============================================================================

#[test]
fn test_and_or_not() {
    assert_eq!(
        filter("and(attributeEquals('a', 1), or(attributeEquals('b', 2), not(attributeEquals('c', 3))))"),
        FilterConstraint::And(vec![
            equals("a", 1),
            FilterConstraint::Or(vec![
                equals("b", 2),
                FilterConstraint::Not(Box::new(equals("c", 3))),
            ]),
        ])
    );
}

#[test]
fn test_empty_containers() {
    assert_eq!(filter("and()"), FilterConstraint::And(vec![]));
    assert_eq!(filter("or()"), FilterConstraint::Or(vec![]));
    assert_eq!(filter("userFilter()"), FilterConstraint::UserFilter(vec![]));
}

#[test]
fn test_filter_by_needs_a_child() {
    assert_eq!(filter_error("filterBy()").kind(), ErrorKind::Syntax);
}

#[test]
fn test_not_takes_exactly_one_child() {
    assert_eq!(filter_error("not()").kind(), ErrorKind::Syntax);
    assert_eq!(
        filter_error("not(attributeEquals('a', 1), attributeEquals('b', 2))").kind(),
        ErrorKind::Syntax
    );
}

#[test]
fn test_containers_reject_values() {
    let err = filter_error("and(attributeEquals('a', 1), 5)");
    assert!(matches!(err, ParseError::Syntax { offset: 29, .. }));
}

#[test]
fn test_entity_having() {
    assert_eq!(
        filter("entityHaving(attributeEquals('code', 'x'))"),
        FilterConstraint::EntityHaving(Box::new(equals("code", "x")))
    );
}

// ============================================================================
// Attribute constraints
// ============================================================================

#[test]
fn test_comparisons() {
    assert!(matches!(
        filter("attributeGreaterThan('stock', 5)"),
        FilterConstraint::AttributeGreaterThan { value: Value::Int(5), .. }
    ));
    assert!(matches!(
        filter("attributeLessThanEquals('weight', 1.5)"),
        FilterConstraint::AttributeLessThanEquals { value: Value::Float(_), .. }
    ));
}

#[test]
fn test_boolean_sugar_expands() {
    assert_eq!(filter("attributeEqualsTrue('visible')"), equals("visible", true));
    assert_eq!(filter("attributeEqualsFalse('visible')"), equals("visible", false));
}

#[test]
fn test_attribute_is() {
    let expected = FilterConstraint::AttributeIs {
        attribute: "ean".to_string(),
        special: AttributeSpecialValue::NotNull,
    };
    assert_eq!(filter("attributeIs('ean', NOT_NULL)"), expected);
    assert_eq!(filter("attributeIsNotNull('ean')"), expected);
    assert!(matches!(
        filter("attributeIsNull('ean')"),
        FilterConstraint::AttributeIs { special: AttributeSpecialValue::Null, .. }
    ));
    assert_eq!(filter_error("attributeIs('ean', MAYBE)").kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_between() {
    assert_eq!(
        filter("attributeBetween('stock', 1, 100)"),
        FilterConstraint::AttributeBetween {
            attribute: "stock".to_string(),
            from: Value::Int(1),
            to: Value::Int(100),
        }
    );
    assert_eq!(
        filter_error("attributeBetween('stock', {1, 2}, 3)").kind(),
        ErrorKind::TypeMismatch
    );
}

#[test]
fn test_in_set() {
    assert_eq!(
        filter("attributeInSet('code', 'a', 'b')"),
        FilterConstraint::AttributeInSet {
            attribute: "code".to_string(),
            values: vec![Value::from("a"), Value::from("b")],
        }
    );
    assert_eq!(
        filter("attributeInSet('code', {'a', 'b'})"),
        filter("attributeInSet('code', 'a', 'b')")
    );
}

#[test]
fn test_in_set_needs_a_value() {
    match filter_error("attributeInSet('code')") {
        ParseError::Syntax { expected, .. } => {
            assert_eq!(expected, "argument `values` of `attributeInSet`")
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_text_constraints_need_strings() {
    assert!(matches!(
        filter("attributeStartsWith('name', 'Sam')"),
        FilterConstraint::AttributeStartsWith { ref text, .. } if text == "Sam"
    ));
    match filter_error("attributeContains('name', 5)") {
        ParseError::TypeMismatch { slot, expected, actual, .. } => {
            assert_eq!(slot, "attributeContains.text");
            assert_eq!(expected, "string");
            assert_eq!(actual, "integer");
        }
        other => panic!("expected type mismatch, got {:?}", other),
    }
}

#[test]
fn test_in_range_point() {
    assert!(matches!(
        filter("attributeInRange('validity', 2021-01-01T00:00:00+01:00)"),
        FilterConstraint::AttributeInRange { value: Value::OffsetDateTime(_), .. }
    ));
    assert!(matches!(
        filter("attributeInRange('age', 18)"),
        FilterConstraint::AttributeInRange { value: Value::Int(18), .. }
    ));
    assert_eq!(filter_error("attributeInRange('age', 'x')").kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_in_range_bounds() {
    assert_eq!(
        filter("attributeInRange('age', 1, null)"),
        FilterConstraint::AttributeInRange {
            attribute: "age".to_string(),
            value: Value::IntRange(Range::since(1)),
        }
    );
    assert_eq!(
        filter("attributeInRange('age', [1, 5])"),
        filter("attributeInRange('age', 1, 5)")
    );
    assert_eq!(
        filter_error("attributeInRange('age', null, null)").kind(),
        ErrorKind::TypeMismatch
    );
    assert_eq!(filter_error("attributeInRange('age', null)").kind(), ErrorKind::Syntax);
}

#[test]
fn test_in_range_now() {
    assert_eq!(
        filter("attributeInRangeNow('validity')"),
        FilterConstraint::AttributeInRangeNow {
            attribute: "validity".to_string()
        }
    );
}

// ============================================================================
// Entity and price constraints
// ============================================================================

#[test]
fn test_primary_keys() {
    assert_eq!(
        filter("entityPrimaryKeyInSet(1, 2, 3)"),
        FilterConstraint::EntityPrimaryKeyInSet(vec![1, 2, 3])
    );
    assert_eq!(filter("entityPrimaryKeyInSet()"), FilterConstraint::EntityPrimaryKeyInSet(vec![]));
    assert_eq!(filter_error("entityPrimaryKeyInSet(1.5)").kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_locale() {
    assert_eq!(
        filter("entityLocaleEquals('cs-CZ')"),
        FilterConstraint::EntityLocaleEquals("cs-CZ".to_string())
    );
    match filter_error("entityLocaleEquals('not a locale')") {
        ParseError::TypeMismatch { actual, .. } => assert_eq!(actual, "'not a locale'"),
        other => panic!("expected type mismatch, got {:?}", other),
    }
}

#[test]
fn test_currency() {
    assert_eq!(
        filter("priceInCurrency('CZK')"),
        FilterConstraint::PriceInCurrency("CZK".to_string())
    );
    assert_eq!(filter_error("priceInCurrency('czk')").kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_price_lists() {
    assert_eq!(
        filter("priceInPriceLists('vip', 'basic')"),
        FilterConstraint::PriceInPriceLists(vec!["vip".to_string(), "basic".to_string()])
    );
}

#[test]
fn test_price_valid_in() {
    assert!(matches!(
        filter("priceValidIn(2021-01-01T00:00:00+01:00)"),
        FilterConstraint::PriceValidIn(_)
    ));
    assert_eq!(filter_error("priceValidIn(2021-01-01)").kind(), ErrorKind::TypeMismatch);
    assert_eq!(filter("priceValidInNow()"), FilterConstraint::PriceValidInNow);
}

#[test]
fn test_price_between_widens_integers() {
    assert_eq!(
        filter("priceBetween(10, 20.5)"),
        FilterConstraint::PriceBetween {
            from: Decimal::from(10),
            to: Decimal::new(205, 1),
        }
    );
    assert_eq!(filter_error("priceBetween('a', 20)").kind(), ErrorKind::TypeMismatch);
}

// ============================================================================
// References and hierarchy
// ============================================================================

#[test]
fn test_facet_having() {
    assert_eq!(
        filter("facetHaving('brand', entityPrimaryKeyInSet(1, 2))"),
        FilterConstraint::FacetHaving {
            reference: "brand".to_string(),
            children: vec![FilterConstraint::EntityPrimaryKeyInSet(vec![1, 2])],
        }
    );
    assert_eq!(filter_error("facetHaving('brand')").kind(), ErrorKind::Syntax);
}

#[test]
fn test_reference_having() {
    assert_eq!(
        filter("referenceHaving('brand')"),
        FilterConstraint::ReferenceHaving {
            reference: "brand".to_string(),
            filter: None,
        }
    );
    assert_eq!(
        filter("referenceHaving('brand', attributeEqualsTrue('primary'))"),
        FilterConstraint::ReferenceHaving {
            reference: "brand".to_string(),
            filter: Some(Box::new(equals("primary", true))),
        }
    );
}

#[test]
fn test_hierarchy_within() {
    assert_eq!(
        filter(
            "hierarchyWithin('categories', attributeEquals('code', 'shoes'), excludingRoot(), having(attributeEqualsTrue('visible')))"
        ),
        FilterConstraint::HierarchyWithin {
            reference: Some("categories".to_string()),
            parent: Box::new(equals("code", "shoes")),
            specifications: vec![
                HierarchySpecification::ExcludingRoot,
                HierarchySpecification::Having(vec![equals("visible", true)]),
            ],
        }
    );
}

#[test]
fn test_hierarchy_within_self() {
    assert_eq!(
        filter("hierarchyWithinSelf(entityPrimaryKeyInSet(1), directRelation())"),
        FilterConstraint::HierarchyWithin {
            reference: None,
            parent: Box::new(FilterConstraint::EntityPrimaryKeyInSet(vec![1])),
            specifications: vec![HierarchySpecification::DirectRelation],
        }
    );
}

#[test]
fn test_hierarchy_within_root() {
    assert_eq!(
        filter("hierarchyWithinRoot('categories', excluding(entityPrimaryKeyInSet(5)))"),
        FilterConstraint::HierarchyWithinRoot {
            reference: Some("categories".to_string()),
            specifications: vec![HierarchySpecification::Excluding(vec![
                FilterConstraint::EntityPrimaryKeyInSet(vec![5])
            ])],
        }
    );
    assert_eq!(
        filter("hierarchyWithinRootSelf()"),
        FilterConstraint::HierarchyWithinRoot {
            reference: None,
            specifications: vec![],
        }
    );
}

#[test]
fn test_hierarchy_specification_outside_hierarchy() {
    assert_eq!(filter_error("directRelation()").kind(), ErrorKind::Syntax);
    assert_eq!(
        filter_error("hierarchyWithinRootSelf(attributeEquals('a', 1))").kind(),
        ErrorKind::Syntax
    );
}

// ============================================================================
// Shape errors
// ============================================================================

#[test]
fn test_missing_argument_names_slot() {
    match filter_error("attributeEquals('code')") {
        ParseError::Syntax { offset, expected, found } => {
            assert_eq!(offset, 22);
            assert_eq!(expected, "argument `value` of `attributeEquals`");
            assert_eq!(found, "`)`");
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_surplus_argument() {
    assert_eq!(filter_error("attributeEquals('code', 1, 2)").kind(), ErrorKind::Syntax);
}

#[test]
fn test_constraint_of_other_category() {
    match filter_error("page(1, 20)") {
        ParseError::Syntax { found, .. } => assert_eq!(found, "require constraint `page`"),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_unknown_constraint() {
    match filter_error("attributeEqualz('a', 1)") {
        ParseError::Syntax { offset, found, .. } => {
            assert_eq!(offset, 0);
            assert_eq!(found, "unknown constraint `attributeEqualz`");
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

// ============================================================================
// Printing
// ============================================================================

#[test]
fn test_round_trip() {
    let texts = [
        "attributeEquals('code','abc')",
        "attributeIs('ean',NULL)",
        "attributeInRange('age',[1,])",
        "priceBetween(10.0,20.5)",
        "hierarchyWithin('categories',entityPrimaryKeyInSet(1),directRelation())",
        "facetHaving('brand',entityPrimaryKeyInSet(1,2))",
        "and()",
    ];
    for text in texts {
        let parsed = filter(text);
        assert_eq!(to_evitaql(&parsed), text);
        assert_eq!(filter(&to_evitaql(&parsed)), parsed);
    }
}

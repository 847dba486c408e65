// tests/require_tests.rs

use evitaql_parser::ast::{
    EmptyHierarchicalEntityBehaviour, FacetStatisticsDepth, OrderDirection, PriceContentMode,
    QueryPriceMode, StatisticsBase, StatisticsType,
};
use evitaql_parser::{
    parse_require_list, to_evitaql, Arguments, EntityContent, EntityFetch, ErrorKind,
    FacetSummary, FilterConstraint, HierarchyOutputRequire, HierarchyRequire, OrderConstraint,
    ParseError, ReferenceContent, RequireConstraint, Siblings, StopAt, Value,
};
use pretty_assertions::assert_eq;

fn require(text: &str) -> RequireConstraint {
    let mut list = parse_require_list(text, &Arguments::new()).unwrap();
    assert_eq!(list.len(), 1, "expected a single constraint in {}", text);
    list.remove(0)
}

fn require_error(text: &str) -> ParseError {
    parse_require_list(text, &Arguments::new()).unwrap_err()
}

fn attributes(names: &[&str]) -> EntityContent {
    EntityContent::AttributeContent(names.iter().map(|n| n.to_string()).collect())
}

fn filter_by(child: FilterConstraint) -> Option<Box<FilterConstraint>> {
    Some(Box::new(FilterConstraint::FilterBy(vec![child])))
}

fn pk_in_set(keys: &[i64]) -> FilterConstraint {
    FilterConstraint::EntityPrimaryKeyInSet(keys.to_vec())
}

// ============================================================================
// Paging and fetching
// ============================================================================

#[test]
fn test_require_container() {
    assert_eq!(
        require("require(page(1, 20), entityFetch(attributeContentAll(), priceContentRespectingFilter('basic')))"),
        RequireConstraint::Require(vec![
            RequireConstraint::Page { number: 1, size: 20 },
            RequireConstraint::EntityFetch(EntityFetch::new(vec![
                attributes(&[]),
                EntityContent::PriceContent {
                    mode: PriceContentMode::RespectingFilter,
                    price_lists: vec!["basic".to_string()],
                },
            ])),
        ])
    );
    assert_eq!(require("require()"), RequireConstraint::Require(vec![]));
}

#[test]
fn test_page_and_strip() {
    assert_eq!(
        require("strip(0, 10)"),
        RequireConstraint::Strip { offset: 0, limit: 10 }
    );
    assert_eq!(require_error("page('a', 20)").kind(), ErrorKind::TypeMismatch);
    match require_error("page(1)") {
        ParseError::Syntax { expected, .. } => {
            assert_eq!(expected, "argument `pageSize` of `page`")
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_content_shorthands() {
    assert_eq!(require("attributeContent()"), require("attributeContentAll()"));
    assert_eq!(
        require("associatedDataContent('gallery', 'description')"),
        RequireConstraint::Content(EntityContent::AssociatedDataContent(vec![
            "gallery".to_string(),
            "description".to_string(),
        ]))
    );
    assert_eq!(
        require("priceContentAll()"),
        RequireConstraint::Content(EntityContent::PriceContent {
            mode: PriceContentMode::All,
            price_lists: vec![],
        })
    );
    assert_eq!(
        require("priceContent(NONE)"),
        RequireConstraint::Content(EntityContent::PriceContent {
            mode: PriceContentMode::None,
            price_lists: vec![],
        })
    );
}

#[test]
fn test_data_in_locales() {
    assert_eq!(
        require("dataInLocales('cs', 'en-US')"),
        RequireConstraint::Content(EntityContent::DataInLocales(vec![
            "cs".to_string(),
            "en-US".to_string(),
        ]))
    );
    assert_eq!(
        require("dataInLocalesAll()"),
        RequireConstraint::Content(EntityContent::DataInLocales(vec![]))
    );
    assert_eq!(require_error("dataInLocales('x y')").kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_entity_fetch_rejects_other_requirements() {
    assert_eq!(require_error("entityFetch(page(1, 20))").kind(), ErrorKind::Syntax);
}

#[test]
fn test_price_type() {
    assert_eq!(
        require("priceType(WITHOUT_TAX)"),
        RequireConstraint::PriceType(QueryPriceMode::WithoutTax)
    );
}

// ============================================================================
// References
// ============================================================================

#[test]
fn test_reference_content() {
    assert_eq!(
        require("referenceContent('brand', filterBy(entityPrimaryKeyInSet(1)), entityFetch(attributeContent('name')))"),
        RequireConstraint::Content(EntityContent::ReferenceContent(ReferenceContent {
            references: vec!["brand".to_string()],
            filter_by: filter_by(pk_in_set(&[1])),
            entity_fetch: Some(EntityFetch::new(vec![attributes(&["name"])])),
            ..Default::default()
        }))
    );
}

#[test]
fn test_reference_content_filter_needs_single_reference() {
    match require_error("referenceContent('brand', 'categories', filterBy(entityPrimaryKeyInSet(1)))") {
        ParseError::Syntax { offset, found, .. } => {
            assert_eq!(offset, 0);
            assert_eq!(found, "2 reference names");
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_reference_content_all() {
    assert_eq!(
        require("referenceContentAll(entityFetch(), entityGroupFetch(attributeContentAll()))"),
        RequireConstraint::Content(EntityContent::ReferenceContent(ReferenceContent {
            entity_fetch: Some(EntityFetch::default()),
            entity_group_fetch: Some(EntityFetch::new(vec![attributes(&[])])),
            ..Default::default()
        }))
    );
}

#[test]
fn test_reference_content_with_attributes() {
    assert_eq!(
        require("referenceContentWithAttributes('brand', attributeContent('order'))"),
        RequireConstraint::Content(EntityContent::ReferenceContent(ReferenceContent {
            references: vec!["brand".to_string()],
            attribute_content: Some(vec!["order".to_string()]),
            ..Default::default()
        }))
    );
    assert_eq!(
        require("referenceContentAllWithAttributes()"),
        RequireConstraint::Content(EntityContent::ReferenceContent(ReferenceContent {
            attribute_content: Some(vec![]),
            ..Default::default()
        }))
    );
}

// ============================================================================
// Facets and histograms
// ============================================================================

#[test]
fn test_facet_summary_defaults() {
    assert_eq!(
        require("facetSummary()"),
        RequireConstraint::FacetSummary(FacetSummary::default())
    );
}

#[test]
fn test_facet_summary() {
    assert_eq!(
        require("facetSummary(IMPACT, filterBy(attributeEqualsTrue('visible')), entityFetch(attributeContent('code')))"),
        RequireConstraint::FacetSummary(FacetSummary {
            depth: FacetStatisticsDepth::Impact,
            filter_by: filter_by(FilterConstraint::AttributeEquals {
                attribute: "visible".to_string(),
                value: Value::Boolean(true),
            }),
            entity_fetch: Some(EntityFetch::new(vec![attributes(&["code"])])),
            ..Default::default()
        })
    );
}

#[test]
fn test_facet_summary_of_reference() {
    assert_eq!(
        require("facetSummaryOfReference('brand', COUNTS, orderBy(attributeNatural('name')))"),
        RequireConstraint::FacetSummaryOfReference {
            reference: "brand".to_string(),
            summary: FacetSummary {
                order_by: Some(Box::new(OrderConstraint::OrderBy(vec![
                    OrderConstraint::AttributeNatural {
                        attribute: "name".to_string(),
                        direction: OrderDirection::Asc,
                    }
                ]))),
                ..Default::default()
            },
        }
    );
}

#[test]
fn test_facet_groups() {
    assert_eq!(
        require("facetGroupsConjunction('brand', filterBy(entityPrimaryKeyInSet(1, 2)))"),
        RequireConstraint::FacetGroupsConjunction {
            reference: "brand".to_string(),
            filter_by: filter_by(pk_in_set(&[1, 2])),
        }
    );
    assert_eq!(
        require("facetGroupsNegation('parameters')"),
        RequireConstraint::FacetGroupsNegation {
            reference: "parameters".to_string(),
            filter_by: None,
        }
    );
}

#[test]
fn test_histograms() {
    assert_eq!(
        require("attributeHistogram(20, 'width', 'height')"),
        RequireConstraint::AttributeHistogram {
            buckets: 20,
            attributes: vec!["width".to_string(), "height".to_string()],
        }
    );
    assert_eq!(require_error("attributeHistogram(20)").kind(), ErrorKind::Syntax);
    assert_eq!(
        require("priceHistogram(10)"),
        RequireConstraint::PriceHistogram { buckets: 10 }
    );
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn test_hierarchy_of_self() {
    assert_eq!(
        require("hierarchyOfSelf(fromRoot('megaMenu', entityFetch(attributeContent('code')), stopAt(level(2))))"),
        RequireConstraint::HierarchyOfSelf {
            order_by: None,
            requirements: vec![HierarchyRequire::FromRoot {
                output_name: "megaMenu".to_string(),
                entity_fetch: Some(EntityFetch::new(vec![attributes(&["code"])])),
                requirements: vec![HierarchyOutputRequire::StopAt(StopAt::Level(2))],
            }],
        }
    );
}

#[test]
fn test_hierarchy_needs_a_requirement() {
    assert_eq!(require_error("hierarchyOfSelf()").kind(), ErrorKind::Syntax);
}

#[test]
fn test_hierarchy_of_reference() {
    assert_eq!(
        require("hierarchyOfReference('categories', LEAVE_EMPTY, children('subcategories', statistics(CHILDREN_COUNT)))"),
        RequireConstraint::HierarchyOfReference {
            reference: "categories".to_string(),
            behaviour: EmptyHierarchicalEntityBehaviour::LeaveEmpty,
            order_by: None,
            requirements: vec![HierarchyRequire::Children {
                output_name: "subcategories".to_string(),
                entity_fetch: None,
                requirements: vec![HierarchyOutputRequire::Statistics {
                    base: StatisticsBase::WithoutUserFilter,
                    types: vec![StatisticsType::ChildrenCount],
                }],
            }],
        }
    );
}

#[test]
fn test_hierarchy_of_reference_defaults() {
    match require("hierarchyOfReference('categories', orderBy(attributeNatural('order')), fromRoot('menu'))") {
        RequireConstraint::HierarchyOfReference {
            behaviour, order_by, ..
        } => {
            assert_eq!(behaviour, EmptyHierarchicalEntityBehaviour::RemoveEmpty);
            assert!(order_by.is_some());
        }
        other => panic!("expected hierarchyOfReference, got {:?}", other),
    }
}

#[test]
fn test_from_node() {
    assert_eq!(
        require("hierarchyOfSelf(fromNode('sideMenu', node(filterBy(attributeEquals('code', 'portables'))), stopAt(distance(1))))"),
        RequireConstraint::HierarchyOfSelf {
            order_by: None,
            requirements: vec![HierarchyRequire::FromNode {
                output_name: "sideMenu".to_string(),
                node: Box::new(FilterConstraint::FilterBy(vec![FilterConstraint::AttributeEquals {
                    attribute: "code".to_string(),
                    value: Value::from("portables"),
                }])),
                entity_fetch: None,
                requirements: vec![HierarchyOutputRequire::StopAt(StopAt::Distance(1))],
            }],
        }
    );
    assert_eq!(
        require_error("hierarchyOfSelf(fromNode('sideMenu'))").kind(),
        ErrorKind::Syntax
    );
}

#[test]
fn test_siblings_and_parents() {
    assert_eq!(
        require("hierarchyOfSelf(parents('parents', siblings(entityFetch(attributeContentAll()))), siblings('siblings', statistics(COMPLETE_FILTER, QUERIED_ENTITY_COUNT)))"),
        RequireConstraint::HierarchyOfSelf {
            order_by: None,
            requirements: vec![
                HierarchyRequire::Parents {
                    output_name: "parents".to_string(),
                    entity_fetch: None,
                    siblings: Some(Siblings {
                        output_name: None,
                        entity_fetch: Some(EntityFetch::new(vec![attributes(&[])])),
                        requirements: vec![],
                    }),
                    requirements: vec![],
                },
                HierarchyRequire::Siblings(Siblings {
                    output_name: Some("siblings".to_string()),
                    entity_fetch: None,
                    requirements: vec![HierarchyOutputRequire::Statistics {
                        base: StatisticsBase::CompleteFilter,
                        types: vec![StatisticsType::QueriedEntityCount],
                    }],
                }),
            ],
        }
    );
}

#[test]
fn test_siblings_inside_parents_take_no_name() {
    let text = "hierarchyOfSelf(parents('p', siblings('s')))";
    let err = require_error(text);
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.offset(), text.find("'s'").unwrap());
    assert_eq!(
        to_evitaql(&require("hierarchyOfSelf(siblings('s'))")),
        "hierarchyOfSelf(siblings('s'))"
    );
}

#[test]
fn test_stop_at_node() {
    assert_eq!(
        require("hierarchyContent(stopAt(node(filterBy(attributeEqualsTrue('leaf')))))"),
        RequireConstraint::Content(EntityContent::HierarchyContent {
            stop_at: Some(StopAt::Node(Box::new(FilterConstraint::FilterBy(vec![
                FilterConstraint::AttributeEquals {
                    attribute: "leaf".to_string(),
                    value: Value::Boolean(true),
                }
            ])))),
            entity_fetch: None,
        })
    );
}

#[test]
fn test_hierarchy_parts_outside_hierarchy() {
    assert_eq!(require_error("stopAt(level(1))").kind(), ErrorKind::Syntax);
    assert_eq!(require_error("fromRoot('menu')").kind(), ErrorKind::Syntax);
}

#[test]
fn test_statistics_type_domain() {
    assert_eq!(
        require_error("hierarchyOfSelf(fromRoot('menu', statistics(LEAVE_EMPTY)))").kind(),
        ErrorKind::TypeMismatch
    );
}

#[test]
fn test_query_telemetry() {
    assert_eq!(require("queryTelemetry()"), RequireConstraint::QueryTelemetry);
}

// ============================================================================
// Printing
// ============================================================================

#[test]
fn test_optional_enums_printed() {
    assert_eq!(
        to_evitaql(&require("require(facetSummary(), hierarchyOfReference('c', fromRoot('m', statistics())))")),
        "require(facetSummary(COUNTS),hierarchyOfReference('c',REMOVE_EMPTY,fromRoot('m',statistics(WITHOUT_USER_FILTER))))"
    );
}

#[test]
fn test_round_trip() {
    let texts = [
        "require(page(1,20),entityFetch(attributeContentAll(),priceContent(RESPECTING_FILTER,'basic')))",
        "referenceContentWithAttributes('brand',filterBy(entityPrimaryKeyInSet(1)),attributeContent('order'))",
        "referenceContentWithAttributes('brand')",
        "facetSummaryOfReference('brand',IMPACT,entityGroupFetch(attributeContent('name')))",
        "hierarchyOfSelf(fromNode('side',node(filterBy(entityPrimaryKeyInSet(1))),stopAt(distance(2))))",
        "hierarchyOfSelf(parents('p',siblings(statistics(COMPLETE_FILTER,CHILDREN_COUNT))))",
        "dataInLocales('cs','en')",
    ];
    for text in texts {
        let parsed = require(text);
        assert_eq!(to_evitaql(&parsed), text);
        assert_eq!(require(&to_evitaql(&parsed)), parsed);
    }
}

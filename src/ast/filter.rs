use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use crate::ast::AttributeSpecialValue;
use crate::value::Value;

/// Filter constraint: decides which entities match.
///
/// Containers nest only filter constraints. Zero-child `and`, `or` and
/// `userFilter` are legal and distinct from having no filter at all; what an
/// empty group matches is left to the evaluation engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterConstraint {
    // Containers
    /// Root filter container
    ///
    /// # Example
    /// ```text
    /// filterBy(attributeEquals('code', 'abc'), priceBetween(10, 20))
    /// ```
    FilterBy(Vec<FilterConstraint>),

    /// Filter applied to facet groups
    FilterGroupBy(Vec<FilterConstraint>),

    And(Vec<FilterConstraint>),
    Or(Vec<FilterConstraint>),
    Not(Box<FilterConstraint>),

    /// Part of the filter controlled by the end user (facets)
    UserFilter(Vec<FilterConstraint>),

    /// Filter evaluated against a referenced entity
    EntityHaving(Box<FilterConstraint>),

    // Attribute comparisons
    /// # Example
    /// ```text
    /// attributeEquals('code', 'abc')
    /// attributeEqualsTrue('visible')
    /// ```
    AttributeEquals { attribute: String, value: Value },
    AttributeGreaterThan { attribute: String, value: Value },
    AttributeGreaterThanEquals { attribute: String, value: Value },
    AttributeLessThan { attribute: String, value: Value },
    AttributeLessThanEquals { attribute: String, value: Value },

    /// # Example
    /// ```text
    /// attributeBetween('stock', 1, 100)
    /// ```
    AttributeBetween {
        attribute: String,
        from: Value,
        to: Value,
    },

    AttributeInSet { attribute: String, values: Vec<Value> },
    AttributeContains { attribute: String, text: String },
    AttributeStartsWith { attribute: String, text: String },
    AttributeEndsWith { attribute: String, text: String },

    /// # Example
    /// ```text
    /// attributeIs('ean', NOT_NULL)
    /// attributeIsNull('ean')
    /// ```
    AttributeIs {
        attribute: String,
        special: AttributeSpecialValue,
    },

    /// Range attribute containing a point, or overlapping a range
    ///
    /// # Example
    /// ```text
    /// attributeInRange('age', 18)
    /// attributeInRange('validity', 2021-01-01T00:00:00+01:00, null)
    /// ```
    AttributeInRange { attribute: String, value: Value },

    AttributeInRangeNow { attribute: String },

    // Entity
    EntityPrimaryKeyInSet(Vec<i64>),
    EntityLocaleEquals(String),

    // Price
    PriceInCurrency(String),
    PriceInPriceLists(Vec<String>),
    PriceValidIn(DateTime<FixedOffset>),
    PriceValidInNow,

    /// Bounds are always decimal; integer arguments are widened.
    PriceBetween { from: Decimal, to: Decimal },

    // References and facets
    FacetHaving {
        reference: String,
        children: Vec<FilterConstraint>,
    },
    ReferenceHaving {
        reference: String,
        filter: Option<Box<FilterConstraint>>,
    },

    // Hierarchy
    /// Entities within the subtree of the nodes matched by `parent`
    ///
    /// `reference` is `None` for the `...Self` variants that query the
    /// hierarchy of the queried collection itself.
    ///
    /// # Example
    /// ```text
    /// hierarchyWithin('categories', attributeEquals('code', 'shoes'), excludingRoot())
    /// hierarchyWithinSelf(entityPrimaryKeyInSet(1), directRelation())
    /// ```
    HierarchyWithin {
        reference: Option<String>,
        parent: Box<FilterConstraint>,
        specifications: Vec<HierarchySpecification>,
    },

    HierarchyWithinRoot {
        reference: Option<String>,
        specifications: Vec<HierarchySpecification>,
    },
}

/// Refinement legal only inside the hierarchy filter constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum HierarchySpecification {
    DirectRelation,
    ExcludingRoot,
    Having(Vec<FilterConstraint>),
    Excluding(Vec<FilterConstraint>),
}

impl FilterConstraint {
    /// Keyword the constraint is written with.
    pub fn keyword(&self) -> &'static str {
        match self {
            FilterConstraint::FilterBy(_) => "filterBy",
            FilterConstraint::FilterGroupBy(_) => "filterGroupBy",
            FilterConstraint::And(_) => "and",
            FilterConstraint::Or(_) => "or",
            FilterConstraint::Not(_) => "not",
            FilterConstraint::UserFilter(_) => "userFilter",
            FilterConstraint::EntityHaving(_) => "entityHaving",
            FilterConstraint::AttributeEquals { .. } => "attributeEquals",
            FilterConstraint::AttributeGreaterThan { .. } => "attributeGreaterThan",
            FilterConstraint::AttributeGreaterThanEquals { .. } => "attributeGreaterThanEquals",
            FilterConstraint::AttributeLessThan { .. } => "attributeLessThan",
            FilterConstraint::AttributeLessThanEquals { .. } => "attributeLessThanEquals",
            FilterConstraint::AttributeBetween { .. } => "attributeBetween",
            FilterConstraint::AttributeInSet { .. } => "attributeInSet",
            FilterConstraint::AttributeContains { .. } => "attributeContains",
            FilterConstraint::AttributeStartsWith { .. } => "attributeStartsWith",
            FilterConstraint::AttributeEndsWith { .. } => "attributeEndsWith",
            FilterConstraint::AttributeIs { .. } => "attributeIs",
            FilterConstraint::AttributeInRange { .. } => "attributeInRange",
            FilterConstraint::AttributeInRangeNow { .. } => "attributeInRangeNow",
            FilterConstraint::EntityPrimaryKeyInSet(_) => "entityPrimaryKeyInSet",
            FilterConstraint::EntityLocaleEquals(_) => "entityLocaleEquals",
            FilterConstraint::PriceInCurrency(_) => "priceInCurrency",
            FilterConstraint::PriceInPriceLists(_) => "priceInPriceLists",
            FilterConstraint::PriceValidIn(_) => "priceValidIn",
            FilterConstraint::PriceValidInNow => "priceValidInNow",
            FilterConstraint::PriceBetween { .. } => "priceBetween",
            FilterConstraint::FacetHaving { .. } => "facetHaving",
            FilterConstraint::ReferenceHaving { .. } => "referenceHaving",
            FilterConstraint::HierarchyWithin { reference: Some(_), .. } => "hierarchyWithin",
            FilterConstraint::HierarchyWithin { reference: None, .. } => "hierarchyWithinSelf",
            FilterConstraint::HierarchyWithinRoot { reference: Some(_), .. } => "hierarchyWithinRoot",
            FilterConstraint::HierarchyWithinRoot { reference: None, .. } => {
                "hierarchyWithinRootSelf"
            }
        }
    }
}

use crate::ast::OrderDirection;
use crate::value::Value;

/// Order constraint: decides the sequence of matched entities.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderConstraint {
    /// Root order container
    ///
    /// # Example
    /// ```text
    /// orderBy(attributeNatural('name', DESC), random())
    /// ```
    OrderBy(Vec<OrderConstraint>),

    /// Ordering of facet groups
    OrderGroupBy(Vec<OrderConstraint>),

    /// Sort by an attribute, ascending unless stated otherwise
    ///
    /// # Example
    /// ```text
    /// attributeNatural('code')
    /// attributeNatural('priority', DESC)
    /// ```
    AttributeNatural {
        attribute: String,
        direction: OrderDirection,
    },

    /// Entities in the exact order of the listed attribute values
    AttributeSetExact { attribute: String, values: Vec<Value> },

    /// Order of the attribute values listed in the `attributeInSet` filter
    AttributeSetInFilter { attribute: String },

    EntityPrimaryKeyExact(Vec<i64>),
    EntityPrimaryKeyInFilter,

    /// Order by properties of the referenced entity
    EntityProperty(Vec<OrderConstraint>),

    PriceNatural(OrderDirection),
    Random,

    /// Order by attributes of the reference itself
    ///
    /// # Example
    /// ```text
    /// referenceProperty('brand', attributeNatural('order'))
    /// ```
    ReferenceProperty {
        reference: String,
        children: Vec<OrderConstraint>,
    },
}

impl OrderConstraint {
    pub fn keyword(&self) -> &'static str {
        match self {
            OrderConstraint::OrderBy(_) => "orderBy",
            OrderConstraint::OrderGroupBy(_) => "orderGroupBy",
            OrderConstraint::AttributeNatural { .. } => "attributeNatural",
            OrderConstraint::AttributeSetExact { .. } => "attributeSetExact",
            OrderConstraint::AttributeSetInFilter { .. } => "attributeSetInFilter",
            OrderConstraint::EntityPrimaryKeyExact(_) => "entityPrimaryKeyExact",
            OrderConstraint::EntityPrimaryKeyInFilter => "entityPrimaryKeyInFilter",
            OrderConstraint::EntityProperty(_) => "entityProperty",
            OrderConstraint::PriceNatural(_) => "priceNatural",
            OrderConstraint::Random => "random",
            OrderConstraint::ReferenceProperty { .. } => "referenceProperty",
        }
    }

    pub fn children(&self) -> &[OrderConstraint] {
        match self {
            OrderConstraint::OrderBy(c)
            | OrderConstraint::OrderGroupBy(c)
            | OrderConstraint::EntityProperty(c) => c,
            OrderConstraint::ReferenceProperty { children, .. } => children,
            _ => &[],
        }
    }
}

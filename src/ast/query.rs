use crate::ast::{FilterConstraint, HeadConstraint, OrderConstraint, RequireConstraint};

/// Complete query.
///
/// Every part is optional, but a parsed query always has at least one.
/// `filter_by` holds a [`FilterConstraint::FilterBy`], `order_by` an
/// [`OrderConstraint::OrderBy`] and `require` a [`RequireConstraint::Require`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    /// Target collection
    pub head: Option<HeadConstraint>,

    /// Root filter container
    pub filter_by: Option<FilterConstraint>,

    /// Root order container
    pub order_by: Option<OrderConstraint>,

    /// Root require container
    pub require: Option<RequireConstraint>,
}

impl Query {
    /// The targeted collection name, if any.
    pub fn collection(&self) -> Option<&str> {
        match &self.head {
            Some(HeadConstraint::Collection(name)) => Some(name),
            None => None,
        }
    }
}

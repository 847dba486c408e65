//! # evitaQL - Abstract Syntax Tree
//!
//! This module defines the typed tree a parsed evitaQL query is turned into.
//! The tree is built once per parse, owned by the caller and never mutated
//! afterwards.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[domain]** - Closed enum domains (`ASC`, `WITH_TAX`, ...)
//! - **[head]** - Head constraints (target collection)
//! - **[filter]** - Filter constraints (what matches)
//! - **[order]** - Order constraints (in which sequence)
//! - **[require]** - Require constraints (what is returned or computed)
//! - **[query]** - Complete query combining the four parts
//!
//! ## Quick Start
//!
//! ```text
//! query(
//!     collection('product'),
//!     filterBy(attributeEquals('code', 'abc'), priceBetween(10, 20)),
//!     orderBy(attributeNatural('name', DESC)),
//!     require(page(1, 20), entityFetch(attributeContentAll()))
//! )
//! ```
//!
//! ## Core Concepts
//!
//! ### Constraint Categories
//!
//! Each category is its own enumeration, so a filter container can only
//! ever hold filter constraints:
//!
//! - **Head** [`HeadConstraint`] - `collection`
//! - **Filter** [`FilterConstraint`] - `filterBy`, `and`, `attributeEquals`, ...
//! - **Order** [`OrderConstraint`] - `orderBy`, `attributeNatural`, ...
//! - **Require** [`RequireConstraint`] - `require`, `page`, `entityFetch`, ...
//!
//! Require constraints that embed a filter or an ordering (`facetSummary`,
//! `referenceContent`, `hierarchyOfReference`, ...) hold the nested
//! `filterBy`/`orderBy` container as a typed field.
//!
//! ### Arguments
//!
//! A constraint takes, in this order, classifiers (attribute, reference or
//! collection names), values (see [`Value`](crate::Value)) and nested
//! constraints. Values may be literals or parameters:
//!
//! ```text
//! attributeEquals('code', 'abc')
//! attributeEquals('code', ?)
//! attributeEquals('code', @code)
//! ```
//!
//! ### Sugar
//!
//! Some keywords are shorthands and build the same node as their expanded
//! form:
//!
//! ```text
//! attributeEqualsTrue('visible')   // attributeEquals('visible', true)
//! attributeIsNull('ean')           // attributeIs('ean', NULL)
//! attributeContent()               // attributeContentAll()
//! ```
pub mod domain;
pub mod filter;
pub mod head;
pub mod order;
pub mod query;
pub mod require;
pub mod tokens;

pub use domain::{
    AttributeSpecialValue, EmptyHierarchicalEntityBehaviour, FacetStatisticsDepth, KeywordEnum,
    OrderDirection, PriceContentMode, QueryPriceMode, StatisticsBase, StatisticsType,
};
pub use filter::{FilterConstraint, HierarchySpecification};
pub use head::HeadConstraint;
pub use order::OrderConstraint;
pub use query::Query;
pub use require::{
    EntityContent, EntityFetch, FacetSummary, HierarchyOutputRequire, HierarchyRequire,
    ReferenceContent, RequireConstraint, Siblings, StopAt,
};
pub use tokens::{SpannedToken, Token};

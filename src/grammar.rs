//! Keyword table of the language.
//!
//! Built once on first use and read-only afterwards. The parser consults it
//! to tell a misplaced constraint (a known keyword of another category) from
//! an unknown one; the `keywords` command lists it.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Constraint category a keyword belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Head,
    Filter,
    Order,
    Require,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Head,
        Category::Filter,
        Category::Order,
        Category::Require,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Head => "head",
            Category::Filter => "filter",
            Category::Order => "order",
            Category::Require => "require",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One constraint keyword and its argument shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub name: &'static str,
    pub category: Category,
    /// Argument shape in the notation `c` classifier, `v` value,
    /// `x?` optional, `x*` zero or more, `x+` one or more.
    pub shape: &'static str,
}

const fn keyword(name: &'static str, category: Category, shape: &'static str) -> Keyword {
    Keyword {
        name,
        category,
        shape,
    }
}

use Category::{Filter, Head, Order, Require};

pub static KEYWORDS: &[Keyword] = &[
    // head
    keyword("collection", Head, "(c)"),
    // filter containers
    keyword("filterBy", Filter, "(filter+)"),
    keyword("filterGroupBy", Filter, "(filter+)"),
    keyword("and", Filter, "(filter*)"),
    keyword("or", Filter, "(filter*)"),
    keyword("not", Filter, "(filter)"),
    keyword("userFilter", Filter, "(filter*)"),
    keyword("entityHaving", Filter, "(filter)"),
    // attribute filters
    keyword("attributeEquals", Filter, "(c, v)"),
    keyword("attributeGreaterThan", Filter, "(c, v)"),
    keyword("attributeGreaterThanEquals", Filter, "(c, v)"),
    keyword("attributeLessThan", Filter, "(c, v)"),
    keyword("attributeLessThanEquals", Filter, "(c, v)"),
    keyword("attributeBetween", Filter, "(c, v, v)"),
    keyword("attributeInSet", Filter, "(c, v+)"),
    keyword("attributeContains", Filter, "(c, string)"),
    keyword("attributeStartsWith", Filter, "(c, string)"),
    keyword("attributeEndsWith", Filter, "(c, string)"),
    keyword("attributeEqualsTrue", Filter, "(c)"),
    keyword("attributeEqualsFalse", Filter, "(c)"),
    keyword("attributeIs", Filter, "(c, NULL|NOT_NULL)"),
    keyword("attributeIsNull", Filter, "(c)"),
    keyword("attributeIsNotNull", Filter, "(c)"),
    keyword("attributeInRange", Filter, "(c, v) | (c, v, v)"),
    keyword("attributeInRangeNow", Filter, "(c)"),
    // entity filters
    keyword("entityPrimaryKeyInSet", Filter, "(int*)"),
    keyword("entityLocaleEquals", Filter, "(locale)"),
    // price filters
    keyword("priceInCurrency", Filter, "(currency)"),
    keyword("priceInPriceLists", Filter, "(c*)"),
    keyword("priceValidIn", Filter, "(offsetDateTime)"),
    keyword("priceValidInNow", Filter, "()"),
    keyword("priceBetween", Filter, "(number, number)"),
    // reference filters
    keyword("facetHaving", Filter, "(c, filter+)"),
    keyword("referenceHaving", Filter, "(c, filter?)"),
    // hierarchy filters
    keyword("hierarchyWithin", Filter, "(c, filter, spec*)"),
    keyword("hierarchyWithinSelf", Filter, "(filter, spec*)"),
    keyword("hierarchyWithinRoot", Filter, "(c, spec*)"),
    keyword("hierarchyWithinRootSelf", Filter, "(spec*)"),
    keyword("directRelation", Filter, "()"),
    keyword("excludingRoot", Filter, "()"),
    keyword("having", Filter, "(filter+)"),
    keyword("excluding", Filter, "(filter+)"),
    // order
    keyword("orderBy", Order, "(order*)"),
    keyword("orderGroupBy", Order, "(order*)"),
    keyword("attributeNatural", Order, "(c, ASC|DESC?)"),
    keyword("attributeSetExact", Order, "(c, v+)"),
    keyword("attributeSetInFilter", Order, "(c)"),
    keyword("entityPrimaryKeyExact", Order, "(int+)"),
    keyword("entityPrimaryKeyInFilter", Order, "()"),
    keyword("entityProperty", Order, "(order+)"),
    keyword("priceNatural", Order, "(ASC|DESC?)"),
    keyword("random", Order, "()"),
    keyword("referenceProperty", Order, "(c, order+)"),
    // require
    keyword("require", Require, "(require*)"),
    keyword("page", Require, "(int, int)"),
    keyword("strip", Require, "(int, int)"),
    keyword("entityFetch", Require, "(content*)"),
    keyword("entityGroupFetch", Require, "(content*)"),
    keyword("attributeContent", Require, "(c*)"),
    keyword("attributeContentAll", Require, "()"),
    keyword("associatedDataContent", Require, "(c*)"),
    keyword("associatedDataContentAll", Require, "()"),
    keyword("priceContent", Require, "(NONE|RESPECTING_FILTER|ALL, string*)"),
    keyword("priceContentAll", Require, "()"),
    keyword("priceContentRespectingFilter", Require, "(string*)"),
    keyword("dataInLocales", Require, "(locale*)"),
    keyword("dataInLocalesAll", Require, "()"),
    keyword("hierarchyContent", Require, "(stopAt?, entityFetch?)"),
    keyword(
        "referenceContent",
        Require,
        "(c*, filterBy?, orderBy?, entityFetch?, entityGroupFetch?)",
    ),
    keyword("referenceContentAll", Require, "(entityFetch?, entityGroupFetch?)"),
    keyword(
        "referenceContentWithAttributes",
        Require,
        "(c, filterBy?, orderBy?, attributeContent?, entityFetch?, entityGroupFetch?)",
    ),
    keyword(
        "referenceContentAllWithAttributes",
        Require,
        "(attributeContent?, entityFetch?, entityGroupFetch?)",
    ),
    keyword("priceType", Require, "(WITH_TAX|WITHOUT_TAX)"),
    keyword(
        "facetSummary",
        Require,
        "(COUNTS|IMPACT?, filterBy?, filterGroupBy?, orderBy?, orderGroupBy?, entityFetch?, entityGroupFetch?)",
    ),
    keyword(
        "facetSummaryOfReference",
        Require,
        "(c, COUNTS|IMPACT?, filterBy?, filterGroupBy?, orderBy?, orderGroupBy?, entityFetch?, entityGroupFetch?)",
    ),
    keyword("facetGroupsConjunction", Require, "(c, filterBy?)"),
    keyword("facetGroupsDisjunction", Require, "(c, filterBy?)"),
    keyword("facetGroupsNegation", Require, "(c, filterBy?)"),
    keyword("attributeHistogram", Require, "(int, c+)"),
    keyword("priceHistogram", Require, "(int)"),
    keyword("hierarchyOfSelf", Require, "(orderBy?, hierarchy+)"),
    keyword(
        "hierarchyOfReference",
        Require,
        "(c, LEAVE_EMPTY|REMOVE_EMPTY?, orderBy?, hierarchy+)",
    ),
    keyword("fromRoot", Require, "(c, entityFetch?, output*)"),
    keyword("fromNode", Require, "(c, node, entityFetch?, output*)"),
    keyword("children", Require, "(c, entityFetch?, output*)"),
    keyword("siblings", Require, "(c?, entityFetch?, output*)"),
    keyword("parents", Require, "(c, entityFetch?, siblings?, output*)"),
    keyword("node", Require, "(filterBy)"),
    keyword("stopAt", Require, "(distance|level|node)"),
    keyword("distance", Require, "(int)"),
    keyword("level", Require, "(int)"),
    keyword(
        "statistics",
        Require,
        "(COMPLETE_FILTER|WITHOUT_USER_FILTER?, CHILDREN_COUNT|QUERIED_ENTITY_COUNT*)",
    ),
    keyword("queryTelemetry", Require, "()"),
];

static INDEX: LazyLock<HashMap<&'static str, &'static Keyword>> =
    LazyLock::new(|| KEYWORDS.iter().map(|k| (k.name, k)).collect());

/// Looks up a keyword by its exact, case-sensitive name.
pub fn lookup(name: &str) -> Option<&'static Keyword> {
    INDEX.get(name).copied()
}

pub fn category_of(name: &str) -> Option<Category> {
    lookup(name).map(|k| k.category)
}

/// All keywords of one category, in table order.
pub fn keywords_in(category: Category) -> impl Iterator<Item = &'static Keyword> {
    KEYWORDS.iter().filter(move |k| k.category == category)
}

use crate::ast::{
    EmptyHierarchicalEntityBehaviour, FacetStatisticsDepth, FilterConstraint, OrderConstraint,
    PriceContentMode, QueryPriceMode, StatisticsBase, StatisticsType,
};

/// Require constraint: shapes what is returned or computed for the matched
/// entities, never what is matched.
///
/// Nested `filterBy`, `filterGroupBy`, `orderBy` and `orderGroupBy` slots
/// hold the container constraint itself (for example
/// [`FilterConstraint::FilterBy`]), so they print back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum RequireConstraint {
    /// Root require container
    ///
    /// # Example
    /// ```text
    /// require(page(1, 20), entityFetch(attributeContentAll()))
    /// ```
    Require(Vec<RequireConstraint>),

    /// One-based page number and page size
    Page { number: i64, size: i64 },

    /// Offset and limit
    Strip { offset: i64, limit: i64 },

    /// Body of the returned entities
    ///
    /// # Example
    /// ```text
    /// entityFetch(attributeContent('code', 'name'), priceContentAll())
    /// ```
    EntityFetch(EntityFetch),

    /// Body of the returned reference groups
    EntityGroupFetch(EntityFetch),

    /// Entity content requested directly in `require`
    Content(EntityContent),

    PriceType(QueryPriceMode),

    /// Facet summary over all references
    ///
    /// # Example
    /// ```text
    /// facetSummary(IMPACT, filterBy(attributeEquals('visible', true)))
    /// ```
    FacetSummary(FacetSummary),

    FacetSummaryOfReference {
        reference: String,
        summary: FacetSummary,
    },

    FacetGroupsConjunction {
        reference: String,
        filter_by: Option<Box<FilterConstraint>>,
    },
    FacetGroupsDisjunction {
        reference: String,
        filter_by: Option<Box<FilterConstraint>>,
    },
    FacetGroupsNegation {
        reference: String,
        filter_by: Option<Box<FilterConstraint>>,
    },

    /// # Example
    /// ```text
    /// attributeHistogram(20, 'width', 'height')
    /// ```
    AttributeHistogram { buckets: i64, attributes: Vec<String> },
    PriceHistogram { buckets: i64 },

    /// Hierarchy of the queried collection itself
    ///
    /// # Example
    /// ```text
    /// hierarchyOfSelf(fromRoot('megaMenu', entityFetch(attributeContent('code'))))
    /// ```
    HierarchyOfSelf {
        order_by: Option<Box<OrderConstraint>>,
        requirements: Vec<HierarchyRequire>,
    },

    /// Hierarchy of a referenced collection
    ///
    /// # Example
    /// ```text
    /// hierarchyOfReference('categories', LEAVE_EMPTY, children('subcategories'))
    /// ```
    HierarchyOfReference {
        reference: String,
        behaviour: EmptyHierarchicalEntityBehaviour,
        order_by: Option<Box<OrderConstraint>>,
        requirements: Vec<HierarchyRequire>,
    },

    QueryTelemetry,
}

/// Content requirements of `entityFetch` and `entityGroupFetch`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityFetch {
    pub requirements: Vec<EntityContent>,
}

impl EntityFetch {
    pub fn new(requirements: Vec<EntityContent>) -> Self {
        EntityFetch { requirements }
    }
}

/// Part of an entity body to fetch.
///
/// Empty name lists mean "all": `attributeContent()` and
/// `attributeContentAll()` build the same node.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityContent {
    AttributeContent(Vec<String>),
    AssociatedDataContent(Vec<String>),
    PriceContent {
        mode: PriceContentMode,
        price_lists: Vec<String>,
    },
    ReferenceContent(ReferenceContent),
    HierarchyContent {
        stop_at: Option<StopAt>,
        entity_fetch: Option<EntityFetch>,
    },
    DataInLocales(Vec<String>),
}

/// Referenced entities to fetch along with the entity body.
///
/// `attribute_content` is `Some` for the `...WithAttributes` forms; an empty
/// list there means all attributes of the reference. `filter_by` and
/// `order_by` are only legal with exactly one reference name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceContent {
    pub references: Vec<String>,
    pub filter_by: Option<Box<FilterConstraint>>,
    pub order_by: Option<Box<OrderConstraint>>,
    pub attribute_content: Option<Vec<String>>,
    pub entity_fetch: Option<EntityFetch>,
    pub entity_group_fetch: Option<EntityFetch>,
}

impl ReferenceContent {
    pub fn keyword(&self) -> &'static str {
        match (self.references.is_empty(), self.attribute_content.is_some()) {
            (true, false) => "referenceContentAll",
            (false, false) => "referenceContent",
            (true, true) => "referenceContentAllWithAttributes",
            (false, true) => "referenceContentWithAttributes",
        }
    }
}

/// Arguments shared by `facetSummary` and `facetSummaryOfReference`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetSummary {
    pub depth: FacetStatisticsDepth,
    pub filter_by: Option<Box<FilterConstraint>>,
    pub filter_group_by: Option<Box<FilterConstraint>>,
    pub order_by: Option<Box<OrderConstraint>>,
    pub order_group_by: Option<Box<OrderConstraint>>,
    pub entity_fetch: Option<EntityFetch>,
    pub entity_group_fetch: Option<EntityFetch>,
}

/// One named output of `hierarchyOfSelf` / `hierarchyOfReference`.
#[derive(Debug, Clone, PartialEq)]
pub enum HierarchyRequire {
    /// # Example
    /// ```text
    /// fromRoot('megaMenu', stopAt(level(2)))
    /// ```
    FromRoot {
        output_name: String,
        entity_fetch: Option<EntityFetch>,
        requirements: Vec<HierarchyOutputRequire>,
    },

    /// # Example
    /// ```text
    /// fromNode('sideMenu', node(filterBy(attributeEquals('code', 'portables'))))
    /// ```
    FromNode {
        output_name: String,
        /// The `filterBy` container selecting the pivot node
        node: Box<FilterConstraint>,
        entity_fetch: Option<EntityFetch>,
        requirements: Vec<HierarchyOutputRequire>,
    },

    Children {
        output_name: String,
        entity_fetch: Option<EntityFetch>,
        requirements: Vec<HierarchyOutputRequire>,
    },

    Siblings(Siblings),

    Parents {
        output_name: String,
        entity_fetch: Option<EntityFetch>,
        siblings: Option<Siblings>,
        requirements: Vec<HierarchyOutputRequire>,
    },
}

/// `siblings(...)`, named at the top level and unnamed inside `parents`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Siblings {
    pub output_name: Option<String>,
    pub entity_fetch: Option<EntityFetch>,
    pub requirements: Vec<HierarchyOutputRequire>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HierarchyOutputRequire {
    StopAt(StopAt),
    /// # Example
    /// ```text
    /// statistics(COMPLETE_FILTER, CHILDREN_COUNT, QUERIED_ENTITY_COUNT)
    /// ```
    Statistics {
        base: StatisticsBase,
        types: Vec<StatisticsType>,
    },
}

/// Condition ending the traversal of a hierarchy output.
#[derive(Debug, Clone, PartialEq)]
pub enum StopAt {
    Distance(i64),
    Level(i64),
    /// Stop at nodes matching the `filterBy` container
    Node(Box<FilterConstraint>),
}

impl RequireConstraint {
    pub fn keyword(&self) -> &'static str {
        match self {
            RequireConstraint::Require(_) => "require",
            RequireConstraint::Page { .. } => "page",
            RequireConstraint::Strip { .. } => "strip",
            RequireConstraint::EntityFetch(_) => "entityFetch",
            RequireConstraint::EntityGroupFetch(_) => "entityGroupFetch",
            RequireConstraint::Content(content) => content.keyword(),
            RequireConstraint::PriceType(_) => "priceType",
            RequireConstraint::FacetSummary(_) => "facetSummary",
            RequireConstraint::FacetSummaryOfReference { .. } => "facetSummaryOfReference",
            RequireConstraint::FacetGroupsConjunction { .. } => "facetGroupsConjunction",
            RequireConstraint::FacetGroupsDisjunction { .. } => "facetGroupsDisjunction",
            RequireConstraint::FacetGroupsNegation { .. } => "facetGroupsNegation",
            RequireConstraint::AttributeHistogram { .. } => "attributeHistogram",
            RequireConstraint::PriceHistogram { .. } => "priceHistogram",
            RequireConstraint::HierarchyOfSelf { .. } => "hierarchyOfSelf",
            RequireConstraint::HierarchyOfReference { .. } => "hierarchyOfReference",
            RequireConstraint::QueryTelemetry => "queryTelemetry",
        }
    }
}

impl EntityContent {
    pub fn keyword(&self) -> &'static str {
        match self {
            EntityContent::AttributeContent(names) if names.is_empty() => "attributeContentAll",
            EntityContent::AttributeContent(_) => "attributeContent",
            EntityContent::AssociatedDataContent(names) if names.is_empty() => {
                "associatedDataContentAll"
            }
            EntityContent::AssociatedDataContent(_) => "associatedDataContent",
            EntityContent::PriceContent { .. } => "priceContent",
            EntityContent::ReferenceContent(content) => content.keyword(),
            EntityContent::HierarchyContent { .. } => "hierarchyContent",
            EntityContent::DataInLocales(locales) if locales.is_empty() => "dataInLocalesAll",
            EntityContent::DataInLocales(_) => "dataInLocales",
        }
    }
}

impl HierarchyRequire {
    pub fn keyword(&self) -> &'static str {
        match self {
            HierarchyRequire::FromRoot { .. } => "fromRoot",
            HierarchyRequire::FromNode { .. } => "fromNode",
            HierarchyRequire::Children { .. } => "children",
            HierarchyRequire::Siblings(_) => "siblings",
            HierarchyRequire::Parents { .. } => "parents",
        }
    }
}

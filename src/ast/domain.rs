//! Closed enum domains accepted by enum-typed argument slots.

/// An enum whose variants are spelled as upper snake case literals.
pub trait KeywordEnum: Sized + Copy + 'static {
    /// Human-readable name of the domain, used in error messages.
    const DOMAIN: &'static str;
    const NAMES: &'static [&'static str];

    fn from_name(name: &str) -> Option<Self>;
    fn name(&self) -> &'static str;
}

macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident, $domain:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl KeywordEnum for $name {
            const DOMAIN: &'static str = $domain;
            const NAMES: &'static [&'static str] = &[$($text),+];

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

keyword_enum! {
    /// Sort direction of natural ordering constraints.
    OrderDirection, "order direction" {
        Asc => "ASC",
        Desc => "DESC",
    }
}

keyword_enum! {
    AttributeSpecialValue, "attribute special value" {
        Null => "NULL",
        NotNull => "NOT_NULL",
    }
}

keyword_enum! {
    /// Which prices `priceContent` fetches.
    PriceContentMode, "price content mode" {
        None => "NONE",
        RespectingFilter => "RESPECTING_FILTER",
        All => "ALL",
    }
}

keyword_enum! {
    QueryPriceMode, "price type" {
        WithTax => "WITH_TAX",
        WithoutTax => "WITHOUT_TAX",
    }
}

keyword_enum! {
    FacetStatisticsDepth, "facet statistics depth" {
        Counts => "COUNTS",
        Impact => "IMPACT",
    }
}

keyword_enum! {
    /// What a hierarchy of references does with nodes that have no entities.
    EmptyHierarchicalEntityBehaviour, "empty hierarchical entity behaviour" {
        LeaveEmpty => "LEAVE_EMPTY",
        RemoveEmpty => "REMOVE_EMPTY",
    }
}

keyword_enum! {
    StatisticsBase, "statistics base" {
        CompleteFilter => "COMPLETE_FILTER",
        WithoutUserFilter => "WITHOUT_USER_FILTER",
    }
}

keyword_enum! {
    StatisticsType, "statistics type" {
        ChildrenCount => "CHILDREN_COUNT",
        QueriedEntityCount => "QUERIED_ENTITY_COUNT",
    }
}

impl Default for OrderDirection {
    fn default() -> Self {
        OrderDirection::Asc
    }
}

impl Default for FacetStatisticsDepth {
    fn default() -> Self {
        FacetStatisticsDepth::Counts
    }
}

impl Default for EmptyHierarchicalEntityBehaviour {
    fn default() -> Self {
        EmptyHierarchicalEntityBehaviour::RemoveEmpty
    }
}

impl Default for StatisticsBase {
    fn default() -> Self {
        StatisticsBase::WithoutUserFilter
    }
}

pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
mod coerce;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod output;
mod params;
pub mod parser;
pub mod value;

pub use ast::{
    EntityContent, EntityFetch, FacetSummary, FilterConstraint, HeadConstraint,
    HierarchyOutputRequire, HierarchyRequire, HierarchySpecification, OrderConstraint, Query,
    ReferenceContent, RequireConstraint, Siblings, StopAt, Token,
};
pub use error::{ErrorKind, ParseError};
pub use lexer::{LexError, Lexer, Position};
pub use output::{to_evitaql, to_evitaql_pretty};
pub use params::Arguments;
pub use parser::{
    ParseMode, ParseOptions, Parser, parse_classifier, parse_filter_list, parse_head_list,
    parse_order_list, parse_query, parse_require_list, parse_value,
};
pub use value::{Range, Value, ValueKind};

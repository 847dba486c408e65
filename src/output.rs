//! Canonical evitaQL text for parsed queries and constraints.
//!
//! The printed text always parses back to an equal tree. Shorthand keywords
//! are printed in their expanded form (`attributeEqualsTrue('a')` prints as
//! `attributeEquals('a',true)`) and optional enum arguments are always
//! written out.
//!
//! # Features
//!
//! - **Compact output** via [`to_evitaql()`] - no whitespace at all
//! - **Pretty output** via [`to_evitaql_pretty()`] - 2-space indentation, one
//!   nested constraint per line
//!
//! # Examples
//!
//! ```
//! use evitaql_parser::{parse_filter_list, Arguments};
//! use evitaql_parser::output::{to_evitaql, to_evitaql_pretty};
//!
//! let filters = parse_filter_list("and(attributeEqualsTrue('visible'))", &Arguments::new())?;
//!
//! assert_eq!(to_evitaql(&filters[0]), "and(attributeEquals('visible',true))");
//! assert_eq!(
//!     to_evitaql_pretty(&filters[0]),
//!     "and(\n  attributeEquals('visible', true)\n)"
//! );
//! # Ok::<(), evitaql_parser::ParseError>(())
//! ```

use crate::ast::{
    EntityContent, EntityFetch, FacetSummary, FilterConstraint, HeadConstraint,
    HierarchyOutputRequire, HierarchyRequire, HierarchySpecification, KeywordEnum,
    OrderConstraint, Query, ReferenceContent, RequireConstraint, Siblings, StopAt,
};
use crate::value::{Value, quote};

/// Constraint call being printed: keyword plus rendered arguments.
struct Node {
    keyword: &'static str,
    args: Vec<Arg>,
}

enum Arg {
    Text(String),
    Node(Node),
}

impl Node {
    fn new(keyword: &'static str) -> Self {
        Node {
            keyword,
            args: Vec::new(),
        }
    }

    fn text(mut self, text: impl ToString) -> Self {
        self.args.push(Arg::Text(text.to_string()));
        self
    }

    fn string(self, s: &str) -> Self {
        self.text(quote(s))
    }

    fn strings(self, items: &[String]) -> Self {
        items.iter().fold(self, |node, s| node.string(s))
    }

    fn value(self, value: &Value) -> Self {
        self.text(value)
    }

    fn values(self, values: &[Value]) -> Self {
        values.iter().fold(self, |node, v| node.value(v))
    }

    fn child(mut self, node: Node) -> Self {
        self.args.push(Arg::Node(node));
        self
    }

    fn children(self, nodes: impl IntoIterator<Item = Node>) -> Self {
        nodes.into_iter().fold(self, |node, child| node.child(child))
    }

    fn opt(self, node: Option<Node>) -> Self {
        match node {
            Some(child) => self.child(child),
            None => self,
        }
    }
}

/// Something that prints as evitaQL text.
pub trait Printable {
    fn print_with(&self, printer: &QueryPrinter) -> String;
}

pub struct QueryPrinter {
    pretty: bool,
}

impl QueryPrinter {
    pub fn new(pretty: bool) -> Self {
        QueryPrinter { pretty }
    }

    pub fn print<T: Printable + ?Sized>(&self, item: &T) -> String {
        item.print_with(self)
    }

    fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        self.render_node(node, 0, &mut out);
        out
    }

    fn render_node(&self, node: &Node, indent: usize, out: &mut String) {
        out.push_str(node.keyword);
        out.push('(');

        let nested = node.args.iter().any(|arg| matches!(arg, Arg::Node(_)));
        if self.pretty && nested {
            out.push('\n');
            for (i, arg) in node.args.iter().enumerate() {
                out.push_str(&self.indent(indent + 1));
                match arg {
                    Arg::Text(text) => out.push_str(text),
                    Arg::Node(child) => self.render_node(child, indent + 1, out),
                }
                if i + 1 < node.args.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&self.indent(indent));
        } else {
            let separator = if self.pretty { ", " } else { "," };
            for (i, arg) in node.args.iter().enumerate() {
                if i > 0 {
                    out.push_str(separator);
                }
                match arg {
                    Arg::Text(text) => out.push_str(text),
                    Arg::Node(child) => self.render_node(child, indent, out),
                }
            }
        }

        out.push(')');
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

fn query_node(query: &Query) -> Node {
    Node::new("query")
        .opt(query.head.as_ref().map(head_node))
        .opt(query.filter_by.as_ref().map(filter_node))
        .opt(query.order_by.as_ref().map(order_node))
        .opt(query.require.as_ref().map(require_node))
}

fn head_node(constraint: &HeadConstraint) -> Node {
    match constraint {
        HeadConstraint::Collection(name) => Node::new("collection").string(name),
    }
}

fn filter_node(constraint: &FilterConstraint) -> Node {
    let node = Node::new(constraint.keyword());
    match constraint {
        FilterConstraint::FilterBy(children)
        | FilterConstraint::FilterGroupBy(children)
        | FilterConstraint::And(children)
        | FilterConstraint::Or(children)
        | FilterConstraint::UserFilter(children) => node.children(children.iter().map(filter_node)),
        FilterConstraint::Not(child) | FilterConstraint::EntityHaving(child) => {
            node.child(filter_node(child))
        }
        FilterConstraint::AttributeEquals { attribute, value }
        | FilterConstraint::AttributeGreaterThan { attribute, value }
        | FilterConstraint::AttributeGreaterThanEquals { attribute, value }
        | FilterConstraint::AttributeLessThan { attribute, value }
        | FilterConstraint::AttributeLessThanEquals { attribute, value }
        | FilterConstraint::AttributeInRange { attribute, value } => {
            node.string(attribute).value(value)
        }
        FilterConstraint::AttributeBetween {
            attribute,
            from,
            to,
        } => node.string(attribute).value(from).value(to),
        FilterConstraint::AttributeInSet { attribute, values } => {
            node.string(attribute).values(values)
        }
        FilterConstraint::AttributeContains { attribute, text }
        | FilterConstraint::AttributeStartsWith { attribute, text }
        | FilterConstraint::AttributeEndsWith { attribute, text } => {
            node.string(attribute).string(text)
        }
        FilterConstraint::AttributeIs { attribute, special } => {
            node.string(attribute).text(special.name())
        }
        FilterConstraint::AttributeInRangeNow { attribute } => node.string(attribute),
        FilterConstraint::EntityPrimaryKeyInSet(keys) => {
            keys.iter().fold(node, |node, key| node.text(key))
        }
        FilterConstraint::EntityLocaleEquals(locale) => node.string(locale),
        FilterConstraint::PriceInCurrency(currency) => node.string(currency),
        FilterConstraint::PriceInPriceLists(lists) => node.strings(lists),
        FilterConstraint::PriceValidIn(moment) => node.value(&Value::OffsetDateTime(*moment)),
        FilterConstraint::PriceValidInNow => node,
        FilterConstraint::PriceBetween { from, to } => node
            .value(&Value::Float(*from))
            .value(&Value::Float(*to)),
        FilterConstraint::FacetHaving {
            reference,
            children,
        } => node
            .string(reference)
            .children(children.iter().map(filter_node)),
        FilterConstraint::ReferenceHaving { reference, filter } => node
            .string(reference)
            .opt(filter.as_deref().map(filter_node)),
        FilterConstraint::HierarchyWithin {
            reference,
            parent,
            specifications,
        } => {
            let node = match reference {
                Some(reference) => node.string(reference),
                None => node,
            };
            node.child(filter_node(parent))
                .children(specifications.iter().map(specification_node))
        }
        FilterConstraint::HierarchyWithinRoot {
            reference,
            specifications,
        } => {
            let node = match reference {
                Some(reference) => node.string(reference),
                None => node,
            };
            node.children(specifications.iter().map(specification_node))
        }
    }
}

fn specification_node(specification: &HierarchySpecification) -> Node {
    match specification {
        HierarchySpecification::DirectRelation => Node::new("directRelation"),
        HierarchySpecification::ExcludingRoot => Node::new("excludingRoot"),
        HierarchySpecification::Having(children) => {
            Node::new("having").children(children.iter().map(filter_node))
        }
        HierarchySpecification::Excluding(children) => {
            Node::new("excluding").children(children.iter().map(filter_node))
        }
    }
}

fn order_node(constraint: &OrderConstraint) -> Node {
    let node = Node::new(constraint.keyword());
    match constraint {
        OrderConstraint::OrderBy(children)
        | OrderConstraint::OrderGroupBy(children)
        | OrderConstraint::EntityProperty(children) => {
            node.children(children.iter().map(order_node))
        }
        OrderConstraint::AttributeNatural {
            attribute,
            direction,
        } => node.string(attribute).text(direction.name()),
        OrderConstraint::AttributeSetExact { attribute, values } => {
            node.string(attribute).values(values)
        }
        OrderConstraint::AttributeSetInFilter { attribute } => node.string(attribute),
        OrderConstraint::EntityPrimaryKeyExact(keys) => {
            keys.iter().fold(node, |node, key| node.text(key))
        }
        OrderConstraint::EntityPrimaryKeyInFilter | OrderConstraint::Random => node,
        OrderConstraint::PriceNatural(direction) => node.text(direction.name()),
        OrderConstraint::ReferenceProperty {
            reference,
            children,
        } => node
            .string(reference)
            .children(children.iter().map(order_node)),
    }
}

fn require_node(constraint: &RequireConstraint) -> Node {
    let node = Node::new(constraint.keyword());
    match constraint {
        RequireConstraint::Require(children) => node.children(children.iter().map(require_node)),
        RequireConstraint::Page { number, size } => node.text(number).text(size),
        RequireConstraint::Strip { offset, limit } => node.text(offset).text(limit),
        RequireConstraint::EntityFetch(fetch) => fetch_node("entityFetch", fetch),
        RequireConstraint::EntityGroupFetch(fetch) => fetch_node("entityGroupFetch", fetch),
        RequireConstraint::Content(content) => content_node(content),
        RequireConstraint::PriceType(mode) => node.text(mode.name()),
        RequireConstraint::FacetSummary(summary) => facet_summary_node(node, summary),
        RequireConstraint::FacetSummaryOfReference { reference, summary } => {
            facet_summary_node(node.string(reference), summary)
        }
        RequireConstraint::FacetGroupsConjunction {
            reference,
            filter_by,
        }
        | RequireConstraint::FacetGroupsDisjunction {
            reference,
            filter_by,
        }
        | RequireConstraint::FacetGroupsNegation {
            reference,
            filter_by,
        } => node
            .string(reference)
            .opt(filter_by.as_deref().map(filter_node)),
        RequireConstraint::AttributeHistogram {
            buckets,
            attributes,
        } => node.text(buckets).strings(attributes),
        RequireConstraint::PriceHistogram { buckets } => node.text(buckets),
        RequireConstraint::HierarchyOfSelf {
            order_by,
            requirements,
        } => node
            .opt(order_by.as_deref().map(order_node))
            .children(requirements.iter().map(hierarchy_node)),
        RequireConstraint::HierarchyOfReference {
            reference,
            behaviour,
            order_by,
            requirements,
        } => node
            .string(reference)
            .text(behaviour.name())
            .opt(order_by.as_deref().map(order_node))
            .children(requirements.iter().map(hierarchy_node)),
        RequireConstraint::QueryTelemetry => node,
    }
}

fn fetch_node(keyword: &'static str, fetch: &EntityFetch) -> Node {
    Node::new(keyword).children(fetch.requirements.iter().map(content_node))
}

fn opt_fetch(keyword: &'static str, fetch: &Option<EntityFetch>) -> Option<Node> {
    fetch.as_ref().map(|fetch| fetch_node(keyword, fetch))
}

fn facet_summary_node(node: Node, summary: &FacetSummary) -> Node {
    node.text(summary.depth.name())
        .opt(summary.filter_by.as_deref().map(filter_node))
        .opt(summary.filter_group_by.as_deref().map(filter_node))
        .opt(summary.order_by.as_deref().map(order_node))
        .opt(summary.order_group_by.as_deref().map(order_node))
        .opt(opt_fetch("entityFetch", &summary.entity_fetch))
        .opt(opt_fetch("entityGroupFetch", &summary.entity_group_fetch))
}

fn content_node(content: &EntityContent) -> Node {
    let node = Node::new(content.keyword());
    match content {
        EntityContent::AttributeContent(names)
        | EntityContent::AssociatedDataContent(names) => node.strings(names),
        EntityContent::PriceContent { mode, price_lists } => {
            node.text(mode.name()).strings(price_lists)
        }
        EntityContent::ReferenceContent(reference) => reference_content_node(node, reference),
        EntityContent::HierarchyContent {
            stop_at,
            entity_fetch,
        } => node
            .opt(stop_at.as_ref().map(stop_at_node))
            .opt(opt_fetch("entityFetch", entity_fetch)),
        EntityContent::DataInLocales(locales) => node.strings(locales),
    }
}

fn reference_content_node(node: Node, content: &ReferenceContent) -> Node {
    let attributes = match &content.attribute_content {
        Some(names) if !names.is_empty() => Some(Node::new("attributeContent").strings(names)),
        _ => None,
    };
    node.strings(&content.references)
        .opt(content.filter_by.as_deref().map(filter_node))
        .opt(content.order_by.as_deref().map(order_node))
        .opt(attributes)
        .opt(opt_fetch("entityFetch", &content.entity_fetch))
        .opt(opt_fetch("entityGroupFetch", &content.entity_group_fetch))
}

fn hierarchy_node(requirement: &HierarchyRequire) -> Node {
    let node = Node::new(requirement.keyword());
    match requirement {
        HierarchyRequire::FromRoot {
            output_name,
            entity_fetch,
            requirements,
        }
        | HierarchyRequire::Children {
            output_name,
            entity_fetch,
            requirements,
        } => node
            .string(output_name)
            .opt(opt_fetch("entityFetch", entity_fetch))
            .children(requirements.iter().map(output_node)),
        HierarchyRequire::FromNode {
            output_name,
            node: pivot,
            entity_fetch,
            requirements,
        } => node
            .string(output_name)
            .child(Node::new("node").child(filter_node(pivot)))
            .opt(opt_fetch("entityFetch", entity_fetch))
            .children(requirements.iter().map(output_node)),
        HierarchyRequire::Siblings(siblings) => siblings_node(siblings),
        HierarchyRequire::Parents {
            output_name,
            entity_fetch,
            siblings,
            requirements,
        } => node
            .string(output_name)
            .opt(opt_fetch("entityFetch", entity_fetch))
            .opt(siblings.as_ref().map(siblings_node))
            .children(requirements.iter().map(output_node)),
    }
}

fn siblings_node(siblings: &Siblings) -> Node {
    let node = Node::new("siblings");
    let node = match &siblings.output_name {
        Some(name) => node.string(name),
        None => node,
    };
    node.opt(opt_fetch("entityFetch", &siblings.entity_fetch))
        .children(siblings.requirements.iter().map(output_node))
}

fn output_node(output: &HierarchyOutputRequire) -> Node {
    match output {
        HierarchyOutputRequire::StopAt(stop_at) => stop_at_node(stop_at),
        HierarchyOutputRequire::Statistics { base, types } => types
            .iter()
            .fold(Node::new("statistics").text(base.name()), |node, t| {
                node.text(t.name())
            }),
    }
}

fn stop_at_node(stop_at: &StopAt) -> Node {
    let condition = match stop_at {
        StopAt::Distance(distance) => Node::new("distance").text(distance),
        StopAt::Level(level) => Node::new("level").text(level),
        StopAt::Node(filter) => Node::new("node").child(filter_node(filter)),
    };
    Node::new("stopAt").child(condition)
}

impl Printable for Query {
    fn print_with(&self, printer: &QueryPrinter) -> String {
        printer.render(&query_node(self))
    }
}

impl Printable for HeadConstraint {
    fn print_with(&self, printer: &QueryPrinter) -> String {
        printer.render(&head_node(self))
    }
}

impl Printable for FilterConstraint {
    fn print_with(&self, printer: &QueryPrinter) -> String {
        printer.render(&filter_node(self))
    }
}

impl Printable for OrderConstraint {
    fn print_with(&self, printer: &QueryPrinter) -> String {
        printer.render(&order_node(self))
    }
}

impl Printable for RequireConstraint {
    fn print_with(&self, printer: &QueryPrinter) -> String {
        printer.render(&require_node(self))
    }
}

impl Printable for Value {
    fn print_with(&self, _printer: &QueryPrinter) -> String {
        self.to_string()
    }
}

/// Prints a query or constraint as compact evitaQL.
pub fn to_evitaql<T: Printable + ?Sized>(item: &T) -> String {
    QueryPrinter::new(false).print(item)
}

/// Prints a query or constraint with 2-space indentation, one nested
/// constraint per line. Constraints without nested constraints stay on one
/// line.
///
/// # Examples
///
/// ```
/// use evitaql_parser::{parse_query, Arguments};
/// use evitaql_parser::output::to_evitaql_pretty;
///
/// let query = parse_query("query(collection('product'),require(page(1,20)))", &Arguments::new())?;
/// let text = to_evitaql_pretty(&query);
/// // query(
/// //   collection('product'),
/// //   require(
/// //     page(1, 20)
/// //   )
/// // )
/// assert!(text.contains("\n    page(1, 20)\n"));
/// # Ok::<(), evitaql_parser::ParseError>(())
/// ```
pub fn to_evitaql_pretty<T: Printable + ?Sized>(item: &T) -> String {
    QueryPrinter::new(true).print(item)
}

macro_rules! display_as_evitaql {
    ($($ty:ty),+) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&to_evitaql(self))
                }
            }
        )+
    };
}

display_as_evitaql!(
    Query,
    HeadConstraint,
    FilterConstraint,
    OrderConstraint,
    RequireConstraint
);

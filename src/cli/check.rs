//! Parse evitaQL text and print its canonical form

use std::time::Instant;

use tracing::debug;

use super::CliError;
use crate::output::{Printable, QueryPrinter};
use crate::{
    Arguments, FilterConstraint, HeadConstraint, Lexer, OrderConstraint, ParseOptions, Parser,
    Query, RequireConstraint, Value,
};

/// Which grammar entry point to parse the text with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Unit {
    #[default]
    Query,
    Head,
    Filter,
    Order,
    Require,
    Classifier,
    Value,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The evitaQL text to parse
    pub query: String,
    pub unit: Unit,
    /// Parameter values bound to `?` and `@name`
    pub arguments: Arguments,
    pub parse: ParseOptions,
    /// Pretty-print the output
    pub pretty: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    Query(Query),
    Head(Vec<HeadConstraint>),
    Filter(Vec<FilterConstraint>),
    Order(Vec<OrderConstraint>),
    Require(Vec<RequireConstraint>),
    Classifier(String),
    Value(Value),
}

impl CheckResult {
    /// Canonical evitaQL text of the parsed unit. List units print one
    /// constraint per line when `pretty` is set.
    pub fn render(&self, pretty: bool) -> String {
        let printer = QueryPrinter::new(pretty);
        match self {
            CheckResult::Query(query) => printer.print(query),
            CheckResult::Head(items) => render_list(&printer, items, pretty),
            CheckResult::Filter(items) => render_list(&printer, items, pretty),
            CheckResult::Order(items) => render_list(&printer, items, pretty),
            CheckResult::Require(items) => render_list(&printer, items, pretty),
            CheckResult::Classifier(name) => Value::from(name.as_str()).to_string(),
            CheckResult::Value(value) => printer.print(value),
        }
    }
}

fn render_list<T: Printable>(printer: &QueryPrinter, items: &[T], pretty: bool) -> String {
    let separator = if pretty { ",\n" } else { "," };
    items
        .iter()
        .map(|item| printer.print(item))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Parse `options.query` as the selected unit
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let text = options.query.as_str();
    debug!(
        unit = ?options.unit,
        mode = %options.parse.mode,
        max_depth = options.parse.max_depth,
        positional = options.arguments.positional_len(),
        named = options.arguments.named_len(),
        "parsing"
    );

    let started = Instant::now();
    let result = parse_unit(text, options);
    let elapsed = started.elapsed();

    match result {
        Ok(result) => {
            debug!(elapsed_us = elapsed.as_micros() as u64, "parsed");
            Ok(result)
        }
        Err(error) => {
            debug!(
                kind = %error.kind(),
                offset = error.offset(),
                elapsed_us = elapsed.as_micros() as u64,
                "parse failed"
            );
            Err(CliError::parse(error, text))
        }
    }
}

fn parse_unit(text: &str, options: &CheckOptions) -> Result<CheckResult, crate::ParseError> {
    let mut parser = Parser::with_options(Lexer::new(text), &options.arguments, options.parse)?;
    let result = match options.unit {
        Unit::Query => CheckResult::Query(parser.parse_query()?),
        Unit::Head => CheckResult::Head(parser.parse_head_list()?),
        Unit::Filter => CheckResult::Filter(parser.parse_filter_list()?),
        Unit::Order => CheckResult::Order(parser.parse_order_list()?),
        Unit::Require => CheckResult::Require(parser.parse_require_list()?),
        Unit::Classifier => CheckResult::Classifier(parser.parse_classifier()?),
        Unit::Value => CheckResult::Value(parser.parse_value()?),
    };
    debug!(positional_bound = parser.positional_parameters(), "bound parameters");
    Ok(result)
}

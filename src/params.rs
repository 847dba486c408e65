//! Caller-supplied parameter arguments and their binding.
//!
//! Positional `?` placeholders take the supplied list one-for-one in order of
//! appearance (left to right, depth first). Named `@name` placeholders are
//! looked up in the supplied map once per name; later references reuse the
//! first value. Binding is eager: a placeholder is resolved the moment the
//! parser reaches it, so failures point at the placeholder itself.

use std::collections::HashMap;

use crate::coerce::{Operand, Origin, Slot};
use crate::error::ParseError;
use crate::value::Value;

/// Parameter arguments supplied alongside the query text.
///
/// # Examples
///
/// ```
/// use evitaql_parser::{parse_filter_list, Arguments};
///
/// let args = Arguments::positional([10, 20]).with_named("code", "abc");
/// let filter = parse_filter_list("priceBetween(?, ?), attributeEquals('code', @code)", &args)?;
/// assert_eq!(filter.len(), 2);
/// # Ok::<(), evitaql_parser::ParseError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    named: HashMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Arguments::default()
    }

    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Arguments {
            positional: values.into_iter().map(Into::into).collect(),
            named: HashMap::new(),
        }
    }

    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Arguments {
            positional: Vec::new(),
            named: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Appends the next positional argument.
    pub fn with_positional(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    pub fn named_len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Per-parse binding state.
pub(crate) struct Binder<'a> {
    arguments: &'a Arguments,
    next_positional: usize,
    named: HashMap<String, Value>,
}

impl<'a> Binder<'a> {
    pub(crate) fn new(arguments: &'a Arguments) -> Self {
        Binder {
            arguments,
            next_positional: 0,
            named: HashMap::new(),
        }
    }

    pub(crate) fn bind_positional(&mut self, offset: usize, slot: &Slot) -> Result<Operand, ParseError> {
        let index = self.next_positional;
        self.next_positional += 1;

        match self.arguments.positional.get(index) {
            Some(value) => Ok(Operand {
                value: value.clone(),
                offset,
                origin: Origin::Positional(index),
            }),
            None => Err(ParseError::UnboundParameter {
                offset,
                parameter: Origin::Positional(index).to_string(),
                slot: slot.label(),
                reason: format!(
                    "only {} positional argument(s) supplied",
                    self.arguments.positional.len()
                ),
            }),
        }
    }

    pub(crate) fn bind_named(
        &mut self,
        name: &str,
        offset: usize,
        slot: &Slot,
    ) -> Result<Operand, ParseError> {
        let value = match self.named.get(name) {
            Some(value) => value.clone(),
            None => {
                let value = self.arguments.named.get(name).cloned().ok_or_else(|| {
                    ParseError::UnboundParameter {
                        offset,
                        parameter: format!("@{}", name),
                        slot: slot.label(),
                        reason: "no argument supplied for this name".to_string(),
                    }
                })?;
                self.named.insert(name.to_string(), value.clone());
                value
            }
        };

        Ok(Operand {
            value,
            offset,
            origin: Origin::Named(name.to_string()),
        })
    }

    /// Number of positional placeholders seen so far.
    pub(crate) fn positional_seen(&self) -> usize {
        self.next_positional
    }
}

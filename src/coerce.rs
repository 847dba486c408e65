//! Value coercion and classifier validation.
//!
//! Turns an [`Operand`] (a literal or a bound parameter) into the typed
//! value an argument slot declares. Matching is exact: an integer never
//! silently becomes a decimal, except for slots that explicitly take any
//! number. A wrong literal is a [`ParseError::TypeMismatch`]; a wrong
//! caller-supplied argument is a [`ParseError::UnboundParameter`].

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use rust_decimal::Decimal;

use crate::ast::KeywordEnum;
use crate::error::ParseError;
use crate::value::{Range, Value, ValueKind};

static LOCALE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z]{2,3}(?:-[a-zA-Z0-9]{2,8})*$").expect("locale pattern is valid")
});

static CURRENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("currency pattern is valid"));

/// Where an operand came from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Origin {
    Literal,
    /// Zero-based index into the positional arguments
    Positional(usize),
    Named(String),
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Literal => f.write_str("literal"),
            Origin::Positional(index) => write!(f, "?{}", index + 1),
            Origin::Named(name) => write!(f, "@{}", name),
        }
    }
}

/// A value together with the offset of the token that produced it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Operand {
    pub value: Value,
    pub offset: usize,
    pub origin: Origin,
}

impl Operand {
    pub(crate) fn literal(value: Value, offset: usize) -> Self {
        Operand {
            value,
            offset,
            origin: Origin::Literal,
        }
    }
}

/// Named argument position of a constraint, e.g. `attributeEquals.value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub constraint: &'static str,
    pub name: &'static str,
}

impl Slot {
    pub(crate) const fn new(constraint: &'static str, name: &'static str) -> Self {
        Slot { constraint, name }
    }

    pub(crate) fn label(&self) -> String {
        format!("{}.{}", self.constraint, self.name)
    }

    /// Phrase used for missing-argument syntax errors.
    pub(crate) fn describe(&self) -> String {
        format!("argument `{}` of `{}`", self.name, self.constraint)
    }
}

pub(crate) fn mismatch(operand: &Operand, slot: &Slot, expected: &str) -> ParseError {
    let actual = operand.value.kind().to_string();
    match operand.origin {
        Origin::Literal => ParseError::type_mismatch(operand.offset, slot.label(), expected, actual),
        _ => ParseError::UnboundParameter {
            offset: operand.offset,
            parameter: operand.origin.to_string(),
            slot: slot.label(),
            reason: format!("expected {}, found {}", expected, actual),
        },
    }
}

/// Any single value; lists are rejected.
pub(crate) fn comparable(operand: Operand, slot: &Slot) -> Result<Value, ParseError> {
    match operand.value {
        Value::Multiple(_) => Err(mismatch(&operand, slot, "a single value")),
        value => Ok(value),
    }
}

pub(crate) fn string(operand: Operand, slot: &Slot) -> Result<String, ParseError> {
    match operand.value {
        Value::String(s) => Ok(s),
        _ => Err(mismatch(&operand, slot, "string")),
    }
}

pub(crate) fn int(operand: Operand, slot: &Slot) -> Result<i64, ParseError> {
    match operand.value {
        Value::Int(n) => Ok(n),
        _ => Err(mismatch(&operand, slot, "integer")),
    }
}

/// Integer or decimal, widened to a decimal.
pub(crate) fn number(operand: Operand, slot: &Slot) -> Result<Decimal, ParseError> {
    match operand.value {
        Value::Int(n) => Ok(Decimal::from(n)),
        Value::Float(n) => Ok(n),
        _ => Err(mismatch(&operand, slot, "number")),
    }
}

pub(crate) fn offset_date_time(
    operand: Operand,
    slot: &Slot,
) -> Result<DateTime<FixedOffset>, ParseError> {
    match operand.value {
        Value::OffsetDateTime(dt) => Ok(dt),
        _ => Err(mismatch(&operand, slot, "offset date-time")),
    }
}

/// Enum literal matched by name against the domain of `E`.
pub(crate) fn enumeration<E: KeywordEnum>(operand: Operand, slot: &Slot) -> Result<E, ParseError> {
    let found = match &operand.value {
        Value::Enum(name) => E::from_name(name),
        _ => None,
    };
    found.ok_or_else(|| {
        let expected = format!("{} ({})", E::DOMAIN, E::NAMES.join("|"));
        match &operand.value {
            Value::Enum(name) if operand.origin == Origin::Literal => ParseError::type_mismatch(
                operand.offset,
                slot.label(),
                expected,
                format!("enum {}", name),
            ),
            _ => mismatch(&operand, slot, &expected),
        }
    })
}

pub(crate) fn locale(operand: Operand, slot: &Slot) -> Result<String, ParseError> {
    match operand.value {
        Value::String(ref tag) if LOCALE.is_match(tag) => Ok(tag.clone()),
        Value::String(ref tag) => Err(mismatch_text(&operand, slot, "locale tag", tag)),
        _ => Err(mismatch(&operand, slot, "locale tag")),
    }
}

pub(crate) fn currency(operand: Operand, slot: &Slot) -> Result<String, ParseError> {
    match operand.value {
        Value::String(ref code) if CURRENCY.is_match(code) => Ok(code.clone()),
        Value::String(ref code) => Err(mismatch_text(&operand, slot, "currency code", code)),
        _ => Err(mismatch(&operand, slot, "currency code")),
    }
}

fn mismatch_text(operand: &Operand, slot: &Slot, expected: &str, text: &str) -> ParseError {
    let mut err = mismatch(operand, slot, expected);
    match &mut err {
        ParseError::TypeMismatch { actual, .. } => *actual = format!("'{}'", text),
        ParseError::UnboundParameter { reason, .. } => {
            *reason = format!("expected {}, found '{}'", expected, text)
        }
        _ => {}
    }
    err
}

/// Value of `attributeInRange`: a point or a range of a rangeable kind.
pub(crate) fn in_range(operand: Operand, slot: &Slot) -> Result<Value, ParseError> {
    match operand.value.kind() {
        ValueKind::Int
        | ValueKind::Float
        | ValueKind::OffsetDateTime
        | ValueKind::IntRange
        | ValueKind::FloatRange
        | ValueKind::DateTimeRange => Ok(operand.value),
        _ => Err(mismatch(&operand, slot, "integer, decimal, offset date-time or a range")),
    }
}

/// Composes a range from two optional bounds of the same kind.
///
/// `offset` points at the range as a whole and is used when both bounds are
/// open.
pub(crate) fn range(
    from: Option<Operand>,
    to: Option<Operand>,
    offset: usize,
    slot: &Slot,
) -> Result<Value, ParseError> {
    const EXPECTED: &str = "integer, decimal or offset date-time bounds of one kind";

    if let (Some(lo), Some(hi)) = (&from, &to) {
        if lo.value.kind() != hi.value.kind() {
            let mut err = mismatch(hi, slot, EXPECTED);
            if let ParseError::TypeMismatch { actual, .. } = &mut err {
                *actual = format!("{} and {}", lo.value.kind(), hi.value.kind());
            }
            return Err(err);
        }
    }

    let kind = match from.as_ref().or(to.as_ref()) {
        Some(bound) => bound.value.kind(),
        None => {
            return Err(ParseError::type_mismatch(
                offset,
                slot.label(),
                "at least one bound",
                "two open bounds",
            ));
        }
    };

    let value = match kind {
        ValueKind::Int => {
            let bound = |o: Option<Operand>| o.and_then(|o| o.value.as_int());
            Range::new(bound(from), bound(to)).map(Value::IntRange)
        }
        ValueKind::Float => {
            let bound = |o: Option<Operand>| o.and_then(|o| o.value.as_decimal());
            Range::new(bound(from), bound(to)).map(Value::FloatRange)
        }
        ValueKind::OffsetDateTime => {
            let bound = |o: Option<Operand>| o.and_then(|o| o.value.as_offset_date_time());
            Range::new(bound(from), bound(to)).map(Value::DateTimeRange)
        }
        _ => {
            let offending = from.or(to);
            return Err(match offending {
                Some(operand) => mismatch(&operand, slot, EXPECTED),
                None => ParseError::type_mismatch(offset, slot.label(), EXPECTED, "nothing"),
            });
        }
    };

    value.ok_or_else(|| {
        ParseError::type_mismatch(offset, slot.label(), "at least one bound", "two open bounds")
    })
}

/// Expands `Multiple` operands into their elements for list slots.
pub(crate) fn flatten(operands: Vec<Operand>) -> Vec<Operand> {
    let mut flat = Vec::with_capacity(operands.len());
    for operand in operands {
        match operand.value {
            Value::Multiple(values) => flat.extend(values.into_iter().map(|value| Operand {
                value,
                offset: operand.offset,
                origin: operand.origin.clone(),
            })),
            value => flat.push(Operand { value, ..operand }),
        }
    }
    flat
}

/// Flattens the operands and coerces each element.
pub(crate) fn list<T>(
    operands: Vec<Operand>,
    slot: &Slot,
    coerce: fn(Operand, &Slot) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    flatten(operands)
        .into_iter()
        .map(|operand| coerce(operand, slot))
        .collect()
}

/// A classifier must be a non-blank string, written literally or supplied
/// by a parameter.
pub(crate) fn classifier(operand: Operand) -> Result<String, ParseError> {
    match operand.value {
        Value::String(name) if !name.trim().is_empty() => Ok(name),
        Value::String(name) => Err(ParseError::InvalidClassifier {
            offset: operand.offset,
            value: format!("'{}' is blank", name),
        }),
        other => Err(ParseError::InvalidClassifier {
            offset: operand.offset,
            value: format!("{} `{}` is not a string", other.kind(), other),
        }),
    }
}

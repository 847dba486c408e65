use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// A typed value used as a constraint argument.
///
/// Values come either from literals in the query text or from caller-supplied
/// parameter arguments. Integers and decimals are distinct kinds; decimals are
/// exact (`rust_decimal`), never binary floating point.
///
/// # Examples
///
/// ```
/// use evitaql_parser::{Range, Value};
///
/// let code = Value::from("abc");
/// let stock = Value::Int(10);
/// let window = Value::IntRange(Range::between(1, 100));
/// let direction = Value::enumeration("DESC");
/// let several = Value::Multiple(vec![Value::Int(1), Value::Int(2)]);
///
/// assert_eq!(code.to_string(), "'abc'");
/// assert_eq!(window.to_string(), "[1,100]");
/// assert_eq!(several.to_string(), "{1,2}");
/// # let _ = (stock, direction);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Float(Decimal),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    OffsetDateTime(DateTime<FixedOffset>),
    IntRange(Range<i64>),
    FloatRange(Range<Decimal>),
    DateTimeRange(Range<DateTime<FixedOffset>>),
    /// Upper snake case name matched against an enum domain by the slot.
    Enum(String),
    Uuid(Uuid),
    /// Explicit list of values, only valid where a slot accepts a list.
    Multiple(Vec<Value>),
}

/// Kind tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Int,
    Float,
    Boolean,
    Date,
    Time,
    DateTime,
    OffsetDateTime,
    IntRange,
    FloatRange,
    DateTimeRange,
    Enum,
    Uuid,
    Multiple,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Int => "integer",
            ValueKind::Float => "decimal",
            ValueKind::Boolean => "boolean",
            ValueKind::Date => "date",
            ValueKind::Time => "time",
            ValueKind::DateTime => "date-time",
            ValueKind::OffsetDateTime => "offset date-time",
            ValueKind::IntRange => "integer range",
            ValueKind::FloatRange => "decimal range",
            ValueKind::DateTimeRange => "date-time range",
            ValueKind::Enum => "enum",
            ValueKind::Uuid => "uuid",
            ValueKind::Multiple => "multiple values",
        };
        f.write_str(name)
    }
}

/// Range with optionally open bounds. At least one bound is always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range<T> {
    from: Option<T>,
    to: Option<T>,
}

impl<T> Range<T> {
    /// Returns `None` when both bounds are open.
    pub fn new(from: Option<T>, to: Option<T>) -> Option<Self> {
        if from.is_none() && to.is_none() {
            None
        } else {
            Some(Range { from, to })
        }
    }

    pub fn between(from: T, to: T) -> Self {
        Range {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn since(from: T) -> Self {
        Range {
            from: Some(from),
            to: None,
        }
    }

    pub fn until(to: T) -> Self {
        Range {
            from: None,
            to: Some(to),
        }
    }

    pub fn lower(&self) -> Option<&T> {
        self.from.as_ref()
    }

    pub fn upper(&self) -> Option<&T> {
        self.to.as_ref()
    }

    fn render(&self, f: &mut std::fmt::Formatter<'_>, bound: fn(&T) -> String) -> std::fmt::Result {
        write!(
            f,
            "[{},{}]",
            self.from.as_ref().map(bound).unwrap_or_default(),
            self.to.as_ref().map(bound).unwrap_or_default()
        )
    }
}

impl Value {
    pub fn enumeration(name: impl Into<String>) -> Self {
        Value::Enum(name.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Date(_) => ValueKind::Date,
            Value::Time(_) => ValueKind::Time,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::OffsetDateTime(_) => ValueKind::OffsetDateTime,
            Value::IntRange(_) => ValueKind::IntRange,
            Value::FloatRange(_) => ValueKind::FloatRange,
            Value::DateTimeRange(_) => ValueKind::DateTimeRange,
            Value::Enum(_) => ValueKind::Enum,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::Multiple(_) => ValueKind::Multiple,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_offset_date_time(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Value::OffsetDateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&str> {
        match self {
            Value::Enum(name) => Some(name),
            _ => None,
        }
    }
}

pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn decimal_literal(n: &Decimal) -> String {
    // a bare integer would read back as an Int
    if n.scale() == 0 {
        format!("{}.0", n)
    } else {
        n.to_string()
    }
}

fn offset_date_time_literal(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f%:z").to_string()
}

/// Canonical literal form, parseable by the lexer.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => f.write_str(&quote(s)),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => f.write_str(&decimal_literal(n)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::OffsetDateTime(dt) => f.write_str(&offset_date_time_literal(dt)),
            Value::IntRange(r) => r.render(f, |n| n.to_string()),
            Value::FloatRange(r) => r.render(f, decimal_literal),
            Value::DateTimeRange(r) => r.render(f, offset_date_time_literal),
            Value::Enum(name) => f.write_str(name),
            Value::Uuid(u) => write!(f, "{}", u.hyphenated()),
            Value::Multiple(values) => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{{{}}}", items.join(","))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Time(t)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::OffsetDateTime(dt)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Multiple(values)
    }
}

/// JSON input that has no argument value counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonValueError {
    #[error("null cannot be used as an argument value")]
    Null,
    #[error("JSON objects cannot be used as argument values")]
    Object,
    #[error("number {0} cannot be represented as a decimal")]
    Number(String),
}

/// Converts caller-supplied JSON arguments. Arrays become [`Value::Multiple`],
/// integral numbers [`Value::Int`], other numbers exact decimals.
impl TryFrom<serde_json::Value> for Value {
    type Error = JsonValueError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Null => Err(JsonValueError::Null),
            serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Value::Int(i));
                }
                let text = n.to_string();
                Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .map(Value::Float)
                    .map_err(|_| JsonValueError::Number(text))
            }
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Multiple),
            serde_json::Value::Object(_) => Err(JsonValueError::Object),
        }
    }
}

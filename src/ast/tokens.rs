use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// String literal enclosed in single quotes
    ///
    /// # Examples
    /// ```text
    /// 'code'
    /// 'it\'s'
    /// ```
    String(String),

    /// Integer
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// ```
    Int(i64),

    /// Decimal number, kept exact
    ///
    /// # Examples
    /// ```text
    /// 100.55
    /// -0.5
    /// ```
    Float(Decimal),

    /// Boolean values
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Boolean(bool),

    /// Open range bound
    Null,

    /// # Examples
    /// ```text
    /// 2020-02-08
    /// ```
    Date(NaiveDate),

    /// Local time, truncated to milliseconds
    ///
    /// # Examples
    /// ```text
    /// 13:30:55
    /// 13:30:55.123
    /// ```
    Time(NaiveTime),

    /// # Examples
    /// ```text
    /// 2020-02-08T13:30:55
    /// ```
    DateTime(NaiveDateTime),

    /// # Examples
    /// ```text
    /// 2020-02-08T13:30:55+01:00
    /// ```
    OffsetDateTime(DateTime<FixedOffset>),

    /// Canonical lowercase UUID
    ///
    /// # Examples
    /// ```text
    /// 2fbbfcf2-d4bb-4db9-9658-acf1d287cbe9
    /// ```
    Uuid(Uuid),

    /// Enum literal in upper snake case
    ///
    /// # Examples
    /// ```text
    /// DESC
    /// WITH_TAX
    /// ```
    Enum(String),

    // Identifiers and parameters
    /// Constraint keyword
    ///
    /// Must start with a letter, followed by letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// attributeEquals
    /// filterBy
    /// ```
    Identifier(String),

    /// Positional parameter placeholder `?`
    PositionalParameter,

    /// Named parameter placeholder
    ///
    /// # Examples
    /// ```text
    /// @minPrice
    /// ```
    NamedParameter(String),

    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,

    /// End of input
    Eof,
}

impl Token {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::String(s) => format!("string '{}'", s),
            Token::Int(n) => format!("integer {}", n),
            Token::Float(n) => format!("float {}", n),
            Token::Boolean(b) => format!("boolean {}", b),
            Token::Null => "`null`".to_string(),
            Token::Date(d) => format!("date {}", d),
            Token::Time(t) => format!("time {}", t),
            Token::DateTime(dt) => format!("date-time {}", dt),
            Token::OffsetDateTime(dt) => format!("offset date-time {}", dt.to_rfc3339()),
            Token::Uuid(u) => format!("uuid {}", u),
            Token::Enum(e) => format!("enum {}", e),
            Token::Identifier(name) => format!("`{}`", name),
            Token::PositionalParameter => "`?`".to_string(),
            Token::NamedParameter(name) => format!("`@{}`", name),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
            Token::LBracket => "`[`".to_string(),
            Token::RBracket => "`]`".to_string(),
            Token::LBrace => "`{`".to_string(),
            Token::RBrace => "`}`".to_string(),
            Token::Comma => "`,`".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }

    /// True for tokens that can start a value argument.
    pub fn starts_value(&self) -> bool {
        matches!(
            self,
            Token::String(_)
                | Token::Int(_)
                | Token::Float(_)
                | Token::Boolean(_)
                | Token::Null
                | Token::Date(_)
                | Token::Time(_)
                | Token::DateTime(_)
                | Token::OffsetDateTime(_)
                | Token::Uuid(_)
                | Token::Enum(_)
                | Token::PositionalParameter
                | Token::NamedParameter(_)
                | Token::LBracket
                | Token::LBrace
        )
    }
}

/// A token together with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub offset: usize,
}

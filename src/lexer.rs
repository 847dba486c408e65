use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::ast::{SpannedToken, Token};

/// Malformed literal or unexpected character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at offset {offset}")]
pub struct LexError {
    pub offset: usize,
    pub reason: String,
}

impl LexError {
    fn new(offset: usize, reason: impl Into<String>) -> Self {
        LexError {
            offset,
            reason: reason.into(),
        }
    }
}

/// One-based line and column of a byte offset, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn locate(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (index, ch) in source.char_indices() {
            if index >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Position { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

struct LiteralPatterns {
    uuid: Regex,
    offset_date_time: Regex,
    date_time: Regex,
    date: Regex,
    time: Regex,
    number: Regex,
    enum_literal: Regex,
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("literal patterns are valid regular expressions")
}

static PATTERNS: LazyLock<LiteralPatterns> = LazyLock::new(|| LiteralPatterns {
    uuid: pattern(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"),
    offset_date_time: pattern(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?[+-][0-9]{2}:[0-9]{2}",
    ),
    date_time: pattern(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?"),
    date: pattern(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}"),
    time: pattern(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?"),
    number: pattern(r"^-?[0-9]+(?:\.[0-9]+)?"),
    enum_literal: pattern(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*$"),
});

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '/' && self.peek_char(1) == Some('/') {
                while let Some(ch) = self.current_char() {
                    if ch == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> &'a str {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }
        &self.input[start..self.position]
    }

    fn read_string(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '\'' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    let escape_at = self.position;
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('\'') => result.push('\''),
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some(other) => {
                            return Err(LexError::new(
                                escape_at,
                                format!("invalid escape sequence `\\{}`", other),
                            ));
                        }
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::new(start, "unterminated string literal"))
    }

    /// The word starting at the current position, up to the next delimiter.
    fn offending_word(&self) -> &'a str {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c.is_whitespace() || "(),[]{}'\"".contains(c))
            .unwrap_or(rest.len());
        &rest[..end]
    }

    fn malformed(&self) -> LexError {
        LexError::new(
            self.position,
            format!("malformed literal `{}`", self.offending_word()),
        )
    }

    /// Consumes `len` bytes if the match ends at a token boundary.
    fn take_literal(&mut self, len: usize) -> Result<&'a str, LexError> {
        let text = &self.rest()[..len];
        let continues = self.rest()[len..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || "_-:.+".contains(c));
        if continues {
            return Err(self.malformed());
        }
        self.position += len;
        Ok(text)
    }

    /// Scans a number, temporal or UUID literal. Returns `None` when the
    /// input does not start with any literal form.
    fn read_literal(&mut self) -> Result<Option<Token>, LexError> {
        let start = self.position;
        let patterns = &*PATTERNS;
        let rest = self.rest();

        if let Some(m) = patterns.uuid.find(rest) {
            let text = self.take_literal(m.end())?;
            let uuid = Uuid::parse_str(text)
                .map_err(|e| LexError::new(start, format!("invalid uuid `{}`: {}", text, e)))?;
            return Ok(Some(Token::Uuid(uuid)));
        }

        if let Some(m) = patterns.offset_date_time.find(rest) {
            let text = self.take_literal(m.end())?;
            let value = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%:z").map_err(|e| {
                LexError::new(start, format!("invalid offset date-time `{}`: {}", text, e))
            })?;
            return Ok(Some(Token::OffsetDateTime(value)));
        }

        if let Some(m) = patterns.date_time.find(rest) {
            let text = self.take_literal(m.end())?;
            let value = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .map_err(|e| LexError::new(start, format!("invalid date-time `{}`: {}", text, e)))?;
            return Ok(Some(Token::DateTime(value)));
        }

        if let Some(m) = patterns.date.find(rest) {
            let text = self.take_literal(m.end())?;
            let value = NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|e| LexError::new(start, format!("invalid date `{}`: {}", text, e)))?;
            return Ok(Some(Token::Date(value)));
        }

        if let Some(m) = patterns.time.find(rest) {
            let text = self.take_literal(m.end())?;
            let value = NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
                .map_err(|e| LexError::new(start, format!("invalid time `{}`: {}", text, e)))?;
            return Ok(Some(Token::Time(value)));
        }

        if let Some(m) = patterns.number.find(rest) {
            let text = self.take_literal(m.end())?;
            if text.contains('.') {
                let value = Decimal::from_str(text).map_err(|_| {
                    LexError::new(start, format!("decimal literal `{}` is out of range", text))
                })?;
                return Ok(Some(Token::Float(value)));
            }
            let value = text.parse::<i64>().map_err(|_| {
                LexError::new(start, format!("integer literal `{}` is out of range", text))
            })?;
            return Ok(Some(Token::Int(value)));
        }

        Ok(None)
    }

    fn read_word(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let word = self.read_identifier();

        Ok(match word {
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            "null" => Token::Null,
            w if w.starts_with(|c: char| c.is_ascii_uppercase()) => {
                if !PATTERNS.enum_literal.is_match(w) {
                    return Err(LexError::new(
                        start,
                        format!("invalid enum literal `{}`, expected UPPER_SNAKE_CASE", w),
                    ));
                }
                Token::Enum(w.to_string())
            }
            w => Token::Identifier(w.to_string()),
        })
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    pub fn next_token(&mut self) -> Result<SpannedToken, LexError> {
        self.skip_whitespace();
        let offset = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some('[') => self.single(Token::LBracket),
            Some(']') => self.single(Token::RBracket),
            Some('{') => self.single(Token::LBrace),
            Some('}') => self.single(Token::RBrace),
            Some(',') => self.single(Token::Comma),
            Some('?') => self.single(Token::PositionalParameter),
            Some('\'') => Token::String(self.read_string()?),
            Some('"') => {
                return Err(LexError::new(
                    offset,
                    "string literals must be enclosed in single quotes",
                ));
            }
            Some('@') => {
                self.advance();
                if !self.current_char().is_some_and(|c| c.is_ascii_alphabetic()) {
                    return Err(LexError::new(offset, "expected parameter name after `@`"));
                }
                Token::NamedParameter(self.read_identifier().to_string())
            }
            Some(ch) if ch.is_ascii_digit() => match self.read_literal()? {
                Some(token) => token,
                None => return Err(self.malformed()),
            },
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                match self.read_literal()? {
                    Some(token) => token,
                    None => return Err(self.malformed()),
                }
            }
            Some(ch) if ch.is_ascii_alphabetic() => {
                // lowercase hex letters may start a UUID
                let literal = if ch.is_ascii_hexdigit() && ch.is_ascii_lowercase() {
                    self.read_literal()?
                } else {
                    None
                };
                match literal {
                    Some(token) => token,
                    None => self.read_word()?,
                }
            }
            Some(ch) => {
                return Err(LexError::new(
                    offset,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(SpannedToken { token, offset })
    }

    /// Lexes the whole input, ending with [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<SpannedToken>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
fn kinds(input: &str) -> Vec<Token> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.token)
        .collect()
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("true false null"),
        vec![Token::Boolean(true), Token::Boolean(false), Token::Null, Token::Eof]
    );
}

#[test]
fn test_constraint_call() {
    assert_eq!(
        kinds("attributeEquals('code', ?)"),
        vec![
            Token::Identifier("attributeEquals".to_string()),
            Token::LParen,
            Token::String("code".to_string()),
            Token::Comma,
            Token::PositionalParameter,
            Token::RParen,
            Token::Eof,
        ]
    );
}

#[test]
fn test_offsets_are_byte_positions() {
    let tokens = Lexer::new("and( 'ž', @x)").tokenize().unwrap();
    let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
    assert_eq!(offsets, vec![0, 3, 5, 9, 11, 13, 14]);
}

#[test]
fn test_comment_is_skipped() {
    assert_eq!(
        kinds("random() // pick anything\n"),
        vec![
            Token::Identifier("random".to_string()),
            Token::LParen,
            Token::RParen,
            Token::Eof,
        ]
    );
}

#[test]
fn test_position_locate() {
    let source = "query(\n  collection('a'),\n  bad";
    let position = Position::locate(source, source.find("bad").unwrap());
    assert_eq!(position, Position { line: 3, column: 3 });
}

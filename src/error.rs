//! Error taxonomy shared by every stage of the front end.
//!
//! A parse is all-or-nothing: the first failure aborts the unit being parsed
//! and is returned as a [`ParseError`] carrying the byte offset into the
//! source text. Arity problems found while recognizing argument shapes are
//! reported as [`ParseError::Syntax`] and name the offending slot.

use thiserror::Error;

use crate::lexer::LexError;

/// Coarse classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    TypeMismatch,
    InvalidClassifier,
    UnboundParameter,
    RecursionLimitExceeded,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "lexical error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::InvalidClassifier => "invalid classifier",
            ErrorKind::UnboundParameter => "unbound parameter",
            ErrorKind::RecursionLimitExceeded => "recursion limit exceeded",
        };
        f.write_str(name)
    }
}

/// Error produced while parsing or building a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Malformed literal or unexpected character.
    #[error("lexical error at offset {offset}: {reason}")]
    Lexical { offset: usize, reason: String },

    /// Unexpected token or argument shape, including missing and surplus arguments.
    #[error("syntax error at offset {offset}: expected {expected}, found {found}")]
    Syntax {
        offset: usize,
        expected: String,
        found: String,
    },

    /// A value of the wrong kind for the slot it was supplied to.
    #[error("type mismatch at offset {offset}: {slot} expects {expected}, found {actual}")]
    TypeMismatch {
        offset: usize,
        slot: String,
        expected: String,
        actual: String,
    },

    /// Empty or non-string classifier.
    #[error("invalid classifier at offset {offset}: {value}")]
    InvalidClassifier { offset: usize, value: String },

    /// Parameter with no caller-supplied argument.
    #[error("unbound parameter {parameter} at offset {offset} for {slot}: {reason}")]
    UnboundParameter {
        offset: usize,
        parameter: String,
        slot: String,
        reason: String,
    },

    #[error("constraint nesting deeper than {limit} levels at offset {offset}")]
    RecursionLimitExceeded { offset: usize, limit: usize },
}

impl ParseError {
    pub(crate) fn syntax(offset: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        ParseError::Syntax {
            offset,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub(crate) fn type_mismatch(
        offset: usize,
        slot: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ParseError::TypeMismatch {
            offset,
            slot: slot.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Byte offset into the source text where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Lexical { offset, .. }
            | ParseError::Syntax { offset, .. }
            | ParseError::TypeMismatch { offset, .. }
            | ParseError::InvalidClassifier { offset, .. }
            | ParseError::UnboundParameter { offset, .. }
            | ParseError::RecursionLimitExceeded { offset, .. } => *offset,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lexical { .. } => ErrorKind::Lexical,
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            ParseError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ParseError::InvalidClassifier { .. } => ErrorKind::InvalidClassifier,
            ParseError::UnboundParameter { .. } => ErrorKind::UnboundParameter,
            ParseError::RecursionLimitExceeded { .. } => ErrorKind::RecursionLimitExceeded,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lexical {
            offset: e.offset,
            reason: e.reason,
        }
    }
}

//! CLI support for evitaql-parser
//!
//! Provides programmatic access to the `evitaql` command so other tools can
//! validate queries the same way the binary does.

mod check;
mod convert;
mod keywords;
pub mod logging;

pub use check::{execute_check, CheckOptions, CheckResult, Unit};
pub use convert::{build_arguments, json_arguments, literal_argument, named_argument};
pub use keywords::{get_keyword_category, get_keywords_overview};

use std::io;

use crate::{ParseError, Position};

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Query or argument literal failed to parse
    Parse {
        error: ParseError,
        position: Position,
    },
    /// `--params` is not valid JSON
    Json(serde_json::Error),
    /// `--params` or `--named` has the wrong shape
    Argument(String),
    /// IO error
    Io(io::Error),
    /// No query given and nothing piped to stdin
    NoInput,
    /// Unknown keyword category
    UnknownCategory(String),
}

impl CliError {
    /// Wraps a parse error, locating it in `source`.
    pub fn parse(error: ParseError, source: &str) -> Self {
        let position = Position::locate(source, error.offset());
        CliError::Parse { error, position }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse { error, position } => write!(f, "Parse error ({}): {}", position, error),
            CliError::Json(e) => write!(f, "Invalid JSON parameters: {}", e),
            CliError::Argument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No query provided. Pass it as an argument or pipe it to stdin."),
            CliError::UnknownCategory(c) => {
                write!(
                    f,
                    "Unknown category: '{}'\nExpected one of: head, filter, order, require.",
                    c
                )
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse { error, .. } => Some(error),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

//! Command-line parameter arguments to [`Arguments`]

use crate::{parse_value, Arguments, Value};

use super::CliError;

/// Reads `--params`: a JSON array supplies positional arguments, a JSON
/// object named ones.
pub fn json_arguments(json: &str) -> Result<Arguments, CliError> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    match parsed {
        serde_json::Value::Array(items) => {
            let values = items
                .into_iter()
                .map(json_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Arguments::positional(values))
        }
        serde_json::Value::Object(entries) => {
            let pairs = entries
                .into_iter()
                .map(|(name, value)| Ok((name, json_value(value)?)))
                .collect::<Result<Vec<_>, CliError>>()?;
            Ok(Arguments::named(pairs))
        }
        other => Err(CliError::Argument(format!(
            "--params must be a JSON array or object, found {}",
            other
        ))),
    }
}

fn json_value(json: serde_json::Value) -> Result<Value, CliError> {
    Value::try_from(json).map_err(|e| CliError::Argument(e.to_string()))
}

/// Reads one `--arg` literal, e.g. `10`, `'abc'` or `[1,5]`.
pub fn literal_argument(text: &str) -> Result<Value, CliError> {
    parse_value(text, &Arguments::new()).map_err(|e| CliError::parse(e, text))
}

/// Reads one `--named NAME=LITERAL`.
pub fn named_argument(spec: &str) -> Result<(String, Value), CliError> {
    let (name, literal) = spec
        .split_once('=')
        .ok_or_else(|| CliError::Argument(format!("expected NAME=LITERAL, found `{}`", spec)))?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CliError::Argument(format!("invalid parameter name `{}`", name)));
    }
    Ok((name.to_string(), literal_argument(literal.trim())?))
}

/// Combines `--params`, `--arg` and `--named`. Positional `--arg` values
/// follow the ones from `--params`; `--named` wins over `--params`.
pub fn build_arguments(
    json: Option<&str>,
    positional: &[String],
    named: &[String],
) -> Result<Arguments, CliError> {
    let mut arguments = match json {
        Some(json) => json_arguments(json)?,
        None => Arguments::new(),
    };
    for literal in positional {
        arguments = arguments.with_positional(literal_argument(literal)?);
    }
    for spec in named {
        let (name, value) = named_argument(spec)?;
        arguments = arguments.with_named(name, value);
    }
    Ok(arguments)
}

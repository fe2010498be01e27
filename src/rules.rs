use crate::config::RuleRules;
use crate::matcher::{DecodeError, Matcher};
use crate::record::SyslogMsg;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to read rules file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Rules file '{path}' is neither JSON nor JSON5: {message}")]
    Syntax { path: String, message: String },
    #[error("Rules file '{path}' must hold a matcher object or an array of them")]
    Shape { path: String },
    #[error("Invalid rule in '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: DecodeError,
    },
}

/// Load rules from a JSON or JSON5 file.
///
/// A top-level object is a single rule; a top-level array is a list of rules.
pub fn load_rules(path: &Path, cfg: &RuleRules) -> Result<Vec<Matcher>, RulesError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| RulesError::Read {
        path: path_display.clone(),
        source,
    })?;

    let rules = parse_rules(&raw, cfg).map_err(|e| match e {
        ParseFailure::Syntax(message) => RulesError::Syntax {
            path: path_display.clone(),
            message,
        },
        ParseFailure::Shape => RulesError::Shape {
            path: path_display.clone(),
        },
        ParseFailure::Decode(source) => RulesError::Decode {
            path: path_display.clone(),
            source,
        },
    })?;

    tracing::info!(path = %path_display, count = rules.len(), "loaded rules");
    Ok(rules)
}

#[derive(Debug)]
enum ParseFailure {
    Syntax(String),
    Shape,
    Decode(DecodeError),
}

fn parse_rules(raw: &str, cfg: &RuleRules) -> Result<Vec<Matcher>, ParseFailure> {
    let document = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(json_err) => json5::from_str::<Value>(raw).map_err(|json5_err| {
            ParseFailure::Syntax(format!("{json_err}; as JSON5: {json5_err}"))
        })?,
    };

    let rules = match &document {
        Value::Object(m) => vec![Matcher::decode(m).map_err(ParseFailure::Decode)?],
        Value::Array(items) => Matcher::decode_array(items).map_err(ParseFailure::Decode)?,
        _ => return Err(ParseFailure::Shape),
    };

    if cfg.validate_regex {
        for rule in &rules {
            rule.validate().map_err(ParseFailure::Decode)?;
        }
    }

    Ok(rules)
}

/// Index of the first rule matching `msg`
pub fn first_match(rules: &[Matcher], msg: &SyslogMsg) -> Option<usize> {
    rules.iter().position(|rule| rule.matches(msg))
}

/// Encode rules back to their canonical JSON document
pub fn encode_rules(rules: &[Matcher]) -> Value {
    Value::Array(
        rules
            .iter()
            .map(|rule| Value::Object(rule.encode()))
            .collect(),
    )
}

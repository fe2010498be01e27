use crate::config::RecordRules;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

mod entities;

pub use entities::{Facility, Severity, SyslogMsg};

/// Record parse error types
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record must be a JSON object")]
    NotAnObject,

    #[error("record is missing '{0}'")]
    MissingField(&'static str),

    #[error("record field '{0}' is not a string")]
    NotAString(&'static str),

    #[error("unknown facility '{0}'")]
    UnknownFacility(String),

    #[error("unknown severity '{0}'")]
    UnknownSeverity(String),

    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<RecordError>,
    },
}

/// Parses newline-delimited JSON records from a file
pub fn parse_records(
    path: impl AsRef<Path>,
    rules: &RecordRules,
) -> Result<Vec<SyslogMsg>, RecordError> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_record(&line, rules).map_err(|source| RecordError::Line {
            line: index + 1,
            source: Box::new(source),
        })?;
        records.push(record);
    }

    tracing::debug!(count = records.len(), "parsed records");
    Ok(records)
}

/// Parses one JSON record into a SyslogMsg
///
/// `facility`, `severity` and `timestamp` (RFC 3339) are required; `host`,
/// `program` and `content` default to empty strings. The payload comes from an
/// explicit `json` object, or from `content` when it holds a JSON object and
/// `rules.parse_json_content` is set.
pub fn parse_record(line: &str, rules: &RecordRules) -> Result<SyslogMsg, RecordError> {
    let value: Value = serde_json::from_str(line)?;
    let Value::Object(obj) = value else {
        return Err(RecordError::NotAnObject);
    };

    let facility = required_str(&obj, "facility")?;
    let facility = facility
        .parse::<Facility>()
        .map_err(RecordError::UnknownFacility)?;

    let severity = required_str(&obj, "severity")?;
    let severity = severity
        .parse::<Severity>()
        .map_err(RecordError::UnknownSeverity)?;

    let timestamp = required_str(&obj, "timestamp")?;
    let time = DateTime::parse_from_rfc3339(timestamp)
        .map_err(|source| RecordError::InvalidTimestamp {
            value: timestamp.to_string(),
            source,
        })?
        .with_timezone(&Utc);

    let content = optional_str(&obj, "content")?;

    let mut msg = SyslogMsg::new()
        .with_facility(facility)
        .with_severity(severity)
        .with_time(time)
        .with_host(optional_str(&obj, "host")?)
        .with_program(optional_str(&obj, "program")?)
        .with_content(content);

    if let Some(payload) = obj.get("json").filter(|v| v.is_object()) {
        msg = msg.with_json(payload.clone());
    } else if rules.parse_json_content {
        if let Some(payload) = json_content(content) {
            msg = msg.with_json(payload);
        }
    }

    Ok(msg)
}

fn required_str<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, RecordError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(RecordError::NotAString(field)),
        None => Err(RecordError::MissingField(field)),
    }
}

fn optional_str<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, RecordError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Null) | None => Ok(""),
        Some(_) => Err(RecordError::NotAString(field)),
    }
}

/// Content that is itself a JSON object becomes the payload
fn json_content(content: &str) -> Option<Value> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with('{') {
        return None;
    }
    serde_json::from_str::<Value>(trimmed)
        .ok()
        .filter(Value::is_object)
}

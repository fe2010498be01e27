use super::error::DecodeError;
use super::fields::{match_str, match_type_field, string_field};
use super::match_type::MatchType;
use crate::record::SyslogMsg;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

const KIND: &str = "value matcher";

/// Which string field of a message a [`Value`] matcher inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Host,
    Program,
    Content,
}

impl ValueType {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ValueType::Host => "host",
            ValueType::Program => "program",
            ValueType::Content => "content",
        }
    }

    fn extract<'a>(&self, msg: &'a SyslogMsg) -> &'a str {
        match self {
            ValueType::Host => &msg.host,
            ValueType::Program => &msg.program,
            ValueType::Content => &msg.content,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for ValueType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(ValueType::Host),
            "program" => Ok(ValueType::Program),
            "content" => Ok(ValueType::Content),
            _ => Err(DecodeError::InvalidValueType(s.to_string())),
        }
    }
}

/// String comparison against the host, program or content of a message
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub value_type: ValueType,
    pub match_type: MatchType,
    pub value: String,
}

impl Value {
    pub fn new(value_type: ValueType, match_type: MatchType, value: impl Into<String>) -> Self {
        Self {
            value_type,
            match_type,
            value: value.into(),
        }
    }

    pub fn matches(&self, msg: &SyslogMsg) -> bool {
        match_str(self.match_type, self.value_type.extract(msg), &self.value)
    }

    /// Decode from the `value_matcher` sub-map (`type`, `match_type`, `value`)
    pub fn decode(m: &Map<String, JsonValue>) -> Result<Self, DecodeError> {
        let value_type = string_field(m, KIND, "type")?
            .map(str::parse::<ValueType>)
            .transpose()?;
        let match_type = match_type_field(m, KIND)?;
        let value = string_field(m, KIND, "value")?;

        match (value_type, match_type, value) {
            (Some(value_type), Some(match_type), Some(value)) => {
                Ok(Self::new(value_type, match_type, value))
            }
            _ => Err(DecodeError::MissingFields { kind: KIND }),
        }
    }

    pub fn encode(&self, out: &mut Map<String, JsonValue>) {
        out.insert("type".into(), self.value_type.canonical_name().into());
        out.insert("match_type".into(), self.match_type.canonical_name().into());
        out.insert("value".into(), self.value.clone().into());
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, \"{}\")", self.value_type, self.match_type, self.value)
    }
}

use super::error::DecodeError;
use super::fields::{match_str, match_type_field, string_field};
use super::match_type::MatchType;
use crate::record::SyslogMsg;
use serde_json::{Map, Value};
use std::fmt;

const KIND: &str = "hostname matcher";

/// String comparison against the host of a message
#[derive(Debug, Clone, PartialEq)]
pub struct Hostname {
    pub match_type: MatchType,
    pub name: String,
}

impl Hostname {
    pub fn new(match_type: MatchType, name: impl Into<String>) -> Self {
        Self {
            match_type,
            name: name.into(),
        }
    }

    pub fn matches(&self, msg: &SyslogMsg) -> bool {
        match_str(self.match_type, &msg.host, &self.name)
    }

    pub fn decode(m: &Map<String, Value>) -> Result<Self, DecodeError> {
        let match_type = match_type_field(m, KIND)?;
        let name = string_field(m, KIND, "hostname")?;

        match (match_type, name) {
            (Some(match_type), Some(name)) => Ok(Self::new(match_type, name)),
            _ => Err(DecodeError::MissingFields { kind: KIND }),
        }
    }

    pub fn encode(&self, out: &mut Map<String, Value>) {
        out.insert("match_type".into(), self.match_type.canonical_name().into());
        out.insert("hostname".into(), self.name.clone().into());
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hostname({}, {})", self.match_type, self.name)
    }
}

use super::error::DecodeError;
use super::fields::{match_type_field, string_field};
use super::match_type::MatchType;
use crate::record::{self, SyslogMsg};
use serde_json::{Map, Value};
use std::fmt;

const KIND: &str = "severity matcher";

/// Ordered comparison on the syslog severity
#[derive(Debug, Clone, PartialEq)]
pub struct Severity {
    pub match_type: MatchType,
    pub severity: record::Severity,
}

impl Severity {
    pub fn new(match_type: MatchType, severity: record::Severity) -> Self {
        Self {
            match_type,
            severity,
        }
    }

    /// Syslog severity codes are lower for higher severities, so `lt` means
    /// "less severe than" and holds when the message code is greater.
    pub fn matches(&self, msg: &SyslogMsg) -> bool {
        let m = msg.severity.code();
        let s = self.severity.code();
        match self.match_type {
            MatchType::Equals => m == s,
            MatchType::LessThan => m > s,
            MatchType::LessThanEqual => m >= s,
            MatchType::GreaterThan => m < s,
            MatchType::GreaterThanEqual => m <= s,
            MatchType::ExactMatch | MatchType::PrefixMatch | MatchType::Contains | MatchType::Regex => {
                false
            }
        }
    }

    pub fn decode(m: &Map<String, Value>) -> Result<Self, DecodeError> {
        let match_type = match_type_field(m, KIND)?;
        let severity = string_field(m, KIND, "severity")?
            .map(|s| {
                s.parse::<record::Severity>()
                    .map_err(DecodeError::InvalidSeverity)
            })
            .transpose()?;

        match (match_type, severity) {
            (Some(match_type), Some(severity)) => Ok(Self::new(match_type, severity)),
            _ => Err(DecodeError::MissingFields { kind: KIND }),
        }
    }

    pub fn encode(&self, out: &mut Map<String, Value>) {
        out.insert("match_type".into(), self.match_type.canonical_name().into());
        out.insert("severity".into(), self.severity.name().into());
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "severity({}, {})", self.match_type, self.severity)
    }
}

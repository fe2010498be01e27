use super::error::DecodeError;
use super::fields::string_field;
use crate::record::{self, SyslogMsg};
use serde_json::{Map, Value};
use std::fmt;

const KIND: &str = "facility matcher";

/// Equality test on the syslog facility
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub facility: record::Facility,
}

impl Facility {
    pub fn new(facility: record::Facility) -> Self {
        Self { facility }
    }

    pub fn matches(&self, msg: &SyslogMsg) -> bool {
        self.facility == msg.facility
    }

    pub fn decode(m: &Map<String, Value>) -> Result<Self, DecodeError> {
        let Some(name) = string_field(m, KIND, "facility")? else {
            return Err(DecodeError::MissingFields { kind: KIND });
        };
        let facility = name
            .parse::<record::Facility>()
            .map_err(DecodeError::InvalidFacility)?;
        Ok(Self::new(facility))
    }

    pub fn encode(&self, out: &mut Map<String, Value>) {
        out.insert("facility".into(), self.facility.name().into());
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "facility({})", self.facility)
    }
}

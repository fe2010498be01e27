use super::Matcher;
use super::error::DecodeError;
use super::fields::string_field;
use crate::record::SyslogMsg;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

const KIND: &str = "n-ary op";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NAryOpType {
    And,
    Or,
}

impl NAryOpType {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            NAryOpType::And => "and",
            NAryOpType::Or => "or",
        }
    }
}

impl fmt::Display for NAryOpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for NAryOpType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(NAryOpType::And),
            "or" => Ok(NAryOpType::Or),
            _ => Err(DecodeError::InvalidNAryOp(s.to_string())),
        }
    }
}

/// An n-ary operation over an ordered list of child matchers
#[derive(Debug, Clone, PartialEq)]
pub struct NAryOp {
    pub op: NAryOpType,
    pub matchers: Vec<Matcher>,
}

impl NAryOp {
    pub fn new(op: NAryOpType, matchers: Vec<Matcher>) -> Self {
        Self { op, matchers }
    }

    /// Short-circuits. An empty `and` is true and an empty `or` is false.
    pub fn matches(&self, msg: &SyslogMsg) -> bool {
        match self.op {
            NAryOpType::And => self.matchers.iter().all(|m| m.matches(msg)),
            NAryOpType::Or => self.matchers.iter().any(|m| m.matches(msg)),
        }
    }

    /// Decode from the `n_ary_op` sub-map; children keep their input order.
    pub fn decode(m: &Map<String, Value>) -> Result<Self, DecodeError> {
        let op = string_field(m, KIND, "type")?
            .map(str::parse::<NAryOpType>)
            .transpose()?;
        let matchers = match m.get("matchers") {
            None => None,
            Some(Value::Array(items)) => Some(Matcher::decode_array(items)?),
            Some(_) => {
                return Err(DecodeError::NotAnArray {
                    kind: KIND,
                    field: "matchers",
                });
            }
        };

        match (op, matchers) {
            (Some(op), Some(matchers)) => Ok(Self::new(op, matchers)),
            _ => Err(DecodeError::MissingFields { kind: KIND }),
        }
    }

    pub fn encode(&self, out: &mut Map<String, Value>) {
        out.insert("type".into(), self.op.canonical_name().into());
        let matchers = self
            .matchers
            .iter()
            .map(|m| Value::Object(m.encode()))
            .collect();
        out.insert("matchers".into(), Value::Array(matchers));
    }
}

impl fmt::Display for NAryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, m) in self.matchers.iter().enumerate() {
            if i != 0 {
                write!(f, " {} ", self.op)?;
            }
            write!(f, "{m}")?;
        }
        f.write_str(")")
    }
}

use super::Matcher;
use super::error::DecodeError;
use super::fields::string_field;
use crate::record::SyslogMsg;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

const KIND: &str = "unary op";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOpType {
    Not,
}

impl UnaryOpType {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            UnaryOpType::Not => "not",
        }
    }
}

impl fmt::Display for UnaryOpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for UnaryOpType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not" => Ok(UnaryOpType::Not),
            _ => Err(DecodeError::InvalidUnaryOp(s.to_string())),
        }
    }
}

/// A unary operation applied to one child matcher
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: UnaryOpType,
    pub matcher: Box<Matcher>,
}

impl UnaryOp {
    pub fn new(op: UnaryOpType, matcher: impl Into<Matcher>) -> Self {
        Self {
            op,
            matcher: Box::new(matcher.into()),
        }
    }

    pub fn matches(&self, msg: &SyslogMsg) -> bool {
        match self.op {
            UnaryOpType::Not => !self.matcher.matches(msg),
        }
    }

    /// Decode from the `unary_op` sub-map; `matcher` is decoded recursively.
    pub fn decode(m: &Map<String, Value>) -> Result<Self, DecodeError> {
        let op = string_field(m, KIND, "type")?
            .map(str::parse::<UnaryOpType>)
            .transpose()?;
        let matcher = match m.get("matcher") {
            None => None,
            Some(Value::Object(inner)) => Some(Matcher::decode(inner)?),
            Some(_) => {
                return Err(DecodeError::NotAMapField {
                    kind: KIND,
                    field: "matcher",
                });
            }
        };

        match (op, matcher) {
            (Some(op), Some(matcher)) => Ok(Self::new(op, matcher)),
            _ => Err(DecodeError::MissingFields { kind: KIND }),
        }
    }

    pub fn encode(&self, out: &mut Map<String, Value>) {
        out.insert("type".into(), self.op.canonical_name().into());
        out.insert("matcher".into(), Value::Object(self.matcher.encode()));
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.matcher)
    }
}

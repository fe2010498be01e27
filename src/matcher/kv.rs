use super::error::DecodeError;
use super::fields::{match_str, match_type_field, string_field};
use super::match_type::MatchType;
use crate::record::SyslogMsg;
use serde_json::{Map, Value};
use std::fmt;

const KIND: &str = "kv matcher";

/// Literal a [`Kv`] matcher compares against
#[derive(Debug, Clone, PartialEq)]
pub enum KvValue {
    Str(String),
    /// Integers are widened to `f64`; equality is exact float equality.
    /// Always finite when built through `TryFrom<f64>`.
    Num(f64),
    Bool(bool),
}

impl From<&str> for KvValue {
    fn from(v: &str) -> Self {
        KvValue::Str(v.to_string())
    }
}

impl From<String> for KvValue {
    fn from(v: String) -> Self {
        KvValue::Str(v)
    }
}

/// JSON has no NaN or infinity, so a non-finite literal could not be encoded.
impl TryFrom<f64> for KvValue {
    type Error = DecodeError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        if v.is_finite() {
            Ok(KvValue::Num(v))
        } else {
            Err(DecodeError::NonFiniteNumber(v))
        }
    }
}

impl From<i64> for KvValue {
    fn from(v: i64) -> Self {
        KvValue::Num(v as f64)
    }
}

impl From<i32> for KvValue {
    fn from(v: i32) -> Self {
        KvValue::Num(f64::from(v))
    }
}

impl From<bool> for KvValue {
    fn from(v: bool) -> Self {
        KvValue::Bool(v)
    }
}

impl fmt::Display for KvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KvValue::Str(s) => write!(f, "\"{s}\""),
            KvValue::Num(n) => write!(f, "{n}"),
            KvValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Comparison against a value found by walking a dotted key path through the
/// message's JSON payload
#[derive(Debug, Clone, PartialEq)]
pub struct Kv {
    pub key: String,
    pub match_type: MatchType,
    pub value: KvValue,
}

impl Kv {
    pub fn new(key: impl Into<String>, match_type: MatchType, value: impl Into<KvValue>) -> Self {
        Self {
            key: key.into(),
            match_type,
            value: value.into(),
        }
    }

    pub fn matches(&self, msg: &SyslogMsg) -> bool {
        let Some(payload) = msg.payload() else {
            return false;
        };
        let Some(found) = lookup(payload, &self.key) else {
            return false;
        };

        match &self.value {
            KvValue::Str(literal) => match found.as_str() {
                Some(s) => match_str(self.match_type, s, literal),
                None => false,
            },
            KvValue::Num(literal) => match found.as_f64() {
                Some(n) => compare_num(self.match_type, n, *literal),
                None => false,
            },
            KvValue::Bool(literal) => {
                self.match_type == MatchType::Equals && found.as_bool() == Some(*literal)
            }
        }
    }

    /// Decode from the `kv_matcher` sub-map.
    ///
    /// Requires `key`, `match_type` and at least one non-null literal among
    /// `str_value`, `num_value` and `bool_value`. When several are set, the one
    /// visited last wins. A `num_value` that is not a number counts as unset.
    pub fn decode(m: &Map<String, Value>) -> Result<Self, DecodeError> {
        let key = string_field(m, KIND, "key")?;
        let match_type = match_type_field(m, KIND)?;

        let mut value = None;
        for (field, v) in m {
            match (field.as_str(), v) {
                (_, Value::Null) => {}
                ("str_value", Value::String(s)) => value = Some(KvValue::Str(s.clone())),
                ("str_value", _) => {
                    return Err(DecodeError::NotAString {
                        kind: KIND,
                        field: "str_value",
                    });
                }
                ("num_value", Value::Number(n)) => {
                    if let Some(n) = n.as_f64() {
                        value = Some(KvValue::Num(n));
                    }
                }
                ("bool_value", Value::Bool(b)) => value = Some(KvValue::Bool(*b)),
                ("bool_value", _) => {
                    return Err(DecodeError::NotABool {
                        kind: KIND,
                        field: "bool_value",
                    });
                }
                _ => {}
            }
        }

        match (key, match_type, value) {
            (Some(key), Some(match_type), Some(value)) => Ok(Self::new(key, match_type, value)),
            _ => Err(DecodeError::MissingFields { kind: KIND }),
        }
    }

    /// Writes all three literal slots; the unused ones are `null`.
    pub fn encode(&self, out: &mut Map<String, Value>) {
        out.insert("key".into(), self.key.clone().into());
        out.insert("match_type".into(), self.match_type.canonical_name().into());

        let (str_value, num_value, bool_value) = match &self.value {
            KvValue::Str(s) => (Value::from(s.clone()), Value::Null, Value::Null),
            KvValue::Num(n) => (Value::Null, Value::from(*n), Value::Null),
            KvValue::Bool(b) => (Value::Null, Value::Null, Value::from(*b)),
        };
        out.insert("str_value".into(), str_value);
        out.insert("num_value".into(), num_value);
        out.insert("bool_value".into(), bool_value);
    }
}

impl fmt::Display for Kv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kv(\"{}\", {}, {})", self.key, self.match_type, self.value)
    }
}

/// Walk `path` segment by segment; every step must land on an object holding the key.
fn lookup<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn compare_num(match_type: MatchType, found: f64, literal: f64) -> bool {
    match match_type {
        MatchType::Equals => found == literal,
        MatchType::LessThan => found < literal,
        MatchType::LessThanEqual => found <= literal,
        MatchType::GreaterThan => found > literal,
        MatchType::GreaterThanEqual => found >= literal,
        MatchType::ExactMatch | MatchType::PrefixMatch | MatchType::Contains | MatchType::Regex => {
            false
        }
    }
}

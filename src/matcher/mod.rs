//! Predicate trees over syslog messages
//!
//! A [`Matcher`] is either a leaf that inspects one part of a [`SyslogMsg`]
//! or a combinator (`not`, `and`, `or`) over other matchers. Trees are
//! evaluated with [`Matcher::matches`], which never fails: malformed regexes,
//! missing payload keys and type mismatches all evaluate to `false`.
//!
//! # Wire format
//!
//! Every matcher encodes to a JSON object with exactly one key naming its
//! kind, whose value holds the variant's fields:
//!
//! ```text
//! {"n_ary_op": {"type": "and", "matchers": [
//!     {"facility_matcher": {"facility": "kern"}},
//!     {"severity_matcher": {"match_type": "lt", "severity": "warning"}}
//! ]}}
//! ```
//!
//! Recognised kinds: `facility_matcher`, `severity_matcher`,
//! `timestamp_matcher`, `hostname_matcher`, `value_matcher`, `kv_matcher`,
//! `unary_op`, `n_ary_op`.

pub mod error;
mod facility;
mod fields;
mod hostname;
mod kv;
mod match_type;
mod n_ary_op;
mod severity;
mod timestamp;
mod unary_op;
mod value;

use crate::record::SyslogMsg;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

pub use error::DecodeError;
pub use facility::Facility;
pub use hostname::Hostname;
pub use kv::{Kv, KvValue};
pub use match_type::MatchType;
pub use n_ary_op::{NAryOp, NAryOpType};
pub use severity::Severity;
pub use timestamp::{STAMP_FORMAT, Timestamp, parse_stamp};
pub use unary_op::{UnaryOp, UnaryOpType};
pub use value::{Value, ValueType};

/// A node of a predicate tree
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    Facility(Facility),
    Severity(Severity),
    Timestamp(Timestamp),
    Hostname(Hostname),
    Value(Value),
    Kv(Kv),
    UnaryOp(UnaryOp),
    NAryOp(NAryOp),
}

impl Matcher {
    /// Wire key naming this matcher's kind
    pub fn kind_key(&self) -> &'static str {
        match self {
            Matcher::Facility(_) => "facility_matcher",
            Matcher::Severity(_) => "severity_matcher",
            Matcher::Timestamp(_) => "timestamp_matcher",
            Matcher::Hostname(_) => "hostname_matcher",
            Matcher::Value(_) => "value_matcher",
            Matcher::Kv(_) => "kv_matcher",
            Matcher::UnaryOp(_) => "unary_op",
            Matcher::NAryOp(_) => "n_ary_op",
        }
    }

    pub fn matches(&self, msg: &SyslogMsg) -> bool {
        match self {
            Matcher::Facility(m) => m.matches(msg),
            Matcher::Severity(m) => m.matches(msg),
            Matcher::Timestamp(m) => m.matches(msg),
            Matcher::Hostname(m) => m.matches(msg),
            Matcher::Value(m) => m.matches(msg),
            Matcher::Kv(m) => m.matches(msg),
            Matcher::UnaryOp(m) => m.matches(msg),
            Matcher::NAryOp(m) => m.matches(msg),
        }
    }

    /// Decode a one-key matcher map
    pub fn decode(m: &Map<String, JsonValue>) -> Result<Self, DecodeError> {
        if m.len() > 1 {
            return Err(DecodeError::TooManyKeys);
        }
        let Some((kind, inner)) = m.iter().next() else {
            return Err(DecodeError::NoValidTypes);
        };
        let JsonValue::Object(inner) = inner else {
            return Err(DecodeError::NotAMap);
        };

        let matcher = match kind.as_str() {
            "facility_matcher" => Matcher::Facility(Facility::decode(inner)?),
            "severity_matcher" => Matcher::Severity(Severity::decode(inner)?),
            "timestamp_matcher" => Matcher::Timestamp(Timestamp::decode(inner)?),
            "hostname_matcher" => Matcher::Hostname(Hostname::decode(inner)?),
            "value_matcher" => Matcher::Value(Value::decode(inner)?),
            "kv_matcher" => Matcher::Kv(Kv::decode(inner)?),
            "unary_op" => Matcher::UnaryOp(UnaryOp::decode(inner)?),
            "n_ary_op" => Matcher::NAryOp(NAryOp::decode(inner)?),
            _ => return Err(DecodeError::NoValidTypes),
        };

        tracing::debug!(kind = kind.as_str(), "decoded matcher");
        Ok(matcher)
    }

    /// Decode a sequence of one-key matcher maps, keeping their order
    pub fn decode_array(items: &[JsonValue]) -> Result<Vec<Self>, DecodeError> {
        items
            .iter()
            .map(|item| match item {
                JsonValue::Object(m) => Matcher::decode(m),
                _ => Err(DecodeError::ArrayItemNotAMap),
            })
            .collect()
    }

    /// Write this matcher's kind key and a fresh sub-map into `out`
    pub fn encode_into(&self, out: &mut Map<String, JsonValue>) {
        let mut inner = Map::new();
        match self {
            Matcher::Facility(m) => m.encode(&mut inner),
            Matcher::Severity(m) => m.encode(&mut inner),
            Matcher::Timestamp(m) => m.encode(&mut inner),
            Matcher::Hostname(m) => m.encode(&mut inner),
            Matcher::Value(m) => m.encode(&mut inner),
            Matcher::Kv(m) => m.encode(&mut inner),
            Matcher::UnaryOp(m) => m.encode(&mut inner),
            Matcher::NAryOp(m) => m.encode(&mut inner),
        }
        out.insert(self.kind_key().to_string(), JsonValue::Object(inner));
    }

    /// Encode into a new one-key map
    pub fn encode(&self) -> Map<String, JsonValue> {
        let mut out = Map::new();
        self.encode_into(&mut out);
        out
    }

    /// Check every regex literal in the tree compiles and every KV number is finite.
    ///
    /// Evaluation treats a bad regex as no match; this lets rule loading reject it instead.
    pub fn validate(&self) -> Result<(), DecodeError> {
        match self {
            Matcher::Facility(_) | Matcher::Severity(_) | Matcher::Timestamp(_) => Ok(()),
            Matcher::Hostname(m) => fields::check_regex(m.match_type, &m.name),
            Matcher::Value(m) => fields::check_regex(m.match_type, &m.value),
            Matcher::Kv(m) => match &m.value {
                KvValue::Str(s) => fields::check_regex(m.match_type, s),
                KvValue::Num(n) if !n.is_finite() => Err(DecodeError::NonFiniteNumber(*n)),
                KvValue::Num(_) | KvValue::Bool(_) => Ok(()),
            },
            Matcher::UnaryOp(m) => m.matcher.validate(),
            Matcher::NAryOp(m) => m.matchers.iter().try_for_each(Matcher::validate),
        }
    }

    /// Shorthand for `not self`
    pub fn negate(self) -> Self {
        UnaryOp::new(UnaryOpType::Not, self).into()
    }

    pub fn all(matchers: Vec<Matcher>) -> Self {
        NAryOp::new(NAryOpType::And, matchers).into()
    }

    pub fn any(matchers: Vec<Matcher>) -> Self {
        NAryOp::new(NAryOpType::Or, matchers).into()
    }
}

/// Decode a one-key matcher map. See [`Matcher::decode`].
pub fn decode(m: &Map<String, JsonValue>) -> Result<Matcher, DecodeError> {
    Matcher::decode(m)
}

/// Decode a sequence of matcher maps. See [`Matcher::decode_array`].
pub fn decode_array(items: &[JsonValue]) -> Result<Vec<Matcher>, DecodeError> {
    Matcher::decode_array(items)
}

/// Encode `matcher` into `out`. See [`Matcher::encode_into`].
pub fn encode(matcher: &Matcher, out: &mut Map<String, JsonValue>) {
    matcher.encode_into(out)
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Facility(m) => fmt::Display::fmt(m, f),
            Matcher::Severity(m) => fmt::Display::fmt(m, f),
            Matcher::Timestamp(m) => fmt::Display::fmt(m, f),
            Matcher::Hostname(m) => fmt::Display::fmt(m, f),
            Matcher::Value(m) => fmt::Display::fmt(m, f),
            Matcher::Kv(m) => fmt::Display::fmt(m, f),
            Matcher::UnaryOp(m) => fmt::Display::fmt(m, f),
            Matcher::NAryOp(m) => fmt::Display::fmt(m, f),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Matcher {
                fn from(m: $variant) -> Self {
                    Matcher::$variant(m)
                }
            }
        )*
    };
}

impl_from_variant!(Facility, Severity, Timestamp, Hostname, Value, Kv, UnaryOp, NAryOp);

impl Serialize for Matcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encode().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Matcher {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let m = Map::<String, JsonValue>::deserialize(deserializer)?;
        Matcher::decode(&m).map_err(de::Error::custom)
    }
}

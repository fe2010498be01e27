use thiserror::Error;

/// Errors that can occur when decoding a matcher from its wire map
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to decode matcher, found too many keys")]
    TooManyKeys,

    #[error("failed to decode matcher into map")]
    NotAMap,

    #[error("failed to decode matcher, found no valid types")]
    NoValidTypes,

    #[error("failed to decode matchers, found item that wasn't a map")]
    ArrayItemNotAMap,

    #[error("failed to decode {kind}, missing fields")]
    MissingFields { kind: &'static str },

    #[error("failed to decode {kind}, {field} is not a string")]
    NotAString {
        kind: &'static str,
        field: &'static str,
    },

    #[error("failed to decode {kind}, {field} is not a bool")]
    NotABool {
        kind: &'static str,
        field: &'static str,
    },

    #[error("failed to decode {kind}, {field} is not a map")]
    NotAMapField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("failed to decode {kind}, {field} is not an array")]
    NotAnArray {
        kind: &'static str,
        field: &'static str,
    },

    #[error("failed to convert '{0}' to MatchType")]
    InvalidMatchType(String),

    #[error("failed to convert '{0}' to ValueType")]
    InvalidValueType(String),

    #[error("failed to convert '{0}' to Facility")]
    InvalidFacility(String),

    #[error("failed to convert '{0}' to Severity")]
    InvalidSeverity(String),

    #[error("failed to convert '{0}' to UnaryOpType")]
    InvalidUnaryOp(String),

    #[error("failed to convert '{0}' to NAryOpType")]
    InvalidNAryOp(String),

    #[error("failed to decode timestamp matcher, '{value}' is not a valid stamp: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("kv literal {0} is not a finite number")]
    NonFiniteNumber(f64),

    #[error("invalid regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

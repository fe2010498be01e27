//! Shared helpers for reading wire fields and comparing strings.

use super::error::DecodeError;
use super::match_type::MatchType;
use regex::Regex;
use serde_json::{Map, Value};

/// Read an optional string field. Absent yields `None`; present but not a string is an error.
pub(crate) fn string_field<'a>(
    m: &'a Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<Option<&'a str>, DecodeError> {
    match m.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(DecodeError::NotAString { kind, field }),
    }
}

/// Read and parse the `match_type` field
pub(crate) fn match_type_field(
    m: &Map<String, Value>,
    kind: &'static str,
) -> Result<Option<MatchType>, DecodeError> {
    string_field(m, kind, "match_type")?
        .map(str::parse::<MatchType>)
        .transpose()
}

/// Compare a record field against a string literal.
///
/// Numeric operators never match. A literal that fails to compile as a regex is no match.
pub(crate) fn match_str(match_type: MatchType, field: &str, literal: &str) -> bool {
    match match_type {
        MatchType::ExactMatch | MatchType::Equals => field == literal,
        MatchType::PrefixMatch => field.starts_with(literal),
        MatchType::Contains => field.contains(literal),
        MatchType::Regex => match Regex::new(literal) {
            Ok(re) => re.is_match(field),
            Err(e) => {
                tracing::debug!(pattern = literal, error = %e, "invalid regex treated as no match");
                false
            }
        },
        MatchType::LessThan
        | MatchType::LessThanEqual
        | MatchType::GreaterThan
        | MatchType::GreaterThanEqual => false,
    }
}

/// Check that a regex literal compiles, for load-time validation
pub(crate) fn check_regex(match_type: MatchType, literal: &str) -> Result<(), DecodeError> {
    if match_type != MatchType::Regex {
        return Ok(());
    }
    Regex::new(literal)
        .map(|_| ())
        .map_err(|source| DecodeError::InvalidRegex {
            pattern: literal.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_string_field() {
        let m = map(json!({"a": "x", "b": 1, "c": null}));
        assert_eq!(string_field(&m, "test", "a").unwrap(), Some("x"));
        assert_eq!(string_field(&m, "test", "missing").unwrap(), None);
        assert!(string_field(&m, "test", "b").is_err());
        assert!(string_field(&m, "test", "c").is_err());
    }

    #[test]
    fn test_match_str_operators() {
        assert!(match_str(MatchType::ExactMatch, "foo", "foo"));
        assert!(match_str(MatchType::Equals, "foo", "foo"));
        assert!(!match_str(MatchType::ExactMatch, "foo", "fo"));
        assert!(match_str(MatchType::PrefixMatch, "foobar", "foo"));
        assert!(match_str(MatchType::Contains, "foobar", "oba"));
        assert!(match_str(MatchType::Regex, "cool.website.com", "c.o"));
        assert!(!match_str(MatchType::LessThan, "a", "b"));
    }

    #[test]
    fn test_malformed_regex_is_no_match() {
        assert!(!match_str(MatchType::Regex, "((", "(("));
        assert!(check_regex(MatchType::Regex, "((").is_err());
        assert!(check_regex(MatchType::Contains, "((").is_ok());
    }
}

use super::error::DecodeError;
use std::fmt;
use std::str::FromStr;

/// Comparison operator used by the leaf matchers.
///
/// The canonical tokens returned by [`MatchType::canonical_name`] are part of the
/// persisted rule format and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    // String types
    ExactMatch,
    PrefixMatch,
    Contains,
    Regex,

    // Numeric types
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,

    // Universal types
    Equals,
}

impl MatchType {
    /// Get the canonical wire token of this match type
    pub fn canonical_name(&self) -> &'static str {
        match self {
            MatchType::ExactMatch => "exact_match",
            MatchType::PrefixMatch => "prefix_match",
            MatchType::Contains => "contains",
            MatchType::Regex => "regex",
            MatchType::LessThan => "lt",
            MatchType::LessThanEqual => "lte",
            MatchType::GreaterThan => "gt",
            MatchType::GreaterThanEqual => "gte",
            MatchType::Equals => "equals",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for MatchType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact_match" => Ok(MatchType::ExactMatch),
            "prefix_match" => Ok(MatchType::PrefixMatch),
            "contains" => Ok(MatchType::Contains),
            "regex" => Ok(MatchType::Regex),
            "lt" => Ok(MatchType::LessThan),
            "lte" => Ok(MatchType::LessThanEqual),
            "gt" => Ok(MatchType::GreaterThan),
            "gte" => Ok(MatchType::GreaterThanEqual),
            "equals" => Ok(MatchType::Equals),
            _ => Err(DecodeError::InvalidMatchType(s.to_string())),
        }
    }
}

use super::error::DecodeError;
use super::fields::{match_type_field, string_field};
use super::match_type::MatchType;
use crate::record::SyslogMsg;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde_json::{Map, Value};
use std::fmt;

const KIND: &str = "timestamp matcher";

/// Wire format of the `timestamp` field, e.g. `Jan  2 15:04:05`
pub const STAMP_FORMAT: &str = "%b %e %H:%M:%S";

/// Parse a year-less stamp. The result lands in year 0, UTC.
pub fn parse_stamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(&format!("0000 {s}"), &format!("%Y {STAMP_FORMAT}"))
        .map(|naive| naive.and_utc())
}

/// Drop what a stamp cannot carry: the year becomes 0 and sub-seconds are cut.
fn to_stamp_resolution(t: DateTime<Utc>) -> DateTime<Utc> {
    // Year 0 is a leap year, so every month/day pair exists in it.
    NaiveDate::from_ymd_opt(0, t.month(), t.day())
        .and_then(|date| date.and_hms_opt(t.hour(), t.minute(), t.second()))
        .map(|naive| naive.and_utc())
        .unwrap_or(t)
}

/// Comparison of the message time against a fixed instant
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    pub match_type: MatchType,
    pub timestamp: DateTime<Utc>,
}

impl Timestamp {
    /// The instant is reduced to stamp resolution (year 0, whole seconds), the
    /// same value [`Timestamp::decode`] would produce from its encoding.
    pub fn new(match_type: MatchType, timestamp: DateTime<Utc>) -> Self {
        Self {
            match_type,
            timestamp: to_stamp_resolution(timestamp),
        }
    }

    /// Inclusive operators behave like the strict ones when comparing time.
    pub fn matches(&self, msg: &SyslogMsg) -> bool {
        match self.match_type {
            MatchType::Equals => self.timestamp == msg.time,
            MatchType::LessThan | MatchType::LessThanEqual => self.timestamp < msg.time,
            MatchType::GreaterThan | MatchType::GreaterThanEqual => self.timestamp > msg.time,
            MatchType::ExactMatch | MatchType::PrefixMatch | MatchType::Contains | MatchType::Regex => {
                false
            }
        }
    }

    pub fn decode(m: &Map<String, Value>) -> Result<Self, DecodeError> {
        let match_type = match_type_field(m, KIND)?;
        let timestamp = string_field(m, KIND, "timestamp")?
            .map(|s| {
                parse_stamp(s).map_err(|source| DecodeError::InvalidTimestamp {
                    value: s.to_string(),
                    source,
                })
            })
            .transpose()?;

        match (match_type, timestamp) {
            (Some(match_type), Some(timestamp)) => Ok(Self::new(match_type, timestamp)),
            _ => Err(DecodeError::MissingFields { kind: KIND }),
        }
    }

    /// Writes the instant as a year-less stamp. This is lossless because
    /// [`Timestamp::new`] already dropped the year and sub-seconds.
    pub fn encode(&self, out: &mut Map<String, Value>) {
        out.insert("match_type".into(), self.match_type.canonical_name().into());
        out.insert(
            "timestamp".into(),
            self.timestamp.format(STAMP_FORMAT).to_string().into(),
        );
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timestamp({}, {})",
            self.match_type,
            self.timestamp.format(STAMP_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ordering_is_strict() {
        let t = parse_stamp("Apr 20 12:00:00").unwrap();
        let old = SyslogMsg::new().with_time(parse_stamp("Apr 20 00:00:00").unwrap());
        let same = SyslogMsg::new().with_time(t);

        assert!(!Timestamp::new(MatchType::Equals, t).matches(&old));
        assert!(Timestamp::new(MatchType::Equals, t).matches(&same));
        assert!(!Timestamp::new(MatchType::LessThan, t).matches(&old));
        assert!(Timestamp::new(MatchType::GreaterThan, t).matches(&old));
        assert!(!Timestamp::new(MatchType::LessThanEqual, t).matches(&same));
        assert!(!Timestamp::new(MatchType::GreaterThanEqual, t).matches(&same));
        assert!(!Timestamp::new(MatchType::Regex, t).matches(&same));
    }

    #[test]
    fn test_new_drops_year_and_subseconds() {
        let dated = Utc.with_ymd_and_hms(2026, 4, 20, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        let m = Timestamp::new(MatchType::LessThan, dated);
        assert_eq!(m.timestamp, parse_stamp("Apr 20 12:00:00").unwrap());

        let mut out = Map::new();
        m.encode(&mut out);
        let back = Timestamp::decode(&out).unwrap();
        assert_eq!(back, m);

        let record = SyslogMsg::new().with_time(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert!(m.matches(&record));
        assert_eq!(back.matches(&record), m.matches(&record));
    }

    #[test]
    fn test_leap_day_survives_normalisation() {
        let leap = Utc.with_ymd_and_hms(2024, 2, 29, 6, 30, 15).unwrap();
        let m = Timestamp::new(MatchType::Equals, leap);
        assert_eq!(m.to_string(), "timestamp(equals, Feb 29 06:30:15)");
    }

    #[test]
    fn test_parse_stamp() {
        let t = parse_stamp("Jan  2 15:04:05").unwrap();
        assert_eq!(t.format(STAMP_FORMAT).to_string(), "Jan  2 15:04:05");
        assert!(parse_stamp("Jan 32 15:04:05").is_err());
        assert!(parse_stamp("2026-01-02T15:04:05Z").is_err());
    }

    #[test]
    fn test_decode_keeps_parsed_instant() {
        let m = serde_json::json!({"match_type": "gt", "timestamp": "Oct 19 08:30:00"});
        let decoded = Timestamp::decode(m.as_object().unwrap()).unwrap();
        assert_eq!(decoded.match_type, MatchType::GreaterThan);
        assert_eq!(decoded.timestamp.format(STAMP_FORMAT).to_string(), "Oct 19 08:30:00");
        assert_eq!(decoded.to_string(), "timestamp(gt, Oct 19 08:30:00)");
    }

    #[test]
    fn test_decode_rejects_bad_stamp() {
        let m = serde_json::json!({"match_type": "gt", "timestamp": "yesterday"});
        assert!(matches!(
            Timestamp::decode(m.as_object().unwrap()),
            Err(DecodeError::InvalidTimestamp { .. })
        ));
    }
}

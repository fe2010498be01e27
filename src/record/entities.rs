use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Syslog facility (RFC 5424 codes 0..=23)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facility {
    Kern,
    #[default]
    User,
    Mail,
    Daemon,
    Auth,
    Syslog,
    Lpr,
    News,
    Uucp,
    Cron,
    AuthPriv,
    Ftp,
    Ntp,
    Security,
    Console,
    SolarisCron,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

const FACILITIES: [(Facility, &str); 24] = [
    (Facility::Kern, "kern"),
    (Facility::User, "user"),
    (Facility::Mail, "mail"),
    (Facility::Daemon, "daemon"),
    (Facility::Auth, "auth"),
    (Facility::Syslog, "syslog"),
    (Facility::Lpr, "lpr"),
    (Facility::News, "news"),
    (Facility::Uucp, "uucp"),
    (Facility::Cron, "cron"),
    (Facility::AuthPriv, "authpriv"),
    (Facility::Ftp, "ftp"),
    (Facility::Ntp, "ntp"),
    (Facility::Security, "security"),
    (Facility::Console, "console"),
    (Facility::SolarisCron, "solaris-cron"),
    (Facility::Local0, "local0"),
    (Facility::Local1, "local1"),
    (Facility::Local2, "local2"),
    (Facility::Local3, "local3"),
    (Facility::Local4, "local4"),
    (Facility::Local5, "local5"),
    (Facility::Local6, "local6"),
    (Facility::Local7, "local7"),
];

impl Facility {
    /// Numeric syslog code
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        FACILITIES[self.code() as usize].1
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        FACILITIES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(facility, _)| *facility)
            .ok_or_else(|| s.to_string())
    }
}

/// Syslog severity. Lower codes are more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Severity {
    Emerg,
    Alert,
    Crit,
    Err,
    Warning,
    #[default]
    Notice,
    Info,
    Debug,
}

const SEVERITIES: [(Severity, &str); 8] = [
    (Severity::Emerg, "emerg"),
    (Severity::Alert, "alert"),
    (Severity::Crit, "crit"),
    (Severity::Err, "err"),
    (Severity::Warning, "warning"),
    (Severity::Notice, "notice"),
    (Severity::Info, "info"),
    (Severity::Debug, "debug"),
];

impl Severity {
    /// Numeric syslog code (0 = emerg, 7 = debug)
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        SEVERITIES[self.code() as usize].1
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        SEVERITIES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(severity, _)| *severity)
            .ok_or_else(|| s.to_string())
    }
}

/// A structured syslog message as seen by the matchers
#[derive(Debug, Clone, PartialEq)]
pub struct SyslogMsg {
    pub facility: Facility,
    pub severity: Severity,
    /// Message timestamp
    pub time: DateTime<Utc>,
    pub host: String,
    /// Program part of the syslog tag
    pub program: String,
    /// Raw message content
    pub content: String,
    /// Whether `json_values` holds a parsed JSON payload
    pub is_json: bool,
    pub json_values: Map<String, Value>,
}

impl Default for SyslogMsg {
    fn default() -> Self {
        Self {
            facility: Facility::default(),
            severity: Severity::default(),
            time: DateTime::<Utc>::UNIX_EPOCH,
            host: String::new(),
            program: String::new(),
            content: String::new(),
            is_json: false,
            json_values: Map::new(),
        }
    }
}

impl SyslogMsg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_facility(mut self, facility: Facility) -> Self {
        self.facility = facility;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Attach a JSON payload. Non-object values leave the message without a payload.
    pub fn with_json(mut self, payload: Value) -> Self {
        match payload {
            Value::Object(map) => {
                self.is_json = true;
                self.json_values = map;
            }
            _ => {
                self.is_json = false;
                self.json_values = Map::new();
            }
        }
        self
    }

    /// The JSON payload, if the message carries one
    pub fn payload(&self) -> Option<&Map<String, Value>> {
        self.is_json.then_some(&self.json_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_facility_names_round_trip() {
        for (facility, name) in FACILITIES {
            assert_eq!(facility.to_string(), name);
            assert_eq!(name.parse::<Facility>().unwrap(), facility);
        }
        assert_eq!(Facility::Local7.code(), 23);
        assert!("kernel".parse::<Facility>().is_err());
    }

    #[test]
    fn test_severity_codes_are_inverted() {
        assert!(Severity::Emerg < Severity::Debug);
        assert_eq!(Severity::Warning.code(), 4);
        assert_eq!("err".parse::<Severity>().unwrap(), Severity::Err);
        assert!("error".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_names_round_trip() {
        for (severity, name) in SEVERITIES {
            assert_eq!(severity.to_string(), name);
            assert_eq!(Severity::from_str(name), Ok(severity));
        }
        assert_eq!(Severity::from_str("panic"), Err("panic".to_string()));
    }

    #[test]
    fn test_with_json_only_accepts_objects() {
        let msg = SyslogMsg::new().with_json(json!({"a": 1}));
        assert!(msg.payload().is_some());

        let msg = msg.with_json(json!([1, 2]));
        assert!(msg.payload().is_none());
        assert!(msg.json_values.is_empty());
    }
}

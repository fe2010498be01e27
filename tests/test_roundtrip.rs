use chrono::{TimeZone, Utc};
use serde_json::{Map, Value, json};
use syslog_matcher::matcher::{
    Facility as FacilityMatcher, Hostname, Kv, KvValue, MatchType, Matcher, NAryOp, NAryOpType,
    Severity as SeverityMatcher, Timestamp, UnaryOp, UnaryOpType, Value as ValueMatcher,
    ValueType, decode, encode, parse_stamp,
};
use syslog_matcher::record::{Facility, Severity, SyslogMsg};

fn sample_records() -> Vec<SyslogMsg> {
    let base = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
    vec![
        SyslogMsg::new()
            .with_facility(Facility::Kern)
            .with_severity(Severity::Info)
            .with_time(base)
            .with_host("cool.website.com:5757")
            .with_program("kernel")
            .with_content("eth0: link up"),
        SyslogMsg::new()
            .with_facility(Facility::Daemon)
            .with_severity(Severity::Err)
            .with_time(base)
            .with_host("db1.internal")
            .with_program("postgres")
            .with_content(r#"{"req":{"status":503,"retry":true,"path":"/api/v1"}}"#)
            .with_json(json!({"req": {"status": 503, "retry": true, "path": "/api/v1"}})),
        SyslogMsg::new()
            .with_facility(Facility::Local0)
            .with_severity(Severity::Debug)
            .with_host("foo")
            .with_program("topology")
            .with_json(json!({"req": {"status": 200, "retry": false, "path": "/health"}})),
    ]
}

fn sample_tree() -> Matcher {
    Matcher::any(vec![
        Matcher::all(vec![
            FacilityMatcher::new(Facility::Kern).into(),
            SeverityMatcher::new(MatchType::LessThan, Severity::Warning).into(),
        ]),
        Matcher::all(vec![
            Kv::new("req.status", MatchType::GreaterThanEqual, 500).into(),
            Kv::new("req.retry", MatchType::Equals, true).into(),
            Kv::new("req.path", MatchType::PrefixMatch, "/api").into(),
        ]),
        UnaryOp::new(
            UnaryOpType::Not,
            NAryOp::new(
                NAryOpType::Or,
                vec![
                    Hostname::new(MatchType::Contains, "website").into(),
                    ValueMatcher::new(ValueType::Program, MatchType::Regex, "^(kern|post)").into(),
                    ValueMatcher::new(ValueType::Content, MatchType::Equals, "never").into(),
                ],
            ),
        )
        .into(),
        Timestamp::new(MatchType::GreaterThan, parse_stamp("Jan  2 15:04:05").unwrap()).into(),
        NAryOp::new(NAryOpType::And, vec![]).into(),
    ])
}

fn round_trip(m: &Matcher) -> Matcher {
    let mut out = Map::new();
    encode(m, &mut out);
    // Go through text to make sure nothing depends on in-memory identity.
    let text = serde_json::to_string(&Value::Object(out)).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    decode(parsed.as_object().unwrap()).expect("encoded tree should decode")
}

#[test]
fn test_decode_of_encode_is_identical() {
    let tree = sample_tree();
    assert_eq!(round_trip(&tree), tree);
}

#[test]
fn test_decode_of_encode_evaluates_identically() {
    let tree = sample_tree();
    let back = round_trip(&tree);
    for record in sample_records() {
        assert_eq!(tree.matches(&record), back.matches(&record), "record: {record:?}");
    }
}

#[test]
fn test_every_leaf_round_trips_on_its_own() {
    let leaves: Vec<Matcher> = vec![
        FacilityMatcher::new(Facility::SolarisCron).into(),
        SeverityMatcher::new(MatchType::GreaterThanEqual, Severity::Crit).into(),
        Timestamp::new(MatchType::Equals, parse_stamp("Dec 31 23:59:59").unwrap()).into(),
        Timestamp::new(MatchType::LessThan, Utc.with_ymd_and_hms(2026, 4, 20, 12, 0, 0).unwrap()).into(),
        Hostname::new(MatchType::Regex, r"^web-\d+$").into(),
        ValueMatcher::new(ValueType::Host, MatchType::ExactMatch, "h").into(),
        Kv::new("a.b", MatchType::Contains, "x").into(),
        Kv::new("a.b", MatchType::LessThanEqual, KvValue::try_from(0.5).unwrap()).into(),
        Kv::new("a.b", MatchType::Equals, false).into(),
    ];
    for leaf in leaves {
        assert_eq!(round_trip(&leaf), leaf);
    }
}

#[test]
fn test_n_ary_children_keep_their_order() {
    let tree: Matcher = NAryOp::new(
        NAryOpType::And,
        vec![
            Hostname::new(MatchType::ExactMatch, "z").into(),
            Hostname::new(MatchType::ExactMatch, "a").into(),
            Hostname::new(MatchType::ExactMatch, "m").into(),
        ],
    )
    .into();

    let encoded = Value::Object(tree.encode());
    let hosts: Vec<&str> = encoded["n_ary_op"]["matchers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["hostname_matcher"]["hostname"].as_str().unwrap())
        .collect();
    assert_eq!(hosts, vec!["z", "a", "m"]);
    assert_eq!(round_trip(&tree), tree);
}

#[test]
fn test_double_negation_restores_truth() {
    let inner: Matcher = ValueMatcher::new(ValueType::Program, MatchType::Contains, "bre").into();
    let twice = inner.clone().negate().negate();
    for record in sample_records()
        .into_iter()
        .chain([SyslogMsg::new().with_program("breakfast")])
    {
        assert_eq!(inner.matches(&record), twice.matches(&record));
        assert_ne!(inner.matches(&record), inner.clone().negate().matches(&record));
    }
}

#[test]
fn test_empty_combinators() {
    let and: Matcher = NAryOp::new(NAryOpType::And, vec![]).into();
    let or: Matcher = NAryOp::new(NAryOpType::Or, vec![]).into();
    for record in sample_records() {
        assert!(and.matches(&record));
        assert!(!or.matches(&record));
    }
    assert_eq!(round_trip(&and), and);
    assert_eq!(
        Value::Object(or.encode()),
        json!({"n_ary_op": {"type": "or", "matchers": []}})
    );
}

#[test]
fn test_display_of_tree() {
    let tree = Matcher::all(vec![
        Kv::new("foo", MatchType::Equals, "bar").into(),
        FacilityMatcher::new(Facility::Kern).into(),
    ])
    .negate();
    assert_eq!(tree.to_string(), r#"not (kv("foo", equals, "bar") and facility(kern))"#);
}

#[test]
fn test_real_dated_timestamp_evaluates_the_same_after_round_trip() {
    let tree: Matcher =
        Timestamp::new(MatchType::LessThan, Utc.with_ymd_and_hms(2026, 4, 20, 12, 0, 0).unwrap())
            .into();
    let back = round_trip(&tree);
    let january = SyslogMsg::new().with_time(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(tree.matches(&january), back.matches(&january));
    for record in sample_records() {
        assert_eq!(tree.matches(&record), back.matches(&record));
    }
}

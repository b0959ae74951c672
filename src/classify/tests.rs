//! Classification tests

use super::*;
use crate::schema::SchemaNode;
use crate::types::Instance;
use chrono::{TimeZone, Utc};
use test_case::test_case;

#[test_case(Instance::Integer(11), SemanticType::Integer ; "positive int")]
#[test_case(Instance::Integer(-5), SemanticType::Integer ; "negative int")]
#[test_case(Instance::Integer(0), SemanticType::Integer ; "zero")]
#[test_case(Instance::Number(12.0), SemanticType::Integer ; "integral float")]
#[test_case(Instance::Number(11.5), SemanticType::Number ; "positive float")]
#[test_case(Instance::Number(-1.3), SemanticType::Number ; "negative float")]
#[test_case(Instance::Number(f64::NAN), SemanticType::Number ; "nan is a number")]
#[test_case(Instance::Number(f64::INFINITY), SemanticType::Number ; "infinity is a number")]
#[test_case(Instance::from("test"), SemanticType::String ; "string")]
#[test_case(Instance::from(""), SemanticType::String ; "empty string")]
#[test_case(Instance::Array(vec![]), SemanticType::Array ; "empty array")]
#[test_case(Instance::Object(Default::default()), SemanticType::Object ; "empty object")]
#[test_case(Instance::Schema(SchemaNode::default()), SemanticType::Object ; "schema splice")]
#[test_case(Instance::Bool(false), SemanticType::Boolean ; "boolean")]
#[test_case(Instance::Null, SemanticType::Null ; "null")]
fn test_classify(value: Instance, expected: SemanticType) {
    assert_eq!(classify(&value), Some(expected));
}

#[test]
fn test_classify_date() {
    let date = Utc.with_ymd_and_hms(2012, 7, 8, 16, 41, 41).unwrap();
    assert_eq!(classify(&Instance::Date(date)), Some(SemanticType::Date));
}

#[test]
fn test_classify_undefined() {
    assert_eq!(classify(&Instance::Undefined), None);
}

#[test]
fn test_integer_never_also_number() {
    let value = Instance::Integer(3);
    let matching: Vec<_> = SemanticType::ORDER
        .into_iter()
        .filter(|t| t.matches(&value))
        .collect();
    // Number matches too, but integer wins by priority
    assert_eq!(matching.first(), Some(&SemanticType::Integer));
    assert_eq!(classify(&value), Some(SemanticType::Integer));
}

#[test]
fn test_widen() {
    use SemanticType::*;
    assert_eq!(Integer.widen(Number), Some(Number));
    assert_eq!(Number.widen(Integer), Some(Number));
    assert_eq!(Integer.widen(Integer), Some(Integer));
    assert_eq!(String.widen(String), Some(String));
    assert_eq!(String.widen(Integer), None);
    assert_eq!(Object.widen(Array), None);
}

#[test]
fn test_common_type() {
    let ints = [Instance::from(11), Instance::from(12), Instance::from(4)];
    assert_eq!(common_type(&ints), Some(SemanticType::Integer));

    let float_first = [Instance::from(11.3), Instance::from(12.4), Instance::from(4)];
    assert_eq!(common_type(&float_first), Some(SemanticType::Number));

    let int_first = [Instance::from(11), Instance::from(12.4), Instance::from(4)];
    assert_eq!(common_type(&int_first), Some(SemanticType::Number));

    let mixed = [Instance::from("hello"), Instance::from("hi"), Instance::from(11)];
    assert_eq!(common_type(&mixed), None);

    let with_undefined = [Instance::from(1), Instance::Undefined];
    assert_eq!(common_type(&with_undefined), None);

    let empty: &[Instance] = &[];
    assert_eq!(common_type(empty), None);
}

#[test]
fn test_type_serializes_lowercase() {
    let json = serde_json::to_string(&SemanticType::Boolean).unwrap();
    assert_eq!(json, "\"boolean\"");
    assert_eq!(SemanticType::Date.to_string(), "date");
}

// ============================================================================
// Formats
// ============================================================================

#[test_case("date-time", "2012-07-08T16:41:41.532Z")]
#[test_case("date-time", "2012-07-08T16:41:41Z")]
#[test_case("date-time", "2012-07-08T16:41:41.532+00:00")]
#[test_case("date-time", "2012-07-08T16:41:41.532+05:30")]
#[test_case("date-time", "2012-07-08T16:41:41.532z" ; "date time lowercase zulu")]
#[test_case("date-time", "2012-07-08 16:41:41.532Z" ; "date time space separator")]
#[test_case("date-time", "2012-07-08t16:41:41.532Z" ; "date time lowercase separator")]
#[test_case("date", "2012-07-08")]
#[test_case("time", "16:41:41")]
#[test_case("utc-millisec", "-1234567890")]
#[test_case("utc-millisec", "12.0" ; "utc millisec integral decimal")]
#[test_case("regex", "/a/")]
#[test_case("color", "red")]
#[test_case("color", "#f00")]
#[test_case("color", "#ff0000")]
#[test_case("color", "rgb(255,0,0)")]
#[test_case("style", "color: red;")]
#[test_case("phone", "+31 42 123 4567")]
#[test_case("uri", "http://www.google.com/")]
#[test_case("uri", "http://www.google.com/search")]
#[test_case("email", "obama@whitehouse.gov")]
#[test_case("email", "barack+obama@whitehouse.gov")]
#[test_case("ip-address", "192.168.0.1")]
#[test_case("ipv4", "127.0.0.1")]
#[test_case("ipv6", "fe80::1%lo0")]
#[test_case("ipv6", "::1")]
#[test_case("host-name", "localhost")]
#[test_case("hostname", "www.google.com")]
#[test_case("alpha", "abracadabra")]
#[test_case("alphanumeric", "abracadabra123")]
fn test_standard_format_accepts(name: &str, value: &str) {
    assert!(
        matches_format(&StandardFormats, value, name),
        "{value} should match {name}"
    );
}

#[test_case("date-time", "2012-07-08")]
#[test_case("date-time", "TEST2012-07-08T16:41:41.532Z")]
#[test_case("date-time", "2012-07-08T16:41:41.532+00:00Z")]
#[test_case("date-time", "2012-07-08T16:41:41.532+Z00:00")]
#[test_case("date", "TEST2012-07-08")]
#[test_case("time", "16:41:41.532Z")]
#[test_case("utc-millisec", "16:41:41.532Z")]
#[test_case("utc-millisec", "12abc" ; "utc millisec trailing text")]
#[test_case("utc-millisec", "+31 42 123 4567" ; "utc millisec phone number")]
#[test_case("utc-millisec", "12.5" ; "utc millisec fractional")]
#[test_case("regex", "/^(abc]/")]
#[test_case("color", "json")]
#[test_case("style", "0")]
#[test_case("phone", "31 42 123 4567")]
#[test_case("uri", "tdegrunt")]
#[test_case("uri", "The dog jumped")]
#[test_case("email", "obama@")]
#[test_case("ip-address", "192.168.0")]
#[test_case("ip-address", "256.168.0")]
#[test_case("ipv6", "127.0.0.1")]
#[test_case("ipv6", "localhost")]
#[test_case("host-name", "www.-hi-.com")]
#[test_case("alphanumeric", "1test!")]
#[test_case("no-such-format", "anything")]
fn test_standard_format_rejects(name: &str, value: &str) {
    assert!(
        !matches_format(&StandardFormats, value, name),
        "{value} should not match {name}"
    );
}

#[test]
fn test_forward_only_formats_are_catalogued() {
    let formats = StandardFormats.formats();
    for name in FORWARD_ONLY_FORMATS {
        assert!(formats.contains(&name), "{name} missing from catalogue");
        assert!(is_forward_only(name));
    }
    assert!(!is_forward_only("email"));
}

#[test]
fn test_catalogue_order() {
    let formats = StandardFormats.formats();
    let position = |name: &str| formats.iter().position(|f| *f == name).unwrap();
    assert!(position("date-time") < position("date"));
    assert!(position("ip-address") < position("ipv4"));
    assert!(position("utc-millisec") < position("phone"));
}

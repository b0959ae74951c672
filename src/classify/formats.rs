//! String format catalogue
//!
//! A [`FormatMatcher`] names an ordered list of string formats and decides
//! whether a string matches one of them. [`StandardFormats`] is the built-in
//! catalogue; callers with their own notion of formats implement the trait.

use regex::Regex;
use std::net::Ipv6Addr;
use std::sync::LazyLock;

/// Formats that are only assigned when the value literally equals the name.
///
/// Their matchers accept too much ordinary text to be used for detection.
pub const FORWARD_ONLY_FORMATS: [&str; 7] = [
    "hostname",
    "host-name",
    "alpha",
    "alphanumeric",
    "regex",
    "regexp",
    "pattern",
];

/// Check if a format may only be assigned by literal name
pub fn is_forward_only(name: &str) -> bool {
    FORWARD_ONLY_FORMATS.contains(&name)
}

/// Ordered catalogue of string formats
pub trait FormatMatcher: Send + Sync + std::fmt::Debug {
    /// Known format names, in detection priority order
    fn formats(&self) -> &[&'static str];

    /// Check whether `value` matches the format called `name`
    fn is_format(&self, value: &str, name: &str) -> bool;
}

// ============================================================================
// Standard catalogue
// ============================================================================

const STANDARD_FORMATS: [&str; 19] = [
    "date-time",
    "date",
    "time",
    "email",
    "ip-address",
    "ipv6",
    "uri",
    "color",
    "hostname",
    "host-name",
    "alpha",
    "alphanumeric",
    "utc-millisec",
    "regex",
    "style",
    "phone",
    "regexp",
    "pattern",
    "ipv4",
];

static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\d{4}-(?:0[0-9]|1[0-2])-(?:3[01]|0[1-9]|[12][0-9])[tT ](?:2[0-4]|[01][0-9]):[0-5][0-9]:(?:60|[0-5][0-9])(?:\.\d+)?(?:[zZ]|[+-][0-5][0-9]:(?:60|[0-5][0-9]))$",
    )
    .unwrap()
});

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(?:0[0-9]|1[0-2])-(?:3[01]|0[1-9]|[12][0-9])$").unwrap()
});

static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:2[0-4]|[01][0-9]):[0-5][0-9]:(?:60|[0-5][0-9])$").unwrap()
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[\w!#$%&'*+\-/=?^`{|}~]+\.)*[\w!#$%&'*+\-/=?^`{|}~]+@(?:(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?|\[(?:(?:[01]?\d{1,2}|2[0-4]\d|25[0-5])\.){3}(?:[01]?\d{1,2}|2[0-4]\d|25[0-5])\])$",
    )
    .unwrap()
});

static IP_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .unwrap()
});

static URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+\-.]*:\S*$").unwrap());

static COLOR: LazyLock<Regex> = LazyLock::new(|| {
    const BYTE: &str = r"(?:[0-9]|[1-9][0-9]|1[0-9][0-9]|2[0-4][0-9]|25[0-5])";
    const PERCENT: &str = r"(?:\d?\d%|100%)+";
    let names = "aqua|black|blue|fuchsia|gray|green|lime|maroon|navy|olive|orange|purple|red|silver|teal|white|yellow";
    let pattern = format!(
        r"^(?:#?(?:[0-9A-Fa-f]{{3}}){{1,2}}\b|{names}|rgb\(\s*\b{BYTE}\b\s*,\s*\b{BYTE}\b\s*,\s*\b{BYTE}\b\s*\)|rgb\(\s*{PERCENT}\s*,\s*{PERCENT}\s*,\s*{PERCENT}\s*\))$"
    );
    Regex::new(&pattern).unwrap()
});

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9A-Za-z](?:[0-9A-Za-z-]{0,61}[0-9A-Za-z])?(?:\.[0-9A-Za-z](?:[0-9A-Za-z-]{0,61}[0-9A-Za-z])?)*\.?$",
    )
    .unwrap()
});

static ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static STYLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*(.+?):\s*([^;]+);?").unwrap());

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+(?:[0-9] ?){6,14}[0-9]$").unwrap());

/// Built-in format catalogue
///
/// Covers the draft-03 style formats (`date-time`, `utc-millisec`, `color`,
/// `style`, `phone`, ...) together with their common aliases (`hostname`,
/// `regexp`, `pattern`, `ipv4`).
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormats;

impl FormatMatcher for StandardFormats {
    fn formats(&self) -> &[&'static str] {
        &STANDARD_FORMATS
    }

    fn is_format(&self, value: &str, name: &str) -> bool {
        match name {
            "date-time" => DATE_TIME.is_match(value),
            "date" => DATE.is_match(value),
            "time" => TIME.is_match(value),
            "email" => EMAIL.is_match(value),
            "ip-address" | "ipv4" => IP_ADDRESS.is_match(value),
            "ipv6" => is_ipv6(value),
            "uri" => URI.is_match(value),
            "color" => COLOR.is_match(value),
            "hostname" | "host-name" => is_hostname(value),
            "alpha" => ALPHA.is_match(value),
            "alphanumeric" => ALPHANUMERIC.is_match(value),
            "utc-millisec" => is_utc_millisec(value),
            "regex" | "regexp" | "pattern" => Regex::new(value).is_ok(),
            "style" => STYLE.is_match(value),
            "phone" => PHONE.is_match(value),
            _ => false,
        }
    }
}

fn is_hostname(value: &str) -> bool {
    (1..=255).contains(&value.len()) && HOSTNAME.is_match(value)
}

/// IPv6 address, optionally with a `%zone` suffix
fn is_ipv6(value: &str) -> bool {
    let trimmed = value.trim();
    let address = match trimmed.split_once('%') {
        Some((address, zone)) if !zone.is_empty() => address,
        Some(_) => return false,
        None => trimmed,
    };
    address.parse::<Ipv6Addr>().is_ok()
}

/// A whole number of milliseconds: the whole string is numeric and its
/// value equals its leading integer part (`"-1234567890"`, `"12.0"`).
///
/// Trailing text is rejected (`"12abc"`, `"+31 42 123 4567"`), so phone
/// numbers and times with a numeric prefix fall through to later formats.
fn is_utc_millisec(value: &str) -> bool {
    let trimmed = value.trim();
    let Ok(number) = trimmed.parse::<f64>() else {
        return false;
    };
    leading_integer(trimmed).is_some_and(|int| int == number)
}

fn leading_integer(s: &str) -> Option<f64> {
    let unsigned = s.trim_start_matches(['+', '-']);
    let sign_len = s.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

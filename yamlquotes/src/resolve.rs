//! Scalar type resolution.
//!
//! The event parser only reports a scalar's text, style and explicit tag.
//! This module turns those into a [`ResolvedTag`] following the YAML 1.2
//! core schema: explicit tags win, quoted and block scalars are strings,
//! and plain scalars are matched against the null/bool/int/float/timestamp
//! forms before falling back to string.

use std::sync::LazyLock;

use regex::Regex;

use crate::tree::{ResolvedTag, ScalarStyle};

/// Expanded handle of the `!!` shorthand.
const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";

static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        r"^[-+]?",                         // optional sign
        r"(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?)", // `.5`, `1`, `1.` or `1.5`
        r"(?:[eE][-+]?[0-9]+)?$",          // optional exponent
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid float regex: {err}"),
    }
});

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        r"^(?<year>[0-9]{4})-(?<month>[0-9]{1,2})-(?<day>[0-9]{1,2})", // date
        r"(?:(?<sep>[Tt]| +)",                                          // separator
        r"(?<hour>[0-9]{1,2}):(?<minute>[0-9]{1,2}):(?<second>[0-9]{1,2})",
        r"(?:\.[0-9]+)?",                                              // fraction
        r"(?<zone>Z|[-+](?<zh>[0-9]{2}):(?<zm>[0-9]{2}))?",             // zone
        r")?$",
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid timestamp regex: {err}"),
    }
});

/// Resolve the type of a scalar from its text, style and explicit tag.
///
/// `tag` is the `(handle, suffix)` pair reported by the parser, if any.
#[must_use]
pub fn resolve_scalar(value: &str, style: ScalarStyle, tag: Option<(&str, &str)>) -> ResolvedTag {
    if let Some((handle, suffix)) = tag {
        return resolve_explicit(handle, suffix);
    }
    if style == ScalarStyle::Plain {
        resolve_plain(value)
    } else {
        ResolvedTag::String
    }
}

fn resolve_explicit(handle: &str, suffix: &str) -> ResolvedTag {
    match (handle, suffix) {
        // Non-specific `!` tag: the scalar is a string.
        ("" | "!", "!" | "") => ResolvedTag::String,
        ("!!" | CORE_TAG_PREFIX, name) => match name {
            "str" => ResolvedTag::String,
            "int" => ResolvedTag::Integer,
            "bool" => ResolvedTag::Boolean,
            "null" => ResolvedTag::Null,
            "float" => ResolvedTag::Float,
            "timestamp" => ResolvedTag::Timestamp,
            "binary" => ResolvedTag::Binary,
            "merge" => ResolvedTag::Merge,
            other => ResolvedTag::Other(format!("{CORE_TAG_PREFIX}{other}")),
        },
        _ => ResolvedTag::Other(format!("{handle}{suffix}")),
    }
}

/// Resolve an untagged plain scalar.
#[must_use]
pub fn resolve_plain(value: &str) -> ResolvedTag {
    match value {
        "" | "~" | "null" | "Null" | "NULL" => return ResolvedTag::Null,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => return ResolvedTag::Boolean,
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" | "-.inf" | "-.Inf" | "-.INF"
        | ".nan" | ".NaN" | ".NAN" => return ResolvedTag::Float,
        "<<" => return ResolvedTag::Merge,
        _ => {}
    }

    // Only numbers and timestamps remain, and all of them start with one of these.
    if !value.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.')) {
        return ResolvedTag::String;
    }

    if is_timestamp(value) {
        return ResolvedTag::Timestamp;
    }

    let without_separators = value.replace('_', "");
    if is_integer(&without_separators) {
        ResolvedTag::Integer
    } else if FLOAT_RE.is_match(&without_separators) {
        ResolvedTag::Float
    } else {
        ResolvedTag::String
    }
}

/// One of the accepted timestamp forms, with every field in range:
/// - `YYYY-M-D`
/// - `YYYY-M-D h:m:s[.frac]` (no zone)
/// - `YYYY-M-DTh:m:s[.frac]Z` or `...±hh:mm` (zone required, `T` or `t`)
fn is_timestamp(value: &str) -> bool {
    let Some(caps) = TIMESTAMP_RE.captures(value) else {
        return false;
    };
    let field = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());

    let (Some(year), Some(month), Some(day)) = (field("year"), field("month"), field("day"))
    else {
        return false;
    };
    if !(1..=12).contains(&month) || !(1..=days_in_month(year, month)).contains(&day) {
        return false;
    }

    let Some(sep) = caps.name("sep") else {
        return true;
    };
    // `T` requires a zone, a space forbids one.
    let zone_ok = match (sep.as_str(), caps.name("zone")) {
        ("T" | "t", Some(_)) => {
            field("zh").is_none_or(|h| h <= 24) && field("zm").is_none_or(|m| m <= 60)
        }
        ("T" | "t", None) => false,
        (_, zone) => zone.is_none(),
    };
    zone_ok
        && field("hour").is_some_and(|h| h < 24)
        && field("minute").is_some_and(|m| m < 60)
        && field("second").is_some_and(|s| s < 60)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Decimal, `0x`, `0o`, `0b` and leading-zero octal integers that fit in 64 bits.
fn is_integer(value: &str) -> bool {
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let (digits, radix) = if let Some(rest) = unsigned.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = unsigned.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = unsigned.strip_prefix("0b") {
        (rest, 2)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (&unsigned[1..], 8)
    } else {
        (unsigned, 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return false;
    }

    match u64::from_str_radix(digits, radix) {
        Ok(magnitude) if negative => magnitude <= i64::MIN.unsigned_abs(),
        Ok(_) => true,
        Err(_) => false,
    }
}

//! Reusable parameter extractors for catalog tables.
//!
//! Every extractor reads the capture group named after the parameter. Numeric extractors
//! fall back to zero when the group did not participate in the match. A group that matched
//! text which does not fit the type leaves the parameter out, so dispatch rejects it.

use regex::Captures;
use serde_json::Value;

fn capture<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name)
        .map(|m| m.as_str().trim())
        .filter(|raw| !raw.is_empty())
}

pub fn trimmed(caps: &Captures<'_>, name: &str) -> Option<Value> {
    capture(caps, name).map(|raw| Value::String(raw.to_string()))
}

pub fn uppercase(caps: &Captures<'_>, name: &str) -> Option<Value> {
    capture(caps, name).map(|raw| Value::String(raw.to_uppercase()))
}

pub fn lowercase(caps: &Captures<'_>, name: &str) -> Option<Value> {
    capture(caps, name).map(|raw| Value::String(raw.to_lowercase()))
}

pub fn integer(caps: &Captures<'_>, name: &str) -> Option<Value> {
    match capture(caps, name) {
        Some(raw) => raw.parse::<i64>().ok().map(Value::from),
        None => Some(Value::from(0)),
    }
}

/// Like [`integer`], but leaves the parameter out when the group is absent.
pub fn optional_integer(caps: &Captures<'_>, name: &str) -> Option<Value> {
    capture(caps, name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .map(Value::from)
}

pub fn decimal(caps: &Captures<'_>, name: &str) -> Option<Value> {
    match capture(caps, name) {
        Some(raw) => raw
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Value::from),
        None => Some(Value::from(0.0)),
    }
}

pub fn integer_list(caps: &Captures<'_>, name: &str) -> Option<Value> {
    let raw = capture(caps, name)?;
    let values = split_list(raw)
        .map(|token| token.parse::<i64>().ok().map(Value::from))
        .collect::<Option<Vec<_>>>()?;
    Some(Value::Array(values))
}

pub fn string_list(caps: &Captures<'_>, name: &str) -> Option<Value> {
    let raw = capture(caps, name)?;
    let values = split_list(raw)
        .map(|token| Value::String(token.to_string()))
        .collect::<Vec<_>>();
    Some(Value::Array(values))
}

/// Lowercased list, for enumerated values such as permission names.
pub fn lowercase_list(caps: &Captures<'_>, name: &str) -> Option<Value> {
    let raw = capture(caps, name)?;
    let values = split_list(raw)
        .map(|token| Value::String(token.to_lowercase()))
        .collect::<Vec<_>>();
    Some(Value::Array(values))
}

/// `true` when the group participated in the match, absent otherwise.
pub fn flag(caps: &Captures<'_>, name: &str) -> Option<Value> {
    caps.name(name).map(|_| Value::Bool(true))
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|token| {
            !token.is_empty()
                && !token.eq_ignore_ascii_case("and")
                && !token.eq_ignore_ascii_case("y")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;

    fn caps<'t>(pattern: &str, text: &'t str) -> Captures<'t> {
        Regex::new(pattern).unwrap().captures(text).unwrap()
    }

    #[test]
    fn integer_defaults_to_zero_when_group_is_absent() {
        let m = caps(r"tap(\s+(?P<x>\d+))?", "tap");
        assert_eq!(integer(&m, "x"), Some(json!(0)));
        assert_eq!(optional_integer(&m, "x"), None);
    }

    #[test]
    fn numbers_that_do_not_fit_are_left_out() {
        let m = caps(r"tap (?P<x>\d+)", "tap 99999999999999999999");
        assert_eq!(integer(&m, "x"), None);
        assert_eq!(optional_integer(&m, "x"), None);

        let m = caps(r"at (?P<lat>\S+)", "at 1e999");
        assert_eq!(decimal(&m, "lat"), None);

        let m = caps(r"keys (?P<k>.+)", "keys 4 99999999999999999999");
        assert_eq!(integer_list(&m, "k"), None);
    }

    #[test]
    fn lists_split_on_commas_whitespace_and_conjunctions() {
        let m = caps(r"keys (?P<k>.+)", "keys 4 5,6");
        assert_eq!(integer_list(&m, "k"), Some(json!([4, 5, 6])));

        let m = caps(r"grant (?P<p>.+)", "grant Photos, camera and contacts");
        assert_eq!(
            lowercase_list(&m, "p"),
            Some(json!(["photos", "camera", "contacts"]))
        );
    }

    #[test]
    fn decimal_accepts_negative_values() {
        let m = caps(r"(?P<lat>-?\d+(\.\d+)?)", "-33.86");
        assert_eq!(decimal(&m, "lat"), Some(json!(-33.86)));
    }

    #[test]
    fn flag_reflects_group_participation() {
        let m = caps(r"delete(?P<all>\s+all)?\s+logs", "delete all logs");
        assert_eq!(flag(&m, "all"), Some(json!(true)));
        let m = caps(r"delete(?P<all>\s+all)?\s+logs", "delete logs");
        assert_eq!(flag(&m, "all"), None);
    }
}

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::ir::Format;

static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

const ATOM: &str = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+";
const QUOTED: &str = r#""(?:[^"\\\r\n]|\\.)*""#;
const LABEL: &str = r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?";
const DOMAIN_LITERAL: &str = r"\[[^\[\]\\\s]+\]";
const WORD: &str = r"[\p{L}\p{N}!#$%&'*+/=?^_`{|}~.-]+";

// RFC 5322 mailbox: `addr-spec` or `[display-name] <addr-spec>`, where the
// local part is a dot-atom or quoted string and the domain a hostname or
// `[literal]`
static MAILBOX: Lazy<Regex> = Lazy::new(|| {
    let local = format!(r"(?:{ATOM}(?:\.{ATOM})*|{QUOTED})");
    let domain = format!(r"(?:{LABEL}(?:\.{LABEL})*|{DOMAIN_LITERAL})");
    let phrase = format!(r"(?:{WORD}|{QUOTED})(?:\s+(?:{WORD}|{QUOTED}))*");
    Regex::new(&format!(
        r"^(?:(?P<bare>{local}@{domain})|(?:{phrase}\s*)?<(?P<angled>{local}@{domain})>)$"
    ))
    .unwrap()
});

pub fn check_format(format: Format, v: &Value) -> bool {
    let Some(s) = v.as_str() else {
        return false;
    };
    match format {
        Format::Date => is_date(s),
        Format::DateTime => is_date_time(s),
        Format::Email => is_email(s),
        Format::Url => is_url(s),
        Format::Uuid => is_uuid(s),
        Format::RegexSyntax => is_regex(s),
    }
}

/// `YYYY-MM-DD`, zero padded, and a real calendar day.
pub fn is_date(s: &str) -> bool {
    DATE_SHAPE.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// RFC 3339 timestamp; the offset (`Z` or `±hh:mm`) is required, and the
/// separator is an uppercase `T` (chrono also takes a space or `t`).
pub fn is_date_time(s: &str) -> bool {
    s.as_bytes().get(10) == Some(&b'T')
        && !s.ends_with('z')
        && DateTime::parse_from_rfc3339(s).is_ok()
}

/// Mailbox as in an address header; the address itself is at most 254 bytes.
pub fn is_email(s: &str) -> bool {
    let Some(caps) = MAILBOX.captures(s) else {
        return false;
    };
    caps.name("bare")
        .or_else(|| caps.name("angled"))
        .is_some_and(|addr| addr.len() <= 254)
}

/// Absolute URI: must carry a scheme.
pub fn is_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

pub fn is_uuid(s: &str) -> bool {
    UUID.is_match(s)
}

pub fn is_regex(s: &str) -> bool {
    Regex::new(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dates() {
        assert!(is_date("2023-02-28"));
        assert!(is_date("2024-02-29"));
        assert!(!is_date("2023-02-30"));
        assert!(!is_date("2023-2-28"));
        assert!(!is_date("2023-02-28T00:00:00Z"));
        assert!(!is_date(""));
    }

    #[test]
    fn date_times() {
        assert!(is_date_time("2023-10-27T10:00:00Z"));
        assert!(is_date_time("2023-10-27T10:00:00.250+02:00"));
        assert!(!is_date_time("2023-10-27"));
        assert!(!is_date_time("2023-10-27T10:00:00"));
        assert!(!is_date_time("2023-13-27T10:00:00Z"));
        assert!(!is_date_time("2023-10-27 10:00:00Z"));
        assert!(!is_date_time("2023-10-27t10:00:00Z"));
        assert!(!is_date_time("2023-10-27T10:00:00z"));
    }

    #[test]
    fn emails() {
        assert!(is_email("alice@example.com"));
        assert!(is_email("first.last+tag@sub.example.org"));
        assert!(!is_email("alice"));
        assert!(!is_email("alice@"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("a..b@example.com"));
        assert!(!is_email("alice@-example.com"));
    }

    #[test]
    fn mailbox_forms() {
        assert!(is_email("Alice <alice@example.com>"));
        assert!(is_email("\"Doe, John\" <john@example.com>"));
        assert!(is_email("<alice@example.com>"));
        assert!(is_email("Zoë Ünal <zoe@example.com>"));
        assert!(is_email("\"john doe\"@example.com"));
        assert!(is_email("alice@[127.0.0.1]"));
        assert!(!is_email("Alice alice@example.com"));
        assert!(!is_email("Alice <alice@example.com"));
        assert!(!is_email("alice@[]"));
        assert!(!is_email("\"unterminated@example.com"));
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(!is_email(&long));
    }

    #[test]
    fn urls() {
        assert!(is_url("https://example.com/a?b=c"));
        assert!(is_url("mailto:alice@example.com"));
        assert!(!is_url("not-a-url"));
        assert!(!is_url("/relative/path"));
        assert!(!is_url(""));
    }

    #[test]
    fn uuids() {
        assert!(is_uuid("123e4567-e89b-12d3-a456-426614174000"));
        assert!(is_uuid("123E4567-E89B-12D3-A456-426614174000"));
        assert!(!is_uuid("123e4567e89b12d3a456426614174000"));
        assert!(!is_uuid("123e4567-e89b-12d3-a456-42661417400"));
        assert!(!is_uuid("123e4567-e89b-12d3-a456-4266141740000"));
        assert!(!is_uuid("{123e4567-e89b-12d3-a456-426614174000}"));
        assert!(!is_uuid("g23e4567-e89b-12d3-a456-426614174000"));
    }

    #[test]
    fn regex_syntax() {
        assert!(is_regex("^[a-z]+$"));
        assert!(is_regex(""));
        assert!(!is_regex("("));
        assert!(!is_regex("[a-"));
    }

    #[test]
    fn non_strings_fail_every_format() {
        let formats = [
            Format::Date, Format::DateTime, Format::Email,
            Format::Url, Format::Uuid, Format::RegexSyntax,
        ];
        for v in [json!(null), json!(1), json!(true), json!([]), json!({})] {
            for f in formats {
                assert!(!check_format(f, &v), "{f:?} accepted {v}");
            }
        }
        assert!(check_format(Format::Date, &json!("2023-02-28")));
    }
}

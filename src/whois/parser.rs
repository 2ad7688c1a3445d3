//! Raw WHOIS text parsing
//!
//! WHOIS responses are loosely `Key: value` lines. Known keys are mapped onto
//! the field names in [`fields`]; repeated keys accumulate into lists.

use super::{fields, WhoisRecord};
use once_cell::sync::Lazy;
use regex::Regex;

/// How repeated occurrences of a key are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    /// Keep the first occurrence
    First,
    /// Collect every occurrence
    Append,
}

/// Lowercased WHOIS key → record field
const KEY_MAP: &[(&str, &str, Repeat)] = &[
    ("registry domain id", fields::REGISTRY_DOMAIN_ID, Repeat::First),
    ("domain status", fields::DOMAIN_STATUS, Repeat::Append),
    ("status", fields::DOMAIN_STATUS, Repeat::Append),
    ("creation date", fields::CREATION_DATE, Repeat::Append),
    ("created", fields::CREATION_DATE, Repeat::Append),
    ("created on", fields::CREATION_DATE, Repeat::Append),
    ("registration date", fields::CREATION_DATE, Repeat::Append),
    ("updated date", fields::UPDATED_DATE, Repeat::Append),
    ("last updated on", fields::UPDATED_DATE, Repeat::Append),
    ("last modified", fields::UPDATED_DATE, Repeat::Append),
    ("changed", fields::UPDATED_DATE, Repeat::Append),
    ("registry expiry date", fields::EXPIRATION_DATE, Repeat::Append),
    ("registrar registration expiration date", fields::EXPIRATION_DATE, Repeat::Append),
    ("expiration date", fields::EXPIRATION_DATE, Repeat::Append),
    ("expiry date", fields::EXPIRATION_DATE, Repeat::Append),
    ("expires on", fields::EXPIRATION_DATE, Repeat::Append),
    ("expires", fields::EXPIRATION_DATE, Repeat::Append),
    ("paid-till", fields::EXPIRATION_DATE, Repeat::Append),
    ("name server", fields::NAME_SERVERS, Repeat::Append),
    ("nameserver", fields::NAME_SERVERS, Repeat::Append),
    ("nserver", fields::NAME_SERVERS, Repeat::Append),
    ("registrar", fields::REGISTRAR, Repeat::First),
    ("registrar name", fields::REGISTRAR, Repeat::First),
    ("sponsoring registrar", fields::REGISTRAR, Repeat::First),
    ("registrar iana id", fields::REGISTRAR_IANA_ID, Repeat::First),
    ("registrar abuse contact phone", fields::REGISTRAR_ABUSE_CONTACT_PHONE, Repeat::First),
    ("dnssec", fields::DNSSEC, Repeat::First),
    ("registrar whois server", fields::REGISTRAR_WHOIS_SERVER, Repeat::First),
    ("whois server", fields::WHOIS_SERVER, Repeat::First),
];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}")
        .expect("email pattern is valid")
});

static REGISTRY_DOMAIN_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*Registry Domain ID:[ \t]*(\S[^\r\n]*?)\s*$")
        .expect("registry domain id pattern is valid")
});

/// Phrases registries use for unregistered names
const NOT_FOUND_PATTERNS: &[&str] = &[
    "no match",
    "not found",
    "no entries found",
    "no data found",
    "domain not found",
    "not registered",
    "available for registration",
];

/// Lines that indicate an actual registration
const REGISTRATION_MARKERS: &[&str] = &[
    "registry domain id:",
    "registrar:",
    "registrar name:",
    "domain:",
    "domain name:",
    "creation date:",
    "created:",
    "name server:",
    "nserver:",
    "domain status:",
];

/// Parse a raw WHOIS response into a record. The raw text is kept.
pub fn parse_whois_text(raw: &str) -> WhoisRecord {
    let mut record = WhoisRecord::from_raw(raw);

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') || line.starts_with('#') || line.starts_with(">>>")
        {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        if let Some((_, field, repeat)) = KEY_MAP.iter().find(|(k, _, _)| *k == key) {
            match repeat {
                Repeat::First if record.get(field).is_some() => {}
                Repeat::First => record.set(field, value),
                Repeat::Append => record.append(field, value),
            }
        }
    }

    let emails = extract_emails(raw);
    if !emails.is_empty() {
        record.set(fields::EMAILS, emails);
    }

    record
}

/// Every distinct e-mail address in the text, in order of appearance
pub fn extract_emails(raw: &str) -> Vec<String> {
    let mut emails: Vec<String> = Vec::new();
    for m in EMAIL_RE.find_iter(raw) {
        let email = m.as_str().trim_end_matches('.').to_string();
        if !emails.iter().any(|e| e.eq_ignore_ascii_case(&email)) {
            emails.push(email);
        }
    }
    emails
}

/// `Registry Domain ID:` value from raw text, matched case-insensitively
pub fn extract_registry_domain_id(raw: &str) -> Option<String> {
    REGISTRY_DOMAIN_ID_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|id| !id.is_empty())
}

/// True when the response says the domain is not registered
pub fn is_not_found(raw: &str) -> bool {
    let lower = raw.to_lowercase();
    let says_missing = NOT_FOUND_PATTERNS.iter().any(|p| lower.contains(p));
    let has_registration = REGISTRATION_MARKERS.iter().any(|m| lower.contains(m));
    says_missing && !has_registration
}

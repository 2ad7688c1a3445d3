//! EPP status normalization
//!
//! WHOIS publishes EPP codes like `clientTransferProhibited
//! https://icann.org/epp#clientTransferProhibited`; RDAP wants
//! `client transfer prohibited`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static ANNOTATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\(.*\)|\s*https?://\S+").expect("annotation pattern is valid")
});

/// Normalize one WHOIS status value; `None` when nothing is left.
///
/// Words are split only where a lowercase letter or digit is followed by an
/// uppercase one, so all-caps tokens stay whole: `ACTIVE` becomes `active`,
/// not `a c t i v e`.
pub fn normalize_status(status: &str) -> Option<String> {
    let cleaned = ANNOTATION_RE.replace_all(status, "");
    let cleaned = cleaned.trim();

    let mut out = String::with_capacity(cleaned.len() + 8);
    let mut prev: Option<char> = None;
    for c in cleaned.chars() {
        if c.is_whitespace() {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            prev = Some(c);
            continue;
        }
        // CamelCase boundary: lower/digit followed by upper
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            out.push(' ');
        }
        out.extend(c.to_lowercase());
        prev = Some(c);
    }

    let out = out.trim_end().to_string();
    (!out.is_empty()).then_some(out)
}

/// Normalize and deduplicate status values.
///
/// Output is sorted for stable responses; clients must not rely on order.
pub fn normalize_statuses<I, S>(statuses: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    statuses
        .into_iter()
        .filter_map(|s| normalize_status(s.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_with_url() {
        assert_eq!(
            normalize_status("clientTransferProhibited https://icann.org/epp#clientTransferProhibited")
                .as_deref(),
            Some("client transfer prohibited")
        );
    }

    #[test]
    fn test_parenthetical() {
        assert_eq!(
            normalize_status("clientTransferProhibited (https://icann.org/epp#clientTransferProhibited)")
                .as_deref(),
            Some("client transfer prohibited")
        );
        assert_eq!(normalize_status("ok (active)").as_deref(), Some("ok"));
    }

    #[test]
    fn test_already_readable() {
        assert_eq!(
            normalize_status("Client Hold").as_deref(),
            Some("client hold")
        );
        assert_eq!(normalize_status("ACTIVE").as_deref(), Some("active"));
        assert_eq!(normalize_status("  serverHold  ").as_deref(), Some("server hold"));
    }

    #[test]
    fn test_empty_after_cleanup() {
        assert_eq!(normalize_status("https://icann.org/epp"), None);
        assert_eq!(normalize_status(""), None);
    }

    #[test]
    fn test_dedup() {
        let statuses = normalize_statuses([
            "clientTransferProhibited https://icann.org/epp#clientTransferProhibited",
            "clientTransferProhibited",
            "client transfer prohibited",
            "clientDeleteProhibited (https://icann.org/epp#clientDeleteProhibited)",
        ]);
        assert_eq!(
            statuses,
            vec!["client delete prohibited", "client transfer prohibited"]
        );
    }
}

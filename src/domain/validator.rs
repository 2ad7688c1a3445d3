//! Domain name validation utilities

use crate::error::{Result, WhoisRdapError};
use std::fmt;

/// Maximum length of an LDH domain name
const MAX_DOMAIN_LENGTH: usize = 253;

/// Requested domain name, prepared as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainName {
    /// Lowercase ASCII (punycode) form
    ldh: String,
    /// Unicode form, only when it differs from `ldh`
    unicode: Option<String>,
}

impl DomainName {
    /// Lowercase LDH form, used for lookups and output
    pub fn ldh(&self) -> &str {
        &self.ldh
    }

    /// Unicode form for internationalized names
    pub fn unicode(&self) -> Option<&str> {
        self.unicode.as_deref()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ldh)
    }
}

/// Domain name validator.
///
/// Only rejects input that cannot be turned into a lookup key; it does not
/// check registrability or TLD existence.
#[derive(Debug, Clone, Default)]
pub struct DomainValidator;

impl DomainValidator {
    /// Create a new domain validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a domain name and build its lookup key
    pub fn validate(&self, domain: &str) -> Result<DomainName> {
        let original = domain.trim().trim_end_matches('.').to_string();

        self.validate_format(domain, &original)?;

        let ldh = self.to_ldh(&original)?;

        self.validate_length(&ldh)?;

        let unicode = self.to_unicode(&original, &ldh);

        Ok(DomainName {
            ldh,
            unicode,
        })
    }

    /// Validate domain format
    fn validate_format(&self, input: &str, domain: &str) -> Result<()> {
        if domain.is_empty() {
            return Err(WhoisRdapError::validation(input, "Domain name cannot be empty"));
        }

        if domain.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(WhoisRdapError::validation(
                input,
                "Domain name cannot contain whitespace or control characters",
            ));
        }

        Ok(())
    }

    /// Validate domain length
    fn validate_length(&self, ldh: &str) -> Result<()> {
        if ldh.len() > MAX_DOMAIN_LENGTH {
            return Err(WhoisRdapError::validation(
                ldh,
                format!("Domain name too long (max {} characters)", MAX_DOMAIN_LENGTH),
            ));
        }

        Ok(())
    }

    /// Convert to lowercase ASCII, applying IDNA to non-ASCII labels
    fn to_ldh(&self, domain: &str) -> Result<String> {
        match idna::domain_to_ascii_cow(domain.as_bytes(), idna::AsciiDenyList::URL) {
            Ok(ascii) => Ok(ascii.to_lowercase()),
            // Non-hostname ASCII keys (underscores, odd punctuation) are still looked up as-is
            Err(_) if domain.is_ascii() => Ok(domain.to_lowercase()),
            Err(e) => Err(WhoisRdapError::validation(
                domain,
                format!("Cannot convert to an ASCII domain name: {:?}", e),
            )),
        }
    }

    /// Unicode form: the supplied name when it is non-ASCII, otherwise the
    /// decoded form of any punycode labels
    fn to_unicode(&self, original: &str, ldh: &str) -> Option<String> {
        if !original.is_ascii() {
            return Some(original.to_string());
        }

        if !ldh.split('.').any(|label| label.starts_with("xn--")) {
            return None;
        }

        let (unicode, result) = idna::domain_to_unicode(ldh);
        match result {
            Ok(()) if unicode != ldh => Some(unicode),
            _ => None,
        }
    }
}

//! Registrar enrichment registry.
//!
//! Some registrars publish less in WHOIS than RDAP requires of them. This is a
//! small, static mapping from a registrar name pattern to the data that fills
//! those gaps. Patterns match as case-insensitive substrings of the WHOIS
//! registrar name; the first match wins.

/// Postal address in jCard `adr` component order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostalAddress {
    pub street: &'static str,
    pub locality: &'static str,
    pub region: &'static str,
    pub postal_code: &'static str,
    pub country: &'static str,
}

/// Data published on behalf of a registrar when WHOIS omits it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrarEnrichment {
    /// Lowercase substring of the registrar name
    pub pattern: &'static str,
    pub iana_id: &'static str,
    pub address: Option<PostalAddress>,
    pub abuse_email: Option<&'static str>,
    pub abuse_phone: Option<&'static str>,
    pub privacy_email: Option<&'static str>,
}

static REGISTRARS: &[RegistrarEnrichment] = &[
    RegistrarEnrichment {
        pattern: "cosmotown",
        iana_id: "1509",
        address: Some(PostalAddress {
            street: "68 Willow Road",
            locality: "Menlo Park",
            region: "CA",
            postal_code: "94025",
            country: "US",
        }),
        abuse_email: Some("abuse@cosmotown.com"),
        abuse_phone: Some("+1.6503198930"),
        privacy_email: Some("privacy@cosmotown.com"),
    },
    RegistrarEnrichment {
        pattern: "markmonitor",
        iana_id: "292",
        address: None,
        abuse_email: None,
        abuse_phone: None,
        privacy_email: None,
    },
];

/// Find enrichment data for a WHOIS registrar name.
pub fn lookup_registrar(registrar: &str) -> Option<&'static RegistrarEnrichment> {
    let name = registrar.to_lowercase();
    REGISTRARS.iter().find(|r| name.contains(r.pattern))
}

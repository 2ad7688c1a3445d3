//! WHOIS records and the lookup collaborator
//!
//! A [`WhoisRecord`] is a bag of named fields as produced by a WHOIS client.
//! Values are explicitly tagged as single or repeated so the normalizer can
//! treat every field as a sequence.

#[cfg(feature = "whois")]
pub mod client;
pub mod parser;

#[cfg(feature = "whois")]
pub use client::TcpWhoisClient;
pub use parser::parse_whois_text;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Field names understood by the normalizer
pub mod fields {
    pub const REGISTRY_DOMAIN_ID: &str = "registry_domain_id";
    pub const STATUS: &str = "status";
    pub const DOMAIN_STATUS: &str = "domain_status";
    pub const CREATION_DATE: &str = "creation_date";
    pub const UPDATED_DATE: &str = "updated_date";
    pub const EXPIRATION_DATE: &str = "expiration_date";
    pub const NAME_SERVERS: &str = "name_servers";
    pub const NAME_SERVER: &str = "name_server";
    pub const REGISTRAR: &str = "registrar";
    pub const REGISTRAR_IANA_ID: &str = "registrar_iana_id";
    pub const REGISTRAR_ABUSE_CONTACT_PHONE: &str = "registrar_abuse_contact_phone";
    pub const EMAILS: &str = "emails";
    pub const DNSSEC: &str = "dnssec";
    pub const WHOIS_SERVER: &str = "whois_server";
    pub const REGISTRAR_WHOIS_SERVER: &str = "registrar_whois_server";
}

/// A single WHOIS field value
#[derive(Debug, Clone, PartialEq)]
pub enum WhoisValue {
    Single(String),
    Many(Vec<String>),
    Timestamp(DateTime<Utc>),
}

impl WhoisValue {
    /// Flatten into text values; timestamps render as `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            WhoisValue::Single(s) => vec![s.clone()],
            WhoisValue::Many(values) => values.clone(),
            WhoisValue::Timestamp(ts) => vec![ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()],
        }
    }

    /// First text value, if any
    pub fn first(&self) -> Option<String> {
        self.to_strings().into_iter().next()
    }

    /// True for empty strings and empty lists
    pub fn is_empty(&self) -> bool {
        match self {
            WhoisValue::Single(s) => s.trim().is_empty(),
            WhoisValue::Many(values) => values.iter().all(|v| v.trim().is_empty()),
            WhoisValue::Timestamp(_) => false,
        }
    }
}

impl From<&str> for WhoisValue {
    fn from(value: &str) -> Self {
        WhoisValue::Single(value.to_string())
    }
}

impl From<String> for WhoisValue {
    fn from(value: String) -> Self {
        WhoisValue::Single(value)
    }
}

impl From<Vec<String>> for WhoisValue {
    fn from(values: Vec<String>) -> Self {
        WhoisValue::Many(values)
    }
}

impl From<Vec<&str>> for WhoisValue {
    fn from(values: Vec<&str>) -> Self {
        WhoisValue::Many(values.into_iter().map(String::from).collect())
    }
}

impl From<DateTime<Utc>> for WhoisValue {
    fn from(ts: DateTime<Utc>) -> Self {
        WhoisValue::Timestamp(ts)
    }
}

/// WHOIS record as returned by a [`WhoisLookup`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhoisRecord {
    fields: BTreeMap<String, WhoisValue>,
    raw_text: Option<String>,
}

impl WhoisRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record that only carries the raw response text
    pub fn from_raw(raw_text: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            raw_text: Some(raw_text.into()),
        }
    }

    /// Builder-style field setter
    pub fn with(mut self, key: &str, value: impl Into<WhoisValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, key: &str, value: impl Into<WhoisValue>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Append a text value, promoting a single value to a list
    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.remove(key) {
            None => {
                self.fields.insert(key.to_string(), WhoisValue::Single(value));
            }
            Some(existing) => {
                let mut values = existing.to_strings();
                values.push(value);
                self.fields.insert(key.to_string(), WhoisValue::Many(values));
            }
        }
    }

    /// Field value; empty strings and lists count as absent
    pub fn get(&self, key: &str) -> Option<&WhoisValue> {
        self.fields.get(key).filter(|v| !v.is_empty())
    }

    /// First present field among `keys`
    pub fn get_any(&self, keys: &[&str]) -> Option<&WhoisValue> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// First text value of a field, trimmed
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(WhoisValue::first)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// First text value among `keys`
    pub fn text_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// All values of a field as a sequence; absent fields yield an empty list
    pub fn values(&self, key: &str) -> Vec<String> {
        self.get(key).map(WhoisValue::to_strings).unwrap_or_default()
    }

    /// Raw WHOIS response text
    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    /// True when no parsed field is present
    pub fn has_fields(&self) -> bool {
        self.fields.values().any(|v| !v.is_empty())
    }

    /// True when the record carries neither fields nor raw text
    pub fn is_empty(&self) -> bool {
        !self.has_fields()
            && self
                .raw_text
                .as_deref()
                .map_or(true, |raw| raw.trim().is_empty())
    }
}

/// WHOIS lookup collaborator.
///
/// Returns `Ok(None)` when the upstream server answered with nothing usable.
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    /// Look up a domain by its LDH name
    async fn lookup(&self, domain: &str) -> Result<Option<WhoisRecord>>;

    /// Name used in logs
    fn name(&self) -> &'static str;
}

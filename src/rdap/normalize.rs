//! WHOIS record → RDAP domain object
//!
//! The normalizer is a pure function of the record, the requested name and
//! the current time. Missing data never fails: absent sections are omitted
//! or defaulted, and an absent record yields an empty-but-valid object.

use super::dates::{format_date, format_dates};
use super::entity::registrar_entity;
use super::status::normalize_statuses;
use super::types::{Event, Link, Nameserver, Notice, RdapDomain, SecureDns};
use crate::domain::{derive_handle, DomainName};
use crate::types::NormalizerConfig;
use crate::whois::parser::{extract_registry_domain_id, parse_whois_text};
use crate::whois::{fields, WhoisRecord};
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Synthetic event appended to every response
pub const RDAP_DATABASE_UPDATE_EVENT: &str = "last update of RDAP database";

/// WHOIS date field → RDAP event action, in output order
const EVENT_TABLE: &[(&str, &str)] = &[
    (fields::CREATION_DATE, "registration"),
    (fields::UPDATED_DATE, "last changed"),
    (fields::EXPIRATION_DATE, "expiration"),
];

const DNSSEC_SIGNED: &str = "signeddelegation";

/// Maps WHOIS records onto RDAP domain objects
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalize using the current time for the RDAP database event
    pub fn normalize(&self, record: Option<&WhoisRecord>, domain: &DomainName) -> RdapDomain {
        self.normalize_at(record, domain, Utc::now())
    }

    /// Normalize with an explicit timestamp for the RDAP database event
    pub fn normalize_at(
        &self,
        record: Option<&WhoisRecord>,
        domain: &DomainName,
        now: DateTime<Utc>,
    ) -> RdapDomain {
        let Some(record) = record.filter(|r| !r.is_empty()) else {
            return self.empty_domain(domain, now);
        };

        // Raw-only records get parsed here so the field mapping applies to them too
        let record: Cow<'_, WhoisRecord> = match record.raw_text() {
            Some(raw) if !record.has_fields() => Cow::Owned(parse_whois_text(raw)),
            _ => Cow::Borrowed(record),
        };

        let mut rdap = RdapDomain::new(self.handle(&record, domain), domain.ldh());
        rdap.unicode_name = domain.unicode().map(String::from);
        rdap.status = map_status(&record);
        rdap.events = map_events(&record, now);
        rdap.nameservers = map_nameservers(&record);

        if let Some(registrar) = record.text(fields::REGISTRAR) {
            rdap.entities.push(registrar_entity(
                &record,
                &registrar,
                self.config.privacy_contacts,
            ));
        }

        rdap.secure_dns = map_secure_dns(&record);
        rdap.links = self.links(&record, domain);
        rdap.notices = static_notices();
        rdap.port43 = record
            .text_any(&[fields::WHOIS_SERVER, fields::REGISTRAR_WHOIS_SERVER])
            .map(|s| whois_host(&s));

        rdap
    }

    /// Shell returned when upstream had no record at all
    fn empty_domain(&self, domain: &DomainName, now: DateTime<Utc>) -> RdapDomain {
        let mut rdap = RdapDomain::new(
            derive_handle(domain.ldh(), &self.config.repository_tag),
            domain.ldh(),
        );
        rdap.unicode_name = domain.unicode().map(String::from);
        rdap.events.push(database_update_event(now));
        rdap.links.push(self.self_link(domain));
        rdap.notices = static_notices();
        rdap
    }

    /// Registry id, then an id found in raw text, then a derived handle
    fn handle(&self, record: &WhoisRecord, domain: &DomainName) -> String {
        record
            .text(fields::REGISTRY_DOMAIN_ID)
            .or_else(|| record.raw_text().and_then(extract_registry_domain_id))
            .unwrap_or_else(|| derive_handle(domain.ldh(), &self.config.repository_tag))
    }

    fn self_link(&self, domain: &DomainName) -> Link {
        Link::rdap(
            "self",
            format!("{}/domain/{}", self.config.base_url, domain.ldh()),
        )
    }

    fn links(&self, record: &WhoisRecord, domain: &DomainName) -> Vec<Link> {
        let mut links = vec![self.self_link(domain)];

        if let Some(server) =
            record.text_any(&[fields::REGISTRAR_WHOIS_SERVER, fields::WHOIS_SERVER])
        {
            links.push(Link::rdap(
                "related",
                format!("https://{}/domain/{}", whois_host(&server), domain.ldh()),
            ));
        }

        links
    }
}

fn map_status(record: &WhoisRecord) -> Vec<String> {
    record
        .get_any(&[fields::STATUS, fields::DOMAIN_STATUS])
        .map(|value| normalize_statuses(value.to_strings()))
        .unwrap_or_default()
}

/// One event per action (first parsable date wins), then the database event
fn map_events(record: &WhoisRecord, now: DateTime<Utc>) -> Vec<Event> {
    let mut events: Vec<Event> = EVENT_TABLE
        .iter()
        .filter_map(|(field, action)| {
            let value = record.get(field)?;
            let date = format_dates(value).into_iter().next()?;
            Some(Event::new(*action, date))
        })
        .collect();

    events.push(database_update_event(now));
    events
}

fn database_update_event(now: DateTime<Utc>) -> Event {
    Event::new(RDAP_DATABASE_UPDATE_EVENT, format_date(&now))
}

/// Lowercased, deduplicated nameservers; a single value may hold several
/// space-delimited names
fn map_nameservers(record: &WhoisRecord) -> Vec<Nameserver> {
    let Some(value) = record.get_any(&[fields::NAME_SERVERS, fields::NAME_SERVER]) else {
        return Vec::new();
    };

    value
        .to_strings()
        .iter()
        .flat_map(|s| s.split_whitespace())
        .map(|ns| ns.trim_end_matches('.').to_lowercase())
        .filter(|ns| !ns.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(Nameserver::new)
        .collect()
}

fn map_secure_dns(record: &WhoisRecord) -> SecureDns {
    SecureDns {
        delegation_signed: record
            .text(fields::DNSSEC)
            .is_some_and(|v| v.to_lowercase() == DNSSEC_SIGNED),
    }
}

/// Bare host name from a WHOIS server field such as `whois://whois.example.com/`
fn whois_host(server: &str) -> String {
    let host = server.trim();
    let host = host
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(host);
    host.trim_end_matches('/').to_lowercase()
}

/// Notices carried by every domain response
pub fn static_notices() -> Vec<Notice> {
    vec![
        Notice {
            title: "Terms of Use".to_string(),
            description: vec!["Service subject to Terms of Use.".to_string()],
            links: vec![Link::reference("https://www.cosmotown.com/terms", "text/html")],
        },
        Notice {
            title: "Status Codes".to_string(),
            description: vec![
                "For more information on domain status codes, please visit https://icann.org/epp"
                    .to_string(),
            ],
            links: vec![Link::reference("https://icann.org/epp", "text/html")],
        },
        Notice {
            title: "RDDS Inaccuracy Complaint Form".to_string(),
            description: vec![
                "URL of the ICANN RDDS Inaccuracy Complaint Form: https://icann.org/wicf"
                    .to_string(),
            ],
            links: vec![Link::reference("https://icann.org/wicf", "text/html")],
        },
    ]
}

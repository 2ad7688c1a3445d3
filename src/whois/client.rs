//! WHOIS client over TCP/43

use super::parser::{is_not_found, parse_whois_text};
use super::{fields, WhoisLookup, WhoisRecord};
use crate::error::{Result, WhoisRdapError};
use crate::types::WhoisConfig;
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

const IANA_WHOIS_SERVER: &str = "whois.iana.org";

/// Upper bound on a single WHOIS response
const MAX_RESPONSE_BYTES: u64 = 1024 * 1024;

/// Pure Rust WHOIS client (no external `whois` binary required)
#[derive(Debug, Clone, Default)]
pub struct TcpWhoisClient {
    config: WhoisConfig,
}

impl TcpWhoisClient {
    /// Create a client with default timeouts
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client with custom configuration
    pub fn with_config(config: WhoisConfig) -> Self {
        Self { config }
    }

    fn timeout_secs(&self) -> u64 {
        self.config.timeout.as_secs()
    }

    /// Resolve the WHOIS server responsible for a TLD
    async fn server_for(&self, tld: &str) -> Result<String> {
        if let Some(server) = whois_server_for_tld(tld) {
            return Ok(server.to_string());
        }

        // Unknown TLD: ask IANA for the authoritative server.
        let iana = self.query_whois(IANA_WHOIS_SERVER, tld).await?;
        parse_iana_whois_server(&iana)
            .or_else(|| parse_iana_refer_server(&iana))
            .ok_or_else(|| {
                WhoisRdapError::network(
                    format!("No WHOIS server found for TLD: {}", tld),
                    Some(IANA_WHOIS_SERVER.to_string()),
                )
            })
    }

    async fn query_whois(&self, server: &str, query: &str) -> Result<String> {
        let addr = format!("{}:{}", server, self.config.port);
        let step = self.config.timeout;
        let secs = self.timeout_secs();

        let mut stream = timeout(step, TcpStream::connect(&addr))
            .await
            .map_err(|_| WhoisRdapError::timeout("WHOIS connect", secs))?
            .map_err(|e| {
                WhoisRdapError::network(format!("WHOIS connect failed: {}", e), Some(addr.clone()))
            })?;

        timeout(step, stream.write_all(format!("{}\r\n", query).as_bytes()))
            .await
            .map_err(|_| WhoisRdapError::timeout("WHOIS write", secs))?
            .map_err(|e| {
                WhoisRdapError::network(format!("WHOIS write failed: {}", e), Some(addr.clone()))
            })?;

        let mut buf = Vec::new();
        timeout(step, (&mut stream).take(MAX_RESPONSE_BYTES).read_to_end(&mut buf))
            .await
            .map_err(|_| WhoisRdapError::timeout("WHOIS read", secs))?
            .map_err(|e| WhoisRdapError::network(format!("WHOIS read failed: {}", e), Some(addr)))?;

        Ok(String::from_utf8_lossy(&buf).to_string())
    }
}

#[async_trait]
impl WhoisLookup for TcpWhoisClient {
    async fn lookup(&self, domain: &str) -> Result<Option<WhoisRecord>> {
        let tld = domain
            .rsplit('.')
            .next()
            .filter(|tld| !tld.is_empty())
            .ok_or_else(|| WhoisRdapError::validation(domain, "No TLD found"))?
            .to_lowercase();

        let server = self.server_for(&tld).await?;
        tracing::debug!(domain = %domain, server = %server, "Querying WHOIS");

        let raw = self.query_whois(&server, domain).await?;
        record_from_response(domain, &server, &raw)
    }

    fn name(&self) -> &'static str {
        "tcp-whois"
    }
}

/// Turn a raw response into a record, or classify it as absent / not found
fn record_from_response(domain: &str, server: &str, raw: &str) -> Result<Option<WhoisRecord>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    if is_not_found(raw) {
        return Err(WhoisRdapError::not_found(domain, Some(server.to_string())));
    }

    let mut record = parse_whois_text(raw);
    if record
        .get_any(&[fields::WHOIS_SERVER, fields::REGISTRAR_WHOIS_SERVER])
        .is_none()
    {
        record.set(fields::WHOIS_SERVER, server);
    }

    Ok(Some(record))
}

/// Minimal convention-based mapping for high-usage TLDs.
/// Unknown TLDs fall back to IANA discovery.
fn whois_server_for_tld(tld: &str) -> Option<&'static str> {
    match tld {
        "com" | "net" => Some("whois.verisign-grs.com"),
        "org" => Some("whois.pir.org"),
        "io" => Some("whois.nic.io"),
        "ai" => Some("whois.nic.ai"),
        "co" => Some("whois.nic.co"),
        "me" => Some("whois.nic.me"),
        "xyz" => Some("whois.nic.xyz"),
        _ => None,
    }
}

fn parse_iana_field(iana: &str, field: &str) -> Option<String> {
    iana.lines()
        .map(str::trim)
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().eq_ignore_ascii_case(field) {
                Some(value.trim().to_string())
            } else {
                None
            }
        })
        .filter(|s| !s.is_empty())
}

fn parse_iana_whois_server(iana: &str) -> Option<String> {
    parse_iana_field(iana, "whois")
}

fn parse_iana_refer_server(iana: &str) -> Option<String> {
    parse_iana_field(iana, "refer")
}

//! Configuration types for whois-rdap

use crate::config_error;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Configuration for the RDAP normalizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Base URL of this RDAP service, without trailing slash
    pub base_url: String,
    /// Repository tag appended to handles derived from the domain name
    pub repository_tag: String,
    /// Emit a privacy contact entity under the registrar
    pub privacy_contacts: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.cosmotown.com/rdap".to_string(),
            repository_tag: "COSMOTOWN".to_string(),
            privacy_contacts: true,
        }
    }
}

/// Configuration for the built-in WHOIS client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoisConfig {
    /// Timeout applied to each connect/write/read step
    pub timeout: Duration,
    /// WHOIS TCP port
    pub port: u16,
}

impl Default for WhoisConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            port: 43,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub normalizer: NormalizerConfig,
    pub whois: WhoisConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::from([0, 0, 0, 0]),
            port: 3030,
            normalizer: NormalizerConfig::default(),
            whois: WhoisConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Build configuration from `RDAP_*` and `WHOIS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind) = lookup("RDAP_BIND") {
            config.bind = parse_value("RDAP_BIND", &bind)?;
        }
        if let Some(port) = lookup("RDAP_PORT") {
            config.port = parse_value("RDAP_PORT", &port)?;
        }
        if let Some(base_url) = lookup("RDAP_BASE_URL") {
            let base_url = base_url.trim().trim_end_matches('/');
            if base_url.is_empty() {
                return Err(config_error!("RDAP_BASE_URL cannot be empty"));
            }
            config.normalizer.base_url = base_url.to_string();
        }
        if let Some(tag) = lookup("RDAP_REPOSITORY_TAG") {
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(config_error!("RDAP_REPOSITORY_TAG cannot be empty"));
            }
            config.normalizer.repository_tag = tag.to_string();
        }
        if let Some(flag) = lookup("RDAP_PRIVACY_CONTACTS") {
            config.normalizer.privacy_contacts = parse_flag("RDAP_PRIVACY_CONTACTS", &flag)?;
        }
        if let Some(secs) = lookup("WHOIS_TIMEOUT_SECS") {
            let secs: u64 = parse_value("WHOIS_TIMEOUT_SECS", &secs)?;
            if secs == 0 {
                return Err(config_error!("WHOIS_TIMEOUT_SECS must be positive"));
            }
            config.whois.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Socket address the server listens on
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| config_error!("Invalid {}='{}': {}", key, value, e))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(config_error!(
            "Invalid {}='{}': expected true or false",
            key,
            value
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WhoisRdapError;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 3030);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3030");
        assert!(config.normalizer.privacy_contacts);
        assert_eq!(config.whois.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("RDAP_BIND", "127.0.0.1"),
            ("RDAP_PORT", "8080"),
            ("RDAP_BASE_URL", "https://rdap.example.net/"),
            ("RDAP_REPOSITORY_TAG", "EXAMPLE"),
            ("RDAP_PRIVACY_CONTACTS", "off"),
            ("WHOIS_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.normalizer.base_url, "https://rdap.example.net");
        assert_eq!(config.normalizer.repository_tag, "EXAMPLE");
        assert!(!config.normalizer.privacy_contacts);
        assert_eq!(config.whois.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values() {
        let err = ServerConfig::from_lookup(lookup_from(&[("RDAP_PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("RDAP_PORT"));

        let err =
            ServerConfig::from_lookup(lookup_from(&[("RDAP_PRIVACY_CONTACTS", "maybe")])).unwrap_err();
        assert!(matches!(err, WhoisRdapError::Config { .. }));

        assert!(ServerConfig::from_lookup(lookup_from(&[("WHOIS_TIMEOUT_SECS", "0")])).is_err());
    }
}

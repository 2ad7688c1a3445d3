//! whois-rdap - RDAP domain lookups served from WHOIS data
//!
//! Looks a domain up over WHOIS and translates the free-text record into an
//! RDAP domain object: normalized statuses and dates, nameservers, registrar
//! entity with abuse/privacy contacts, links and notices.

pub mod domain;
pub mod error;
pub mod lookup;
pub mod rdap;
pub mod server;
pub mod types;
pub mod whois;

// Re-export commonly used types
pub use error::{Result, WhoisRdapError};
pub use types::{NormalizerConfig, ServerConfig, WhoisConfig};

// Re-export main functionality
pub use domain::{DomainName, DomainValidator};
pub use lookup::LookupService;
pub use rdap::{Normalizer, RdapDomain, RdapError};
pub use server::RdapServer;
pub use whois::{WhoisLookup, WhoisRecord, WhoisValue};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}

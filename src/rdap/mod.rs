//! RDAP domain objects built from WHOIS data.
//!
//! `normalize` holds the mapping; the other modules are its building blocks
//! (dates, statuses, entities) and the static registrar enrichment data.

pub mod dates;
pub mod entity;
pub mod normalize;
pub mod registry;
pub mod status;
pub mod types;

pub use normalize::{Normalizer, RDAP_DATABASE_UPDATE_EVENT};
pub use types::{RdapDomain, RdapError, RDAP_CONFORMANCE, RDAP_MEDIA_TYPE};

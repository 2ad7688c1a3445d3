//! Requested domain names and their lookup keys

pub mod validator;

// Re-export main functionality
pub use validator::{DomainName, DomainValidator};

/// Characters kept verbatim in derived handles; everything else becomes `_`
fn is_handle_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Maximum length of the domain part of a derived handle
pub const HANDLE_DOMAIN_MAX: usize = 80;

/// Build a deterministic handle for a domain the registry gave no id for,
/// e.g. `example.com` with tag `COSMOTOWN` becomes `example_com-COSMOTOWN`.
pub fn derive_handle(domain: &str, repository_tag: &str) -> String {
    let sanitized: String = domain
        .chars()
        .map(|c| if is_handle_char(c) { c } else { '_' })
        .take(HANDLE_DOMAIN_MAX)
        .collect();

    format!("{}-{}", sanitized, repository_tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_handle() {
        assert_eq!(derive_handle("example.com", "COSMOTOWN"), "example_com-COSMOTOWN");
        assert_eq!(derive_handle("my-site.co.uk", "TAG"), "my_site_co_uk-TAG");
    }

    #[test]
    fn test_derive_handle_truncates() {
        let long = format!("{}.com", "a".repeat(100));
        let handle = derive_handle(&long, "TAG");
        assert_eq!(handle, format!("{}-TAG", "a".repeat(80)));
    }

    #[test]
    fn test_derive_handle_non_ascii() {
        assert_eq!(derive_handle("bücher.de", "T"), "b_cher_de-T");
    }
}

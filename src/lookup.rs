//! Lookup orchestration: one WHOIS query per request, then normalization

use crate::domain::DomainValidator;
use crate::error::Result;
use crate::rdap::{Normalizer, RdapDomain};
use crate::types::NormalizerConfig;
use crate::whois::WhoisLookup;
use std::sync::Arc;
use std::time::Instant;

/// Resolves a requested domain into an RDAP domain object
#[derive(Clone)]
pub struct LookupService {
    whois: Arc<dyn WhoisLookup>,
    normalizer: Normalizer,
    validator: DomainValidator,
}

impl LookupService {
    pub fn new(whois: Arc<dyn WhoisLookup>, config: NormalizerConfig) -> Self {
        Self {
            whois,
            normalizer: Normalizer::new(config),
            validator: DomainValidator::new(),
        }
    }

    /// Look up `domain` and map the result to RDAP
    pub async fn lookup(&self, domain: &str) -> Result<RdapDomain> {
        let start_time = Instant::now();
        let name = self.validator.validate(domain)?;

        tracing::debug!(domain = %name, client = self.whois.name(), "Starting WHOIS lookup");

        let record = match self.whois.lookup(name.ldh()).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    domain = %name,
                    error = %e,
                    transient = e.is_transient(),
                    duration_ms = %start_time.elapsed().as_millis(),
                    "WHOIS lookup failed"
                );
                return Err(e);
            }
        };

        if record.is_none() {
            tracing::debug!(domain = %name, "WHOIS returned no record");
        }

        let rdap = self.normalizer.normalize(record.as_ref(), &name);

        tracing::info!(
            domain = %name,
            handle = %rdap.handle,
            events = rdap.events.len(),
            nameservers = rdap.nameservers.len(),
            duration_ms = %start_time.elapsed().as_millis(),
            "Domain lookup completed"
        );

        Ok(rdap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WhoisRdapError;
    use crate::whois::{fields, WhoisRecord};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLookup {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl WhoisLookup for CountingLookup {
        async fn lookup(&self, domain: &str) -> Result<Option<WhoisRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(WhoisRdapError::network("connection reset", None));
            }
            assert_eq!(domain, "example.com");
            Ok(Some(WhoisRecord::new().with(fields::REGISTRAR, "Example Registrar")))
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    fn service(fail: bool) -> (Arc<CountingLookup>, LookupService) {
        let whois = Arc::new(CountingLookup {
            calls: AtomicUsize::new(0),
            fail,
        });
        let service = LookupService::new(whois.clone(), NormalizerConfig::default());
        (whois, service)
    }

    #[tokio::test]
    async fn test_single_upstream_call() {
        let (whois, service) = service(false);
        let rdap = service.lookup("EXAMPLE.com").await.unwrap();

        assert_eq!(rdap.ldh_name, "example.com");
        assert!(rdap.registrar().is_some());
        assert_eq!(whois.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let (whois, service) = service(true);
        let err = service.lookup("example.com").await.unwrap_err();

        assert_eq!(err.status_code(), 500);
        assert_eq!(whois.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_domain_skips_lookup() {
        let (whois, service) = service(false);
        let err = service.lookup("   ").await.unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(whois.calls.load(Ordering::SeqCst), 0);
    }
}

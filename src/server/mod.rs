//! HTTP server exposing the RDAP domain endpoint.
//!
//! - `/domain/{name}` - RDAP domain object built from a WHOIS lookup
//!
//! Every response, errors included, is `application/rdap+json` with
//! `Access-Control-Allow-Origin: *`.

pub mod handlers;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::error::{Result, WhoisRdapError};
use crate::lookup::LookupService;
use crate::types::ServerConfig;
use crate::whois::WhoisLookup;
use handlers::{domain_handler, fallback_handler};

/// RDAP server: immutable configuration plus the injected WHOIS client
#[derive(Clone)]
pub struct RdapServer {
    config: ServerConfig,
    service: LookupService,
}

impl RdapServer {
    pub fn new(config: ServerConfig, whois: Arc<dyn WhoisLookup>) -> Self {
        let service = LookupService::new(whois, config.normalizer.clone());
        Self { config, service }
    }

    /// Router with all RDAP routes
    pub fn router(&self) -> Router {
        router(self.service.clone())
    }

    /// Bind and serve until Ctrl-C
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.socket_addr();
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            WhoisRdapError::config(format!("Failed to bind RDAP server to {}: {}", addr, e))
        })?;

        tracing::info!("RDAP server listening on http://{}/", addr);
        tracing::info!("  - Domain: http://{}/domain/{{name}}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| WhoisRdapError::io(format!("RDAP server error: {}", e)))?;

        tracing::info!("RDAP server stopped");
        Ok(())
    }
}

/// Router for a lookup service
pub fn router(service: LookupService) -> Router {
    Router::new()
        .route("/domain/*name", get(domain_handler))
        .fallback(fallback_handler)
        .with_state(service)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

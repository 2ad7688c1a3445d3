//! whois-rdap - RDAP domain endpoint backed by WHOIS lookups

use std::env;
use std::process;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use whois_rdap::{whois::TcpWhoisClient, RdapServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    // Check for help / version
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return Ok(());
    }
    if args.len() > 1 && (args[1] == "--version" || args[1] == "-V") {
        println!("whois-rdap {}", whois_rdap::VERSION);
        return Ok(());
    }

    // Initialize the library (.env)
    if let Err(e) = whois_rdap::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    };

    tracing::debug!(?config, "Loaded configuration");

    let whois = Arc::new(TcpWhoisClient::with_config(config.whois.clone()));
    RdapServer::new(config, whois).serve().await?;

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default `info` level
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Print help information
fn print_help() {
    println!("whois-rdap - RDAP domain endpoint backed by WHOIS lookups");
    println!();
    println!("USAGE:");
    println!("    whois-rdap");
    println!();
    println!("ENDPOINTS:");
    println!("    GET /domain/{{name}}    RDAP domain object (application/rdap+json)");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    RDAP_BIND              Listen address (default: 0.0.0.0)");
    println!("    RDAP_PORT              Listen port (default: 3030)");
    println!("    RDAP_BASE_URL          Base URL for self links (default: https://www.cosmotown.com/rdap)");
    println!("    RDAP_REPOSITORY_TAG    Suffix for derived handles (default: COSMOTOWN)");
    println!("    RDAP_PRIVACY_CONTACTS  Emit privacy contacts (default: true)");
    println!("    WHOIS_TIMEOUT_SECS     WHOIS connect/read timeout (default: 10)");
    println!("    RUST_LOG               Log filter (default: info)");
}

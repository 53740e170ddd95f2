//! Account proxy.
//!
//! ```text
//!     Client Request                 ┌──────────────────────────────────────┐
//!     ───────────────────────────────┼─▶ router ─▶ handlers ─▶ AccountsApi ─┼──▶ Upstream
//!                                    │                                      │    accounts API
//!     Client Response                │                                      │
//!     ◀──────────────────────────────┼── JSON body / relayed error ◀────────┼───
//!                                    └──────────────────────────────────────┘
//! ```
//!
//! Endpoints:
//! - `GET /form3Client/accounts/{accountId}`
//! - `POST /form3Client/accounts`
//! - `DELETE /form3Client/accounts/{accountId}?version={n}`

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use account_proxy::config::load_config;
use account_proxy::lifecycle::signals::wait_for_signal;
use account_proxy::observability::{logging, metrics};
use account_proxy::{AccountProxy, Shutdown};

#[derive(Parser)]
#[command(name = "account-proxy")]
#[command(about = "HTTP proxy for the upstream accounts API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "ACCOUNT_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("account-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let proxy = AccountProxy::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!(
            subscribers = shutdown.receiver_count(),
            "Initiating graceful shutdown"
        );
        shutdown.trigger();
    });

    proxy.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

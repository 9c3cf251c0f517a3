mod config;
mod routes;
mod search;
mod serpapi;
#[cfg(test)]
mod test_utils;

pub const USER_AGENT: &str = concat!("forum-search/", env!("CARGO_PKG_VERSION"));

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use config::Config;
use search::ForumSearch;
use serpapi::{SerpApiClient, SerpApiError};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("forum_search=info".parse()?),
        )
        .init();

    // Panics caught per request still pass through here, so they reach the log.
    std::panic::set_hook(Box::new(|panic| error!(%panic, "panic")));

    if let Err(e) = &dotenv
        && !e.not_found()
    {
        warn!("failed to load .env: {e}");
    }

    let config = Config::parse();

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;
    let serpapi = match SerpApiClient::new(http, config.api_key.as_deref(), &config.serpapi_base_url)
    {
        Ok(client) => Some(client),
        Err(SerpApiError::ApiKeyNotSet) => {
            warn!("SERPAPI_API_KEY not set, every forum will return empty results");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let search = Arc::new(ForumSearch::new(serpapi, config.source_timeout()));
    info!(
        api_key = if search.client().is_some() { "set" } else { "not set" },
        source_timeout_secs = config.source_timeout_secs,
        static_dir = ?config.static_dir,
        "starting forum-search"
    );

    let app = routes::router(search, config.static_dir.as_deref());

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .inspect_err(|e| error!(%addr, "failed to bind: {e}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| error!("server error: {e}"))?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}

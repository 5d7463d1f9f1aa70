mod agents;
mod config;
mod errors;
mod facade;
mod http_client;
mod models;
mod panels;
mod routes;
mod state;
mod view_state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::facade::HrPhoenixApi;
use crate::http_client::{CredentialProvider, NoCredentials, StaticToken, TokenFile};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HR Phoenix dashboard v{}", env!("CARGO_PKG_VERSION"));

    let credentials = credentials_from(&config);
    let api = HrPhoenixApi::from_config(&config, credentials)?;
    for (service, base_url) in api.agent_endpoints() {
        info!("{} at {base_url}", service.display_name());
    }
    info!("Memory search at {}", config.memory_search_url);

    let state = AppState::new(&config, &api)?;

    // Polls run until these handles drop at shutdown
    let pollers = state.mount_pollers();
    info!(
        "Polling health every {:?}, overview every {:?}",
        config.health_refresh, config.overview_refresh
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    for poller in pollers {
        poller.unmount().await;
    }
    info!("Shut down");

    Ok(())
}

/// A token file wins over a static token; neither means anonymous requests.
fn credentials_from(config: &Config) -> Arc<dyn CredentialProvider> {
    match (&config.auth_token_file, &config.auth_token) {
        (Some(path), _) => {
            info!("Reading bearer token from {}", path.display());
            Arc::new(TokenFile::new(path.clone()))
        }
        (None, Some(token)) => Arc::new(StaticToken::new(token.clone())),
        (None, None) => Arc::new(NoCredentials),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}

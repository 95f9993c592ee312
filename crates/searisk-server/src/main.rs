//! searisk server - hazard checks and safe rerouting over HTTP

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use searisk_server::api;
use searisk_server::config::Config;
use searisk_server::state::{AppState, GeneratorSettings};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("searisk_server=debug".parse()?)
                .add_directive("searisk_core=info".parse()?),
        )
        .init();

    tracing::info!("Starting searisk server...");

    let config = Config::from_env();
    let port = config.server_port;
    let state = {
        let config = config.clone();
        Arc::new(tokio::task::spawn_blocking(move || AppState::new(&config)).await?)
    };
    match state.generator_settings() {
        GeneratorSettings::Direct(_) => {
            tracing::warn!("SEARISK_ROUTER_URL not set; using offline direct-line generator")
        }
        GeneratorSettings::Http { base_url, .. } => tracing::info!("Using sea router at {}", base_url),
    }

    let app = api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Prenatal assistant - dialogue actions and client webhook
//!
//! Runs two HTTP servers in one process: the gateway the mobile client
//! talks to, and the action server the dialogue runtime calls back into.

mod action_server;
mod actions;
mod agent;
mod api;
mod config;
mod shutdown;

use action_server::{create_action_router, ActionServerState};
use actions::ActionRegistry;
use agent::{Agent, LoggingAgent, RasaAgent};
use api::{create_router, AppState};
use config::AppConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prenatal_assistant=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env()?;

    // The runtime handle must be ready before any traffic is accepted
    let rasa = RasaAgent::load(&config.rasa).await.map_err(|e| {
        tracing::error!(
            server = %config.rasa.server_url,
            model = %config.rasa.model_path,
            error = %e,
            "Failed to initialize dialogue runtime"
        );
        e
    })?;
    let agent: Arc<dyn Agent> = Arc::new(LoggingAgent::new(Arc::new(rasa)));

    let registry = Arc::new(ActionRegistry::standard());
    tracing::info!(actions = ?registry.names(), "Action registry initialized");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let gateway = create_router(AppState::new(agent))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CompressionLayer::new().gzip(true).br(true));
    let action_app = create_action_router(ActionServerState::new(registry))
        .layer(TraceLayer::new_for_http());

    let gateway_addr = SocketAddr::from(([0, 0, 0, 0], config.gateway_port));
    let actions_addr = SocketAddr::from(([0, 0, 0, 0], config.actions_port));
    let gateway_listener = tokio::net::TcpListener::bind(gateway_addr).await?;
    let actions_listener = tokio::net::TcpListener::bind(actions_addr).await?;

    tracing::info!("Gateway listening on {}", gateway_addr);
    tracing::info!("Action server listening on {}", actions_addr);

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown::cancel_on_signal(shutdown.clone()));

    let gateway_server = axum::serve(gateway_listener, gateway)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned());
    let action_server = axum::serve(actions_listener, action_app)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned());

    // One server failing takes the other down with it
    let result = tokio::try_join!(
        async {
            let r = gateway_server.await;
            shutdown.cancel();
            r
        },
        async {
            let r = action_server.await;
            shutdown.cancel();
            r
        },
    );
    result?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! Coordinated shutdown for the gateway and action server

use tokio_util::sync::CancellationToken;

/// Wait for SIGINT or SIGTERM, then cancel `token` so every server drains.
pub async fn cancel_on_signal(token: CancellationToken) {
    tokio::select! {
        () = shutdown_signal() => token.cancel(),
        () = token.cancelled() => {}
    }
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM - shutting down");
        }
        _ = sigint.recv() => {
            tracing::info!("Received SIGINT - shutting down");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Received Ctrl-C - shutting down");
    }
}

//! Graceful Shutdown for the API Server
//!
//! Signal handling and shutdown-aware serving:
//!
//! - SIGINT (Ctrl+C) handling
//! - SIGTERM handling (Unix only)
//! - In-flight request completion before exit
//!
//! The server binary couples this with its own background-task stop
//! channels: one task waits on [`shutdown_signal`], stops the traffic
//! simulator, then releases the future passed to
//! [`serve_with_custom_shutdown`].

use std::future::Future;

/// Shutdown signal type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// Received SIGINT (Ctrl+C)
    SigInt,
    /// Received SIGTERM
    SigTerm,
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SigInt => write!(f, "SIGINT (Ctrl+C)"),
            Self::SigTerm => write!(f, "SIGTERM"),
        }
    }
}

/// Create a future that completes when a shutdown signal is received
pub async fn shutdown_signal() -> ShutdownSignal {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        ShutdownSignal::SigInt
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
        ShutdownSignal::SigTerm
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<ShutdownSignal>();

    tokio::select! {
        signal = ctrl_c => signal,
        signal = terminate => signal,
    }
}

/// Start the API server, draining in-flight requests once
/// `shutdown_signal` completes.
pub async fn serve_with_custom_shutdown<F>(
    router: axum::Router,
    port: u16,
    shutdown_signal: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("REST API server listening on {}", addr);
    tracing::info!("   Swagger UI: http://localhost:{}/swagger-ui", port);
    tracing::info!("   Leaderboard: http://localhost:{}/leaderboard", port);
    tracing::info!("   Health: http://localhost:{}/health", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("Server shut down gracefully");

    Ok(())
}

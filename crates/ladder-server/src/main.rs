//! Ladder Leaderboard Server
//!
//! Main entry point for the ladder leaderboard service.
//!
//! ## Overview
//! The server keeps a population of rated users in memory and answers
//! three read endpoints (`/leaderboard`, `/search`, `/stats`) while a
//! background simulator continuously re-rates random users. Ranks are
//! computed live from a fixed-range bucket histogram, so rank queries
//! cost the same at ten thousand users as at ten million.
//!
//! ## Configuration
//! All configuration is done via environment variables:
//!
//! - `LADDER_PORT`: HTTP listen port (default: 8080)
//! - `LADDER_SEED_COUNT`: synthetic users created at startup (default: 10000)
//! - `LADDER_SIM_BATCH`: users re-rated per simulator tick (default: 10)
//! - `LADDER_SIM_PERIOD_MS`: simulator tick period in ms (default: 1000)
//!
//! ## Logging
//! Controlled via `RUST_LOG`:
//! ```bash
//! RUST_LOG=debug cargo run -p ladder-server
//! ```

use std::sync::Arc;
use std::time::Duration;

use ladder_api::{create_router, shutdown, AppState};
use ladder_core::{EngineConfig, Leaderboard};

mod seed;
mod simulator;

use simulator::{SimulatorConfig, TrafficSimulator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("LADDER_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    let seed_count: usize = std::env::var("LADDER_SEED_COUNT")
        .unwrap_or_else(|_| "10000".to_string())
        .parse()?;

    let sim_batch: usize = std::env::var("LADDER_SIM_BATCH")
        .unwrap_or_else(|_| "10".to_string())
        .parse()?;

    let sim_period_ms: u64 = std::env::var("LADDER_SIM_PERIOD_MS")
        .unwrap_or_else(|_| "1000".to_string())
        .parse()?;

    let engine = Arc::new(Leaderboard::new(EngineConfig::default()));

    // Seeding finishes before the listener binds; no request ever sees a
    // partially populated engine.
    tracing::info!("Seeding {} users...", seed_count);
    seed::seed_users(&engine, seed_count).await?;

    // Start background traffic simulation
    let simulator = Arc::new(TrafficSimulator::new(
        engine.clone(),
        SimulatorConfig {
            batch_size: sim_batch,
            period: Duration::from_millis(sim_period_ms),
        },
    ));
    let (sim_stop_tx, sim_stop_rx) = tokio::sync::oneshot::channel();
    let sim_handle = simulator.start(sim_stop_rx);

    let router = create_router(AppState { engine });

    // On SIGINT/SIGTERM: stop the simulator, then release the server's
    // shutdown future so in-flight requests drain.
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        let signal = shutdown::shutdown_signal().await;
        tracing::info!("Received {}, initiating graceful shutdown", signal);
        let _ = sim_stop_tx.send(());
        let _ = shutdown_tx.send(());
    });

    shutdown::serve_with_custom_shutdown(router, port, async {
        shutdown_rx.await.ok();
    })
    .await?;

    sim_handle.await?;
    tracing::info!("Ladder server shut down gracefully");

    Ok(())
}

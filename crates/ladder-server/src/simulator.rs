//! Traffic Simulation Background Task
//!
//! Simulates live user activity: once per tick, a handful of random users
//! get a fresh random rating. This runs while the query endpoints are
//! being hammered, so the engine's locking discipline is exercised under
//! realistic mixed load, not just in tests.
//!
//! ## Locking
//!
//! Each tick snapshots the username list under one read acquisition and
//! releases it before doing anything else. Random selection and rating
//! draws happen with no lock held, then each update takes its own short
//! write acquisition inside `upsert`. The stop signal is observed between
//! ticks, never mid-batch.

use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, error, info};

use ladder_core::Leaderboard;

/// Simulator configuration
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Users re-rated per tick, capped by the population size (default: 10)
    pub batch_size: usize,
    /// Tick period (default: 1s)
    pub period: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            period: Duration::from_secs(1),
        }
    }
}

/// Rating churn background task
pub struct TrafficSimulator {
    engine: Arc<Leaderboard>,
    config: SimulatorConfig,
}

impl TrafficSimulator {
    pub fn new(engine: Arc<Leaderboard>, config: SimulatorConfig) -> Self {
        Self { engine, config }
    }

    /// Start the simulation background task
    pub fn start(self: Arc<Self>, shutdown_rx: oneshot::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(self.config.period);
            let mut shutdown_rx = shutdown_rx;

            info!(
                "Traffic simulator started (batch: {}, period: {:?})",
                self.config.batch_size, self.config.period
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.run_batch().await;
                    }
                    _ = &mut shutdown_rx => {
                        info!("Traffic simulator shutting down");
                        break;
                    }
                }
            }
        })
    }

    /// Apply one batch of random rating updates.
    async fn run_batch(&self) {
        let usernames = self.engine.usernames().await;
        if usernames.is_empty() {
            return;
        }

        // Draw the whole batch before touching the engine again; the rng
        // must not live across an await.
        let updates: Vec<(String, u32)> = {
            let mut rng = rand::thread_rng();
            let min = self.engine.config().min_rating;
            let max = self.engine.config().max_rating;
            let count = self.config.batch_size.min(usernames.len());

            let chosen: Vec<String> = usernames
                .choose_multiple(&mut rng, count)
                .cloned()
                .collect();
            chosen
                .into_iter()
                .map(|username| (username, rng.gen_range(min..=max)))
                .collect()
        };

        let count = updates.len();
        for (username, rating) in updates {
            // Draws come from the engine's own range, so a rejection here
            // means a bug worth shouting about.
            if let Err(e) = self.engine.upsert(&username, rating).await {
                error!("simulated update rejected for {}: {}", username, e);
            }
        }
        debug!("applied {} simulated rating updates", count);
    }
}

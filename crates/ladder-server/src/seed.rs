//! Synthetic Population Bootstrap
//!
//! Seeds `user_0 .. user_{count-1}` with uniform random ratings before the
//! server starts taking traffic. Ratings are drawn up front so the rng
//! never lives across an await.

use rand::Rng;
use tracing::info;

use ladder_core::Leaderboard;

/// Seed `count` synthetic users with uniform random ratings.
pub async fn seed_users(engine: &Leaderboard, count: usize) -> ladder_core::Result<()> {
    let min = engine.config().min_rating;
    let max = engine.config().max_rating;

    let ratings: Vec<u32> = {
        let mut rng = rand::thread_rng();
        (0..count).map(|_| rng.gen_range(min..=max)).collect()
    };

    for (i, rating) in ratings.into_iter().enumerate() {
        engine.upsert(&format!("user_{i}"), rating).await?;
    }

    info!("Seeded {} users", count);
    Ok(())
}

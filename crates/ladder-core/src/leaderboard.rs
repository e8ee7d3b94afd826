//! The Ranking Engine
//!
//! One [`Leaderboard`] value owns the bucket histogram and the user
//! directory behind a single reader-writer lock and is the only way to
//! touch either. The two structures are coupled by a joint accounting
//! invariant: at every instant a reader can observe, the histogram's cell
//! sum equals the directory size, and each cell equals the number of
//! directory records at that rating.
//!
//! ## Locking discipline
//!
//! - `upsert` holds the exclusive (write) side for its whole three-step
//!   transition: decrement the old bucket, increment the new one, replace
//!   the directory record. No reader can land between those steps.
//! - `rank_of`, `top_n`, `prefix_search`, `size`, and `usernames` hold the
//!   shared (read) side. `prefix_search` computes every match's rank under
//!   the guard it already holds, via a helper that takes the state rather
//!   than the lock, so each response is one consistent snapshot.
//! - No engine operation awaits anything but the lock itself.
//!
//! `tokio::sync::RwLock` queues writers fairly with readers, so sustained
//! read traffic cannot starve the update path.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::buckets::BucketHistogram;
use crate::config::EngineConfig;
use crate::directory::UserDirectory;
use crate::error::{Error, Result};
use crate::user::{LeaderboardEntry, SearchMatch, User};

struct EngineState {
    buckets: BucketHistogram,
    users: UserDirectory,
}

/// Concurrent ranking engine over a bounded integer rating domain.
pub struct Leaderboard {
    config: EngineConfig,
    state: RwLock<EngineState>,
}

impl Leaderboard {
    pub fn new(config: EngineConfig) -> Self {
        let buckets = BucketHistogram::new(config.min_rating, config.max_rating);
        Self {
            config,
            state: RwLock::new(EngineState {
                buckets,
                users: UserDirectory::new(),
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Insert `username` or move it to a new rating.
    ///
    /// Applying the same `(username, rating)` twice is equivalent to
    /// applying it once. Out-of-range ratings and empty usernames are
    /// rejected without touching any state.
    pub async fn upsert(&self, username: &str, rating: u32) -> Result<()> {
        if username.is_empty() {
            return Err(Error::EmptyUsername);
        }
        if rating < self.config.min_rating || rating > self.config.max_rating {
            return Err(Error::InvalidRating {
                rating,
                min: self.config.min_rating,
                max: self.config.max_rating,
            });
        }

        let mut state = self.state.write().await;
        let old_rating = state.users.get(username).map(|u| u.rating);
        if let Some(old) = old_rating {
            state.buckets.decrement(old);
        }
        state.buckets.increment(rating);
        state.users.insert(User::new(username, rating));
        Ok(())
    }

    /// Dense competition rank a user at `rating` would hold right now:
    /// one plus the number of users rated strictly higher. Tied users
    /// share a rank; the next distinct rating skips by the tie size.
    pub async fn rank_of(&self, rating: u32) -> usize {
        let state = self.state.read().await;
        rank_in(&state, rating)
    }

    /// Top rows of the leaderboard, rating descending, ties broken by
    /// username ascending in byte order.
    ///
    /// `limit` is clamped: anything below 1 becomes `limit_default`,
    /// anything above `limit_max` becomes `limit_max`. The returned rows
    /// are one consistent snapshot.
    pub async fn top_n(&self, limit: i64) -> Vec<LeaderboardEntry> {
        let limit = self.clamp_limit(limit);
        let state = self.state.read().await;

        // Transient rating -> usernames grouping; one pass over the
        // directory, so the walk below touches only occupied ratings.
        let mut by_rating: HashMap<u32, Vec<&str>> = HashMap::new();
        for user in state.users.iter() {
            by_rating
                .entry(user.rating)
                .or_default()
                .push(user.username.as_str());
        }

        let mut rows = Vec::with_capacity(limit.min(state.users.len()));
        let mut rank = 1usize;
        for rating in (self.config.min_rating..=self.config.max_rating).rev() {
            let Some(group) = by_rating.get_mut(&rating) else {
                continue;
            };
            group.sort_unstable();
            for username in group.iter() {
                if rows.len() >= limit {
                    break;
                }
                rows.push(LeaderboardEntry {
                    rank,
                    username: (*username).to_string(),
                    rating,
                });
            }
            if rows.len() >= limit {
                break;
            }
            rank += group.len();
        }
        rows
    }

    /// All users whose username starts with `query`, case-insensitively,
    /// each carrying the global rank it held in the same snapshot.
    ///
    /// Matching folds both sides with `str::to_lowercase`; for the ASCII
    /// usernames this service seeds that is plain ASCII lowercasing, and
    /// Unicode input gets the same fold on both query and key. Results are
    /// ordered rating descending, then username ascending, and truncated
    /// to `search_limit` rows. An empty query returns no rows and takes
    /// no lock.
    pub async fn prefix_search(&self, query: &str) -> Vec<SearchMatch> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        let state = self.state.read().await;
        let mut matches: Vec<SearchMatch> = state
            .users
            .iter()
            .filter(|user| user.username.to_lowercase().starts_with(&needle))
            .map(|user| SearchMatch {
                username: user.username.clone(),
                rating: user.rating,
                rank: rank_in(&state, user.rating),
            })
            .collect();

        matches.sort_unstable_by(|a, b| {
            b.rating
                .cmp(&a.rating)
                .then_with(|| a.username.cmp(&b.username))
        });
        matches.truncate(self.config.search_limit);
        matches
    }

    /// Current population size.
    pub async fn size(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Owned snapshot of every username. The read guard is released
    /// before this returns, so callers can act on the list without
    /// blocking writers.
    pub async fn usernames(&self) -> Vec<String> {
        self.state.read().await.users.usernames()
    }

    /// Audit hook: true iff the histogram's cell sum equals the directory
    /// size and every cell matches the directory's per-rating population.
    pub async fn is_consistent(&self) -> bool {
        let state = self.state.read().await;
        if state.buckets.total() != state.users.len() {
            return false;
        }
        let mut per_rating: HashMap<u32, u32> = HashMap::new();
        for user in state.users.iter() {
            *per_rating.entry(user.rating).or_insert(0) += 1;
        }
        (self.config.min_rating..=self.config.max_rating)
            .all(|r| state.buckets.count_at(r) == per_rating.get(&r).copied().unwrap_or(0))
    }

    fn clamp_limit(&self, limit: i64) -> usize {
        if limit < 1 {
            self.config.limit_default
        } else {
            (limit as usize).min(self.config.limit_max)
        }
    }
}

/// Rank computation against an already-locked state. `prefix_search`
/// calls this once per match under its own read guard; the lock is not
/// reentrant and must not be reacquired here.
fn rank_in(state: &EngineState, rating: u32) -> usize {
    1 + state.buckets.count_above(rating)
}

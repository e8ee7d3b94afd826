//! Engine Configuration
//!
//! All tunables of the ranking engine live in one construction-time record.
//! There is no process-wide mutable configuration state; callers build an
//! [`EngineConfig`] (usually `EngineConfig::default()`) and hand it to
//! [`Leaderboard::new`](crate::Leaderboard::new).

/// Construction-time configuration for a [`Leaderboard`](crate::Leaderboard).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Lowest accepted rating, inclusive (default: 100)
    pub min_rating: u32,
    /// Highest accepted rating, inclusive (default: 5000)
    pub max_rating: u32,
    /// Maximum rows returned by a prefix search (default: 50)
    pub search_limit: usize,
    /// Hard cap on leaderboard row limits (default: 1000)
    pub limit_max: usize,
    /// Row limit used when a request supplies none, or a non-positive one
    /// (default: 100)
    pub limit_default: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_rating: 100,
            max_rating: 5000,
            search_limit: 50,
            limit_max: 1000,
            limit_default: 100,
        }
    }
}

//! User Record and Query Result Rows
//!
//! [`User`] is the unit of state the engine tracks: a case-sensitive
//! username paired with its current integer rating. The engine never hands
//! out references into its own storage; queries return owned
//! [`LeaderboardEntry`] and [`SearchMatch`] rows instead.

use serde::{Deserialize, Serialize};

/// A leaderboard member: unique username plus current rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub rating: u32,
}

impl User {
    pub fn new(username: impl Into<String>, rating: u32) -> Self {
        Self {
            username: username.into(),
            rating,
        }
    }
}

/// One row of a top-N leaderboard query.
///
/// Ranks are dense competition ranks: tied users share one rank and the
/// next distinct rating's rank jumps by the size of the tied group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub username: String,
    pub rating: u32,
}

/// One row of a prefix search, carrying the global rank the user held in
/// the same snapshot that produced the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub username: String,
    pub rating: u32,
    pub rank: usize,
}

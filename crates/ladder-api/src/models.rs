//! API models for the leaderboard endpoints

use ladder_core::{LeaderboardEntry, SearchMatch};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub username: String,
    pub rating: u32,
}

impl From<LeaderboardEntry> for LeaderboardRow {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            username: entry.username,
            rating: entry.rating,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResult {
    pub username: String,
    pub rating: u32,
    pub global_rank: usize,
}

impl From<SearchMatch> for SearchResult {
    fn from(m: SearchMatch) -> Self {
        Self {
            username: m.username,
            rating: m.rating,
            global_rank: m.rank,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub total_users: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Query parameters for `GET /leaderboard`.
///
/// `limit` is kept as a raw string: a malformed value falls back to the
/// default row count instead of failing deserialization with a 400.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LeaderboardParams {
    pub limit: Option<String>,
}

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchParams {
    pub username: Option<String>,
}

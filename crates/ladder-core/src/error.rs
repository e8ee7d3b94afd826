//! Error Types for the Ranking Engine
//!
//! Every fallible operation in `ladder-core` returns [`Result`], aliased to
//! `Result<T, Error>` so callers can propagate engine errors with `?`.
//!
//! Invariant violations (a bucket decremented below zero) are deliberately
//! *not* represented here: they indicate a bug in the engine itself and
//! abort the process instead of surfacing as a recoverable error.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("rating {rating} outside valid range [{min}, {max}]")]
    InvalidRating { rating: u32, min: u32, max: u32 },

    #[error("username must not be empty")]
    EmptyUsername,
}

pub type Result<T> = std::result::Result<T, Error>;

// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One voter's ranking of the options of a room, best choice first.
///
/// A ballot submitted by a single voter has a `count` of 1. Readers that
/// pre-group identical rankings may carry a larger multiplicity.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    pub choices: Vec<String>,
    pub count: u64,
}

/// A pre-aggregated score row, used when the ballot store keeps running
/// point totals instead of full rankings.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoredRow {
    pub option: String,
    pub points: u64,
}

// ******** Output data structures *********

/// Derived per-option aggregate: total points, leaderboard rank and the tie
/// flag. Recomputed from scratch on every tabulation pass, it carries no
/// identity of its own.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResultRow {
    pub option: String,
    pub points: u64,
    pub rank: u32,
    pub tied: bool,
}

/// Errors that prevent a tabulation or a draw from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingError {
    /// The weight scheme does not line up with the option set. This is a
    /// setup defect by the caller and is never degraded to zero scores.
    MismatchedWeights { options: usize, weights: usize },
    /// A draw was requested from an empty option set.
    EmptyDraw,
}

impl Error for VotingError {}

impl Display for VotingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingError::MismatchedWeights { options, weights } => write!(
                f,
                "{} weights declared for {} options",
                weights, options
            ),
            VotingError::EmptyDraw => write!(f, "cannot draw from an empty option set"),
        }
    }
}

// ********* Weight schemes **********

/// The construction scheme for a room with `n` options: `2n, 2n-2, ..., 2`.
///
/// First place is worth twice the number of options, and every following
/// rank two points less. The tabulation itself does not assume weights are
/// non-increasing, only that their number matches the option count.
pub fn default_weights(n: usize) -> Vec<u64> {
    (1..=n).rev().map(|i| 2 * i as u64).collect()
}

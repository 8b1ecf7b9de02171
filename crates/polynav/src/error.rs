#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures surfaced by the path-finding stages and by region/config construction.
///
/// The planners never return these to the caller directly: a failed query degrades to the
/// direct-to-goal route and keeps the error in [`PathStatus::Fallback`](crate::PathStatus).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NavError {
    #[error("node {destination} is unreachable from node {origin}")]
    Unreachable { origin: usize, destination: usize },

    #[error("predecessor walk from node {destination} did not reach node {origin} within {limit} steps")]
    BrokenPredecessorChain {
        origin: usize,
        destination: usize,
        limit: usize,
    },

    #[error("node index {index} out of range for a graph of {len} nodes")]
    NodeOutOfRange { index: usize, len: usize },

    #[error("outline {index} has {len} vertices; at least 3 are required")]
    DegenerateOutline { index: usize, len: usize },

    #[error("invalid planner config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, NavError>;

//! Error types for the hash ring.

use thiserror::Error;

/// Result type alias for ring operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when querying the ring.
///
/// Absence of a node is not an error: `remove_node` and `contains_node`
/// report it with a `bool`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A query that needs at least one node was run against an empty ring.
    #[error("hash ring is empty")]
    EmptyRing,
    /// A requested count is negative or exceeds the number of real nodes.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

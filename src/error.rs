//!
//! Defines error types for clock construction, update and decoding.

use crate::types::NodeId;

/// Errors produced while building, advancing or decoding a vector clock.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Adding another node would exceed `MAX_VERSIONS` distinct entries.
    /// The caller must prune the clock before continuing.
    #[error("vector clock is full: cannot track more than {max} distinct nodes")]
    CapacityExceeded { max: usize },
    /// The counter for the node is already at `u64::MAX`.
    #[error("version counter for node {0} overflowed")]
    CounterOverflow(NodeId),
    /// A clock entry carried a counter of 0.
    #[error("clock entry for node {0} has invalid version 0")]
    InvalidVersion(NodeId),
    /// Two entries were supplied for the same node.
    #[error("duplicate clock entry for node {0}")]
    DuplicateNode(NodeId),
    /// Entries were not strictly ascending by node id.
    #[error("clock entries out of order at node {0}")]
    Unordered(NodeId),
    /// The binary encoding could not be decoded.
    #[error("malformed clock encoding: {0}")]
    Malformed(String),
}

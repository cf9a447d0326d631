//! Shared scalar types for clock entries.

use std::fmt;

/// Identifier of a replica/actor that produces versions.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u16);

impl From<u16> for NodeId {
    fn from(id: u16) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-node monotonic counter. A stored counter is always >= 1.
pub type Counter = u64;

/// Maximum number of distinct nodes a single clock may track.
/// Sized to the signed 16-bit node-id space.
pub const MAX_VERSIONS: usize = i16::MAX as usize;

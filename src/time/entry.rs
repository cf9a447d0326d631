//! A single `(node, counter)` pair of a vector clock.

use crate::error::ClockError;
use crate::types::{Counter, NodeId};
use std::cmp::Ordering;
use std::fmt;

/// Immutable `(node_id, version)` pair.
///
/// Entries order by node id only, through [`ClockEntry::cmp_node`]. There is
/// no `Ord` impl since equality also covers the version. Inside a
/// [`VectorClock`](super::VectorClock) the backing ordered map keeps entries
/// ascending by node id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawEntry", into = "RawEntry")]
pub struct ClockEntry {
    node_id: NodeId,
    version: Counter,
}

impl ClockEntry {
    /// Builds an entry. A version of 0 is indistinguishable from an absent
    /// entry and is rejected.
    pub fn new(node_id: NodeId, version: Counter) -> Result<Self, ClockError> {
        if version == 0 {
            return Err(ClockError::InvalidVersion(node_id));
        }
        Ok(ClockEntry { node_id, version })
    }

    /// First entry written by `node_id`.
    pub fn first(node_id: NodeId) -> Self {
        ClockEntry { node_id, version: 1 }
    }

    // Counters held by a clock are >= 1 by construction.
    pub(super) fn from_stored(node_id: NodeId, version: Counter) -> Self {
        debug_assert!(version > 0);
        ClockEntry { node_id, version }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn version(&self) -> Counter {
        self.version
    }

    /// Orders by node id, ignoring versions. Usable with `sort_by`.
    pub fn cmp_node(&self, other: &ClockEntry) -> Ordering {
        self.node_id.cmp(&other.node_id)
    }

    /// Same node, version + 1. Refuses to wrap at `u64::MAX`.
    pub fn incremented(&self) -> Result<Self, ClockError> {
        let version = self
            .version
            .checked_add(1)
            .ok_or(ClockError::CounterOverflow(self.node_id))?;
        Ok(ClockEntry { node_id: self.node_id, version })
    }
}

impl fmt::Display for ClockEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node_id, self.version)
    }
}

// Wire shape; validated on the way in.
#[derive(serde::Serialize, serde::Deserialize)]
struct RawEntry {
    node_id: NodeId,
    version: Counter,
}

impl TryFrom<RawEntry> for ClockEntry {
    type Error = ClockError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        ClockEntry::new(raw.node_id, raw.version)
    }
}

impl From<ClockEntry> for RawEntry {
    fn from(entry: ClockEntry) -> Self {
        RawEntry { node_id: entry.node_id, version: entry.version }
    }
}

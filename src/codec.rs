//!
//! Compact binary encoding of a [`VectorClock`].
//!
//! Layout (big-endian):
//! - `u16` number of entries
//! - `u8` counter width in bytes, 1..=8
//! - per entry, ascending by node id: `u16` node id, then the counter in `width` bytes
//!
//! The encoder uses the smallest width that holds the largest counter.

use crate::error::ClockError;
use crate::time::{ClockEntry, VectorClock};
use crate::types::{NodeId, MAX_VERSIONS};

const HEADER_LEN: usize = 3;
const NODE_ID_LEN: usize = 2;

/// Bytes needed to hold `v`, at least 1.
fn counter_width(v: u64) -> usize {
    let bits = 64 - v.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

/// Size of `encode(clock)` without encoding it.
pub fn encoded_len(clock: &VectorClock) -> usize {
    HEADER_LEN + clock.len() * (NODE_ID_LEN + counter_width(clock.max_version()))
}

/// Serialises `clock`. Clocks over `MAX_VERSIONS` entries (possible only via
/// `merge`) are rejected since the count would not round-trip.
pub fn encode(clock: &VectorClock) -> Result<Vec<u8>, ClockError> {
    if clock.len() > MAX_VERSIONS {
        return Err(ClockError::CapacityExceeded { max: MAX_VERSIONS });
    }
    let width = counter_width(clock.max_version());
    let mut bytes = Vec::with_capacity(encoded_len(clock));
    bytes.extend_from_slice(&(clock.len() as u16).to_be_bytes());
    bytes.push(width as u8);
    for entry in clock.entries() {
        bytes.extend_from_slice(&entry.node_id().0.to_be_bytes());
        bytes.extend_from_slice(&entry.version().to_be_bytes()[8 - width..]);
    }
    Ok(bytes)
}

/// Parses a clock produced by [`encode`]. The input must be consumed exactly.
pub fn decode(bytes: &[u8]) -> Result<VectorClock, ClockError> {
    let decoded = decode_inner(bytes);
    if let Err(e) = &decoded {
        tracing::debug!(len = bytes.len(), error = %e, "failed to decode vector clock");
    }
    decoded
}

fn decode_inner(bytes: &[u8]) -> Result<VectorClock, ClockError> {
    if bytes.len() < HEADER_LEN {
        return Err(ClockError::Malformed(format!(
            "need at least {} header bytes, got {}",
            HEADER_LEN,
            bytes.len()
        )));
    }
    let count = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    let width = bytes[2] as usize;
    if !(1..=8).contains(&width) {
        return Err(ClockError::Malformed(format!("invalid counter width {}", width)));
    }
    if count > MAX_VERSIONS {
        return Err(ClockError::CapacityExceeded { max: MAX_VERSIONS });
    }
    let expected = HEADER_LEN + count * (NODE_ID_LEN + width);
    if bytes.len() != expected {
        return Err(ClockError::Malformed(format!(
            "expected {} bytes for {} entries, got {}",
            expected,
            count,
            bytes.len()
        )));
    }

    let mut entries = Vec::with_capacity(count);
    for chunk in bytes[HEADER_LEN..].chunks_exact(NODE_ID_LEN + width) {
        let node = NodeId(u16::from_be_bytes([chunk[0], chunk[1]]));
        let mut counter = [0u8; 8];
        counter[8 - width..].copy_from_slice(&chunk[NODE_ID_LEN..]);
        entries.push(ClockEntry::new(node, u64::from_be_bytes(counter))?);
    }
    // Enforces strictly ascending node ids.
    VectorClock::try_from(entries)
}

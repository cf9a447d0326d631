//! Proptest strategies for clocks and versioned values.
//!
//! Node ids are drawn from a small range so generated clocks overlap often
//! enough to exercise every branch of `merge` and `compare`.

use crate::time::{ClockEntry, VectorClock};
use crate::types::NodeId;
use crate::versioned::Versioned;
use proptest::prelude::*;

pub fn arb_node_id() -> impl Strategy<Value = NodeId> {
    (0u16..16).prop_map(NodeId)
}

/// Counters stay well clear of `u64::MAX` so tests can keep incrementing.
pub fn arb_vclock() -> impl Strategy<Value = VectorClock> {
    prop::collection::btree_map(arb_node_id(), 1u64..1_000, 0..10).prop_map(|m| {
        let entries = m.into_iter().map(|(n, v)| ClockEntry::new(n, v).expect("counter >= 1"));
        VectorClock::from_entries(entries).expect("strategy yields a valid clock")
    })
}

pub fn arb_versioned() -> impl Strategy<Value = Versioned<u32>> {
    (any::<u32>(), arb_vclock()).prop_map(|(value, clock)| Versioned::with_clock(value, clock))
}

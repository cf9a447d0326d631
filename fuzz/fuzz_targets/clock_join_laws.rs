#![no_main]

// Harness: clock_join_laws – join is a semilattice and compare agrees with it.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vclock_core::{NodeId, Occurred, VectorClock};

#[derive(Arbitrary, Debug, Clone)]
struct Writes {
    left: Vec<u8>,
    right: Vec<u8>,
}

// Replays a write history; node ids are kept small so histories overlap.
fn replay(writes: &[u8]) -> VectorClock {
    writes.iter().fold(VectorClock::empty(), |clock, node| {
        clock.incr(NodeId(u16::from(*node % 32))).expect("at most 32 nodes")
    })
}

fuzz_target!(|w: Writes| {
    let a = replay(&w.left);
    let b = replay(&w.right);
    let joined = a.merge(&b);

    assert_eq!(joined, b.merge(&a));
    assert_eq!(joined.merge(&a), joined);
    for side in [&a, &b] {
        assert!(joined == *side || VectorClock::compare(&joined, side) == Occurred::After);
    }
    if VectorClock::compare(&a, &b) == Occurred::After {
        assert_eq!(VectorClock::compare(&b, &a), Occurred::Before);
    }
});

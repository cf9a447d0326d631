#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Vclock-Core provides the causality primitives of an eventually-consistent
//! store: vector clocks and versioned values.
//!
//! A [`VectorClock`] records, per node, how many writes that node has made.
//! Clocks can be advanced ([`VectorClock::incr`]), joined
//! ([`VectorClock::merge`]) and classified against each other
//! ([`VectorClock::compare`]). A [`Versioned`] value carries the clock of the
//! write that produced it. Deciding what to do with concurrent versions is
//! left to the caller.

// Shared scalar types (NodeId, Counter, MAX_VERSIONS).
pub mod types;

// Clock entries and vector clocks.
pub mod time;

// Payload + clock wrapper.
pub mod versioned;

// Compact binary form of a clock.
pub mod codec;

pub mod error;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::ClockError;
pub use time::{ClockEntry, Occurred, VectorClock};
pub use types::{Counter, NodeId, MAX_VERSIONS};
pub use versioned::Versioned;

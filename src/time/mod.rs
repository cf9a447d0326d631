//! Logical-time primitives: clock entries and vector clocks.

pub mod entry;
pub mod vector;

// Re-export for convenience
pub use entry::ClockEntry;
pub use vector::{Occurred, VectorClock};

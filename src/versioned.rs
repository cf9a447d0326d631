//! A payload paired with the vector clock that produced it.

use crate::error::ClockError;
use crate::time::{Occurred, VectorClock};
use crate::types::NodeId;
use std::cmp::Ordering;
use std::fmt;

/// Value of type `T` together with its causal history.
///
/// Equality covers both the payload and the clock. Ordering questions go
/// through [`Versioned::compare`] or `PartialOrd`, which only look at the
/// clocks; two different payloads under one clock are unordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Versioned<T> {
    value: T,
    clock: VectorClock,
}

impl<T> Versioned<T> {
    /// Wraps an initial value with the empty clock.
    pub fn new(value: T) -> Self {
        Versioned { value, clock: VectorClock::empty() }
    }

    pub fn with_clock(value: T, clock: VectorClock) -> Self {
        Versioned { value, clock }
    }

    /// Node `node` wrote `value` causally after the current version.
    ///
    /// The current version is left untouched; the returned one carries
    /// `self.clock().incr(node)`.
    pub fn set_value(&self, node: NodeId, value: T) -> Result<Versioned<T>, ClockError> {
        let clock = self.clock.incr(node)?;
        tracing::trace!(node = %node, clock = %clock, "versioned write");
        Ok(Versioned { value, clock })
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn clock(&self) -> &VectorClock {
        &self.clock
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, VectorClock) {
        (self.value, self.clock)
    }

    /// Causal relation of `a` to `b`, by their clocks.
    pub fn compare(a: &Versioned<T>, b: &Versioned<T>) -> Occurred {
        VectorClock::compare(&a.clock, &b.clock)
    }

    pub fn happened_before(&self, other: &Versioned<T>) -> bool {
        self.clock.happened_before(&other.clock)
    }
}

impl<T: PartialEq> PartialOrd for Versioned<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.clock == other.clock {
            return (self.value == other.value).then_some(Ordering::Equal);
        }
        self.clock.partial_cmp(&other.clock)
    }
}

impl<T: fmt::Display> fmt::Display for Versioned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.value, self.clock)
    }
}

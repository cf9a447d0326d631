//! Vector clock: the causal history of a value across nodes.
//!
//! Entries live in an ordered map keyed by node id, so the clock is always
//! ascending by node and free of duplicates. `merge` and `compare` walk both
//! clocks' entries with two cursors, in the manner of a merge-sort pass.

use super::entry::ClockEntry;
use crate::error::ClockError;
use crate::types::{Counter, NodeId, MAX_VERSIONS};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Causal relationship of clock `a` relative to clock `b`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Occurred {
    Before,
    After,
    Concurrently,
}

/// Immutable vector clock. Every operation returns a new clock.
///
/// Serialized as a sequence of entries ascending by node id. Clocks over
/// [`MAX_VERSIONS`] entries (reachable only through `merge`) refuse to
/// serialize, so whatever is written can be read back.
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(try_from = "Vec<ClockEntry>")]
pub struct VectorClock {
    versions: BTreeMap<NodeId, Counter>,
}

impl VectorClock {
    /// The clock with no entries.
    pub const EMPTY: VectorClock = VectorClock { versions: BTreeMap::new() };

    pub fn empty() -> Self {
        Self::EMPTY
    }

    /// Builds a clock from entries in any order.
    pub fn from_entries<I>(entries: I) -> Result<Self, ClockError>
    where
        I: IntoIterator<Item = ClockEntry>,
    {
        let mut versions = BTreeMap::new();
        for entry in entries {
            if versions.insert(entry.node_id(), entry.version()).is_some() {
                return Err(ClockError::DuplicateNode(entry.node_id()));
            }
            if versions.len() > MAX_VERSIONS {
                return Err(ClockError::CapacityExceeded { max: MAX_VERSIONS });
            }
        }
        Ok(VectorClock { versions })
    }

    /// Records one local write by `node`.
    ///
    /// An existing entry for `node` is bumped by one; otherwise a new entry
    /// `{node, 1}` is added. Fails with [`ClockError::CapacityExceeded`] when
    /// the new entry would push the clock past [`MAX_VERSIONS`] nodes.
    pub fn incr(&self, node: NodeId) -> Result<Self, ClockError> {
        let mut versions = self.versions.clone();
        match versions.get_mut(&node) {
            Some(counter) => {
                match ClockEntry::from_stored(node, *counter).incremented() {
                    Ok(bumped) => *counter = bumped.version(),
                    Err(e) => {
                        tracing::warn!(node = %node, "vector clock counter saturated");
                        return Err(e);
                    }
                }
            }
            None => {
                if versions.len() >= MAX_VERSIONS {
                    tracing::warn!(
                        node = %node,
                        entries = versions.len(),
                        "vector clock at capacity, refusing new node"
                    );
                    return Err(ClockError::CapacityExceeded { max: MAX_VERSIONS });
                }
                let first = ClockEntry::first(node);
                versions.insert(first.node_id(), first.version());
            }
        }
        Ok(VectorClock { versions })
    }

    /// Least upper bound of the two clocks: per-node maximum counter.
    pub fn merge(&self, other: &VectorClock) -> VectorClock {
        let mut left = self.versions.iter().peekable();
        let mut right = other.versions.iter().peekable();
        let mut joined: Vec<(NodeId, Counter)> =
            Vec::with_capacity(self.versions.len().max(other.versions.len()));

        loop {
            let next = match (left.peek(), right.peek()) {
                (Some(&(&ln, &lv)), Some(&(&rn, &rv))) => match ln.cmp(&rn) {
                    Ordering::Equal => {
                        left.next();
                        right.next();
                        (ln, lv.max(rv))
                    }
                    Ordering::Less => {
                        left.next();
                        (ln, lv)
                    }
                    Ordering::Greater => {
                        right.next();
                        (rn, rv)
                    }
                },
                (Some(_), None) => {
                    joined.extend(left.by_ref().map(|(n, v)| (*n, *v)));
                    break;
                }
                (None, Some(_)) => {
                    joined.extend(right.by_ref().map(|(n, v)| (*n, *v)));
                    break;
                }
                (None, None) => break,
            };
            joined.push(next);
        }

        if joined.len() > MAX_VERSIONS {
            tracing::warn!(
                entries = joined.len(),
                max = MAX_VERSIONS,
                "merged vector clock exceeds capacity"
            );
        }
        VectorClock { versions: joined.into_iter().collect() }
    }

    /// Classifies `a` relative to `b`.
    ///
    /// A node missing from one side counts as version 0 there. Structurally
    /// equal clocks yield `Before`; use `PartialOrd` or `==` when equality
    /// must be told apart.
    pub fn compare(a: &VectorClock, b: &VectorClock) -> Occurred {
        let mut a_bigger = false;
        let mut b_bigger = false;
        let mut left = a.versions.iter().peekable();
        let mut right = b.versions.iter().peekable();

        while let (Some(&(ln, lv)), Some(&(rn, rv))) = (left.peek(), right.peek()) {
            match ln.cmp(rn) {
                Ordering::Equal => {
                    if lv > rv {
                        a_bigger = true;
                    } else if rv > lv {
                        b_bigger = true;
                    }
                    left.next();
                    right.next();
                }
                // b has a node that a lacks
                Ordering::Greater => {
                    b_bigger = true;
                    right.next();
                }
                Ordering::Less => {
                    a_bigger = true;
                    left.next();
                }
            }
            if a_bigger && b_bigger {
                break;
            }
        }

        if left.peek().is_some() {
            a_bigger = true;
        }
        if right.peek().is_some() {
            b_bigger = true;
        }

        match (a_bigger, b_bigger) {
            (true, true) => Occurred::Concurrently,
            (true, false) => Occurred::After,
            (false, _) => Occurred::Before,
        }
    }

    /// Strictly happened-before: dominated by `other` and not equal to it.
    pub fn happened_before(&self, other: &VectorClock) -> bool {
        self != other && Self::compare(self, other) == Occurred::Before
    }

    pub fn is_concurrent_with(&self, other: &VectorClock) -> bool {
        Self::compare(self, other) == Occurred::Concurrently
    }

    /// Counter recorded for `node`, 0 when absent.
    pub fn get(&self, node: NodeId) -> Counter {
        self.versions.get(&node).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Largest counter across all nodes, 0 for the empty clock.
    pub fn max_version(&self) -> Counter {
        self.versions.values().copied().max().unwrap_or(0)
    }

    /// Entries ascending by node id.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = ClockEntry> + ExactSizeIterator + '_ {
        self.versions.iter().map(|(node, version)| ClockEntry::from_stored(*node, *version))
    }
}

impl PartialOrd for VectorClock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match Self::compare(self, other) {
            Occurred::Before => Some(Ordering::Less),
            Occurred::After => Some(Ordering::Greater),
            Occurred::Concurrently => None,
        }
    }
}

impl fmt::Display for VectorClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("version(")?;
        for (i, entry) in self.entries().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", entry)?;
        }
        f.write_str(")")
    }
}

impl serde::Serialize for VectorClock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.len() > MAX_VERSIONS {
            let err = ClockError::CapacityExceeded { max: MAX_VERSIONS };
            return Err(serde::ser::Error::custom(err));
        }
        serializer.collect_seq(self.entries())
    }
}

/// Wire form: entries must be strictly ascending by node id.
impl TryFrom<Vec<ClockEntry>> for VectorClock {
    type Error = ClockError;

    fn try_from(entries: Vec<ClockEntry>) -> Result<Self, Self::Error> {
        for pair in entries.windows(2) {
            match pair[0].node_id().cmp(&pair[1].node_id()) {
                Ordering::Less => {}
                Ordering::Equal => return Err(ClockError::DuplicateNode(pair[1].node_id())),
                Ordering::Greater => return Err(ClockError::Unordered(pair[1].node_id())),
            }
        }
        VectorClock::from_entries(entries)
    }
}

impl From<VectorClock> for Vec<ClockEntry> {
    fn from(clock: VectorClock) -> Self {
        clock.entries().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nid(id: u16) -> NodeId {
        NodeId(id)
    }

    fn vc(entries: &[(u16, u64)]) -> VectorClock {
        let entries = entries.iter().map(|(n, v)| ClockEntry::new(NodeId(*n), *v).unwrap());
        VectorClock::from_entries(entries).unwrap()
    }

    #[test]
    fn test_incr_new_node_inserts_first_version() {
        let c = VectorClock::empty().incr(nid(5)).unwrap();
        assert_eq!(c.get(nid(5)), 1);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_incr_existing_node_in_place() {
        let c = vc(&[(1, 3), (4, 1)]).incr(nid(1)).unwrap();
        assert_eq!(c, vc(&[(1, 4), (4, 1)]));
    }

    #[test]
    fn test_incr_new_maximum_node_lands_at_tail() {
        let c = vc(&[(1, 1), (2, 1)]).incr(nid(9)).unwrap();
        let nodes: Vec<NodeId> = c.entries().map(|e| e.node_id()).collect();
        assert_eq!(nodes, vec![nid(1), nid(2), nid(9)]);
    }

    #[test]
    fn test_incr_is_pure() {
        let base = vc(&[(1, 1)]);
        let _ = base.incr(nid(1)).unwrap();
        assert_eq!(base, vc(&[(1, 1)]));
    }

    #[test]
    fn test_incr_refuses_saturated_counter() {
        let c = vc(&[(2, u64::MAX)]);
        assert_eq!(c.incr(nid(2)), Err(ClockError::CounterOverflow(nid(2))));
    }

    #[test]
    fn test_merge_basic() {
        let a = vc(&[(1, 2), (3, 1)]);
        let b = vc(&[(2, 1), (3, 3)]);
        assert_eq!(a.merge(&b), vc(&[(1, 2), (2, 1), (3, 3)]));
    }

    #[test]
    fn test_merge_with_empty_either_side() {
        let a = vc(&[(1, 5), (2, 3)]);
        assert_eq!(a.merge(&VectorClock::EMPTY), a);
        assert_eq!(VectorClock::EMPTY.merge(&a), a);
    }

    #[test]
    fn test_compare_equal_clocks_tie_break_before() {
        let a = vc(&[(1, 1), (2, 1)]);
        assert_eq!(VectorClock::compare(&a, &a.clone()), Occurred::Before);
        let empty = VectorClock::EMPTY;
        assert_eq!(VectorClock::compare(&empty, &empty), Occurred::Before);
    }

    #[test]
    fn test_compare_before_after() {
        let a = vc(&[(1, 1), (2, 1)]);
        let b = vc(&[(1, 1), (2, 2)]);
        assert_eq!(VectorClock::compare(&a, &b), Occurred::Before);
        assert_eq!(VectorClock::compare(&b, &a), Occurred::After);
    }

    #[test]
    fn test_compare_missing_entries() {
        let short = vc(&[(1, 1)]);
        let long = vc(&[(1, 1), (2, 1)]);
        assert_eq!(VectorClock::compare(&short, &long), Occurred::Before);
        assert_eq!(VectorClock::compare(&long, &short), Occurred::After);

        let ahead = vc(&[(1, 2)]);
        assert_eq!(VectorClock::compare(&ahead, &long), Occurred::Concurrently);
        assert_eq!(VectorClock::compare(&long, &ahead), Occurred::Concurrently);
    }

    #[test]
    fn test_compare_leading_gap_on_left() {
        // a lacks node 1 which b has, but a is ahead on node 2.
        let a = vc(&[(2, 2)]);
        let b = vc(&[(1, 1), (2, 1)]);
        assert_eq!(VectorClock::compare(&a, &b), Occurred::Concurrently);
    }

    #[test]
    fn test_partial_cmp_distinguishes_equal() {
        let a = vc(&[(1, 1)]);
        let b = vc(&[(1, 2)]);
        let c = vc(&[(2, 1)]);
        assert_eq!(a.partial_cmp(&a.clone()), Some(Ordering::Equal));
        assert!(a < b);
        assert!(b > a);
        assert_eq!(a.partial_cmp(&c), None);
    }

    #[test]
    fn test_happened_before_is_strict() {
        let a = vc(&[(1, 1)]);
        assert!(!a.happened_before(&a));
        assert!(a.happened_before(&a.incr(nid(1)).unwrap()));
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let e = ClockEntry::first(nid(1));
        assert_eq!(VectorClock::from_entries([e, e]), Err(ClockError::DuplicateNode(nid(1))));
    }

    #[test]
    fn test_try_from_vec_requires_ascending() {
        let entries = vec![ClockEntry::first(nid(2)), ClockEntry::first(nid(1))];
        assert_eq!(VectorClock::try_from(entries), Err(ClockError::Unordered(nid(1))));
    }

    #[test]
    fn test_display() {
        assert_eq!(VectorClock::EMPTY.to_string(), "version()");
        assert_eq!(vc(&[(2, 1), (1, 2)]).to_string(), "version(1:2, 2:1)");
    }

    #[test]
    fn test_queries() {
        let c = vc(&[(1, 4), (7, 9)]);
        assert_eq!(c.get(nid(7)), 9);
        assert_eq!(c.get(nid(3)), 0);
        assert_eq!(c.max_version(), 9);
        assert_eq!(VectorClock::EMPTY.max_version(), 0);
        assert!(!c.is_empty());
    }
}

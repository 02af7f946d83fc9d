//! Version vectors - the instants of the logical clock family

use std::collections::HashMap;
use std::fmt;

use crate::{ClockOrdering, ReplicaId};

/// Version vector for causal ordering (not total ordering)
///
/// Zero entries are never stored, so two vectors describing the same causal
/// history are always `==`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct VersionVector {
    clocks: HashMap<ReplicaId, u64>,
}

impl VersionVector {
    pub fn new() -> Self {
        VersionVector {
            clocks: HashMap::new(),
        }
    }

    /// Get the clock value for a replica
    #[inline]
    pub fn get(&self, replica: ReplicaId) -> u64 {
        self.clocks.get(&replica).copied().unwrap_or(0)
    }

    /// Increment the clock for a replica
    pub fn increment(&mut self, replica: ReplicaId) {
        *self.clocks.entry(replica).or_insert(0) += 1;
    }

    /// Set the clock for a replica
    pub fn set(&mut self, replica: ReplicaId, value: u64) {
        if value == 0 {
            self.clocks.remove(&replica);
        } else {
            self.clocks.insert(replica, value);
        }
    }

    /// Check if self happens-before other
    pub fn happens_before(&self, other: &VersionVector) -> bool {
        if self == other {
            return false;
        }

        // self ≤ other for all replicas, and strictly < for at least one
        let mut strictly_less = false;

        for (replica, &clock) in &self.clocks {
            let other_clock = other.get(*replica);
            if clock > other_clock {
                return false;
            }
            if clock < other_clock {
                strictly_less = true;
            }
        }

        // Replicas in other but not in self
        for (replica, &clock) in &other.clocks {
            if !self.clocks.contains_key(replica) && clock > 0 {
                strictly_less = true;
            }
        }

        strictly_less
    }

    /// Check if two version vectors are concurrent (neither happens-before)
    pub fn concurrent(&self, other: &VersionVector) -> bool {
        !self.happens_before(other) && !other.happens_before(self) && self != other
    }

    /// Causal comparison; `Concurrent` when neither vector dominates
    pub fn compare(&self, other: &VersionVector) -> ClockOrdering {
        if self == other {
            ClockOrdering::Equal
        } else if self.happens_before(other) {
            ClockOrdering::Before
        } else if other.happens_before(self) {
            ClockOrdering::After
        } else {
            ClockOrdering::Concurrent
        }
    }

    /// Merge two version vectors (element-wise max)
    pub fn merge(&self, other: &VersionVector) -> VersionVector {
        let mut merged = self.clocks.clone();

        for (replica, &clock) in &other.clocks {
            merged
                .entry(*replica)
                .and_modify(|c| *c = (*c).max(clock))
                .or_insert(clock);
        }

        VersionVector { clocks: merged }
    }

    /// Total number of events recorded across all replicas
    pub fn total_events(&self) -> u64 {
        self.clocks.values().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    pub fn is_empty(&self) -> bool {
        self.clocks.is_empty()
    }

    /// Compact representation, sorted by replica
    pub fn to_compact(&self) -> Vec<(ReplicaId, u64)> {
        let mut entries: Vec<_> = self.clocks.iter().map(|(&r, &c)| (r, c)).collect();
        entries.sort_unstable_by_key(|(r, _)| *r);
        entries
    }

    /// Restore from compact representation
    pub fn from_compact(entries: Vec<(ReplicaId, u64)>) -> Self {
        VersionVector {
            clocks: entries.into_iter().filter(|(_, c)| *c > 0).collect(),
        }
    }
}

impl fmt::Debug for VersionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("⟨")?;
        for (i, (replica, clock)) in self.to_compact().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}:{}", replica, clock)?;
        }
        f.write_str("⟩")
    }
}

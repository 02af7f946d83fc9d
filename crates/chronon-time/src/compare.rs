//! Instant comparison across the two operands of a relation

use chronon_core::{ChrononError, ChrononResult, ClockFamily, ClockOrdering, Instant};

use crate::{ClockAdapter, ClockSource};

/// Comparison context for one relation query
///
/// `left` is the querying object's clock, `right` the other operand's. Same
/// family instants are compared by the clock of that family; cross-family
/// instants only through the adapter.
#[derive(Clone, Copy)]
pub struct Comparator<'a> {
    left: &'a dyn ClockSource,
    right: &'a dyn ClockSource,
    adapter: Option<&'a dyn ClockAdapter>,
}

impl<'a> Comparator<'a> {
    /// Build a comparator, failing fast when the clocks cannot be reconciled
    pub fn new(
        left: &'a dyn ClockSource,
        right: &'a dyn ClockSource,
        adapter: Option<&'a dyn ClockAdapter>,
    ) -> ChrononResult<Self> {
        if !left.is_compatible(right) && adapter.is_none() {
            return Err(ChrononError::IncompatibleClocks {
                left: left.family(),
                right: right.family(),
            });
        }
        Ok(Comparator {
            left,
            right,
            adapter,
        })
    }

    /// Comparator for instants of a single clock
    pub fn single(clock: &'a dyn ClockSource) -> Self {
        Comparator {
            left: clock,
            right: clock,
            adapter: None,
        }
    }

    pub fn families(&self) -> (ClockFamily, ClockFamily) {
        (self.left.family(), self.right.family())
    }

    pub fn has_adapter(&self) -> bool {
        self.adapter.is_some()
    }

    /// Compare two instants
    pub fn compare(&self, a: &Instant, b: &Instant) -> ChrononResult<ClockOrdering> {
        if a.family() != b.family() {
            return self.compare_projected(a, b);
        }

        let family = a.family();
        let ordering = if self.left.family() == family {
            self.left.compare(a, b)?
        } else if self.right.family() == family {
            self.right.compare(a, b)?
        } else {
            return self.compare_projected(a, b);
        };

        if family == ClockFamily::Metric && ordering.is_concurrent() {
            // Metric clocks promise a total order
            tracing::warn!(left = ?a, right = ?b, "metric clock reported concurrent instants");
            return Err(ChrononError::ClockFault(format!(
                "metric clock reported {:?} and {:?} as concurrent",
                a, b
            )));
        }
        Ok(ordering)
    }

    fn compare_projected(&self, a: &Instant, b: &Instant) -> ChrononResult<ClockOrdering> {
        let incompatible = ChrononError::IncompatibleClocks {
            left: a.family(),
            right: b.family(),
        };
        let Some(adapter) = self.adapter else {
            return Err(incompatible);
        };
        match (adapter.project(a), adapter.project(b)) {
            (Some(pa), Some(pb)) => Ok(pa.cmp(&pb).into()),
            _ => Err(incompatible),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LinearProjection, LogicalClock, SteppedClock};
    use chronon_core::{ReplicaId, WallTime};
    use proptest::prelude::*;
    use std::time::Duration;

    #[derive(Debug)]
    struct BrokenMetricClock;

    impl ClockSource for BrokenMetricClock {
        fn family(&self) -> ClockFamily {
            ClockFamily::Metric
        }

        fn now(&self) -> Instant {
            Instant::Metric(WallTime::EPOCH)
        }

        fn compare(&self, _a: &Instant, _b: &Instant) -> ChrononResult<ClockOrdering> {
            Ok(ClockOrdering::Concurrent)
        }
    }

    #[test]
    fn test_cross_family_without_adapter_fails() {
        let logical = LogicalClock::new(ReplicaId(1));
        let wall = SteppedClock::new(WallTime::EPOCH);

        let result = Comparator::new(&logical, &wall, None);
        assert!(matches!(
            result,
            Err(ChrononError::IncompatibleClocks {
                left: ClockFamily::Logical,
                right: ClockFamily::Metric,
            })
        ));
    }

    #[test]
    fn test_cross_family_with_adapter() {
        let logical = LogicalClock::new(ReplicaId(1));
        let wall = SteppedClock::new(WallTime::from_millis(5));
        let projection = LinearProjection::new(WallTime::EPOCH, Duration::from_millis(1));

        let cmp = Comparator::new(&logical, &wall, Some(&projection)).unwrap();

        // 2 events -> 2ms, before 5ms
        logical.now();
        let t_logical = logical.now();
        let t_wall = wall.now();

        assert_eq!(cmp.compare(&t_logical, &t_wall).unwrap(), ClockOrdering::Before);
        assert_eq!(cmp.compare(&t_wall, &t_logical).unwrap(), ClockOrdering::After);
    }

    #[test]
    fn test_same_family_ignores_adapter() {
        let a = LogicalClock::new(ReplicaId(1));
        let b = LogicalClock::new(ReplicaId(2));
        let projection = LinearProjection::default();

        let cmp = Comparator::new(&a, &b, Some(&projection)).unwrap();

        // Same projected value, but causally concurrent
        assert_eq!(cmp.compare(&a.now(), &b.now()).unwrap(), ClockOrdering::Concurrent);
    }

    #[test]
    fn test_metric_concurrent_is_clock_fault() {
        let clock = BrokenMetricClock;
        let cmp = Comparator::single(&clock);

        let result = cmp.compare(&clock.now(), &clock.now());
        assert!(matches!(result, Err(ChrononError::ClockFault(_))));
    }

    proptest! {
        #[test]
        fn prop_metric_comparison_is_antisymmetric(a in any::<i64>(), b in any::<i64>()) {
            let clock = SteppedClock::new(WallTime::EPOCH);
            let cmp = Comparator::single(&clock);
            let ta = Instant::Metric(WallTime(a));
            let tb = Instant::Metric(WallTime(b));

            let forward = cmp.compare(&ta, &tb).unwrap();
            let backward = cmp.compare(&tb, &ta).unwrap();
            prop_assert_eq!(forward, backward.reverse());
            prop_assert!(!forward.is_concurrent());
        }
    }
}

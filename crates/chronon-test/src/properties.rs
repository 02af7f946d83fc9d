//! Property tests of the pure relation engine

use proptest::prelude::*;

use chronon_core::{Extent, Instant, ReplicaId, WallTime};
use chronon_relation::{AllenRelation, Operands, PointRelation, Relation, RelationEngine, RelationOutcome};
use chronon_time::{ClockSource, Comparator, LogicalClock, SteppedClock};

use crate::fixtures::{extent_ms, ms};

fn proper_extent() -> impl Strategy<Value = Extent> {
    (0i64..200, 1i64..60).prop_map(|(start, len)| extent_ms(start, start + len))
}

fn open_extent() -> impl Strategy<Value = Extent> {
    (0i64..200).prop_map(|start| Extent::ongoing(ms(start)))
}

fn eval(relation: Relation, a: &Extent, b: &Extent) -> RelationOutcome {
    let clock = SteppedClock::new(WallTime::EPOCH);
    let ops = Operands::new(a, b, Comparator::single(&clock));
    RelationEngine::evaluate(relation, &ops).unwrap()
}

fn holding(a: &Extent, b: &Extent) -> Vec<AllenRelation> {
    let clock = SteppedClock::new(WallTime::EPOCH);
    let ops = Operands::new(a, b, Comparator::single(&clock));
    RelationEngine::holding(&ops).unwrap()
}

proptest! {
    #[test]
    fn prop_exactly_one_base_relation(a in proper_extent(), b in proper_extent()) {
        let clock = SteppedClock::new(WallTime::EPOCH);
        let ops = Operands::new(&a, &b, Comparator::single(&clock));

        let holding = RelationEngine::holding(&ops).unwrap();
        prop_assert_eq!(holding.len(), 1, "{:?} vs {:?}: {:?}", a, b, holding);
        prop_assert_eq!(RelationEngine::classify(&ops).unwrap(), Some(holding[0]));
    }

    #[test]
    fn prop_exactly_one_with_one_open_end(a in open_extent(), b in proper_extent()) {
        prop_assert_eq!(holding(&a, &b).len(), 1);
        prop_assert_eq!(holding(&b, &a).len(), 1);
    }

    #[test]
    fn prop_exactly_one_with_two_open_ends(start in 0i64..200, gap in 1i64..60) {
        let a = Extent::ongoing(ms(start));
        let b = Extent::ongoing(ms(start + gap));

        prop_assert_eq!(holding(&a, &b), vec![AllenRelation::Overlaps]);
        prop_assert_eq!(holding(&b, &a), vec![AllenRelation::OverlappedBy]);
        for base in AllenRelation::ALL {
            prop_assert!(eval(base.relation(), &a, &b).is_definite(), "{}", base);
        }
    }

    #[test]
    fn prop_converses(a in proper_extent(), b in proper_extent()) {
        for relation in Relation::ALL {
            if let Some(converse) = relation.converse() {
                prop_assert_eq!(
                    eval(relation, &a, &b),
                    eval(converse, &b, &a),
                    "{} / {}", relation, converse
                );
            }
        }
    }

    #[test]
    fn prop_disjunct_is_not_contemporary(a in proper_extent(), b in proper_extent()) {
        prop_assert_eq!(
            eval(Relation::Disjunct, &a, &b),
            !eval(Relation::ContemporaryOf, &a, &b)
        );
    }

    #[test]
    fn prop_lte_is_before_meets_or_equals(a in proper_extent(), b in proper_extent()) {
        let expected = eval(Relation::Before, &a, &b)
            | eval(Relation::Meets, &a, &b)
            | eval(Relation::Equals, &a, &b);
        prop_assert_eq!(eval(Relation::Lte, &a, &b), expected);
    }

    #[test]
    fn prop_equals_is_an_equivalence(
        a in proper_extent(),
        b in proper_extent(),
        c in proper_extent(),
    ) {
        prop_assert!(eval(Relation::Equals, &a, &a).is_true());
        prop_assert_eq!(eval(Relation::Equals, &a, &b), eval(Relation::Equals, &b, &a));
        if eval(Relation::Equals, &a, &b).is_true() && eval(Relation::Equals, &b, &c).is_true() {
            prop_assert!(eval(Relation::Equals, &a, &c).is_true());
        }
    }

    #[test]
    fn prop_age_relations(a in proper_extent(), b in proper_extent()) {
        let older = eval(Relation::Older, &a, &b);
        let strictly = eval(Relation::IsOlderThan, &a, &b);
        let head = eval(Relation::IsHeadToHeadWith, &a, &b);
        prop_assert_eq!(older, strictly | head);
        prop_assert_eq!(eval(Relation::Younger, &a, &b), !strictly);
    }

    #[test]
    fn prop_point_containment_nests(extent in proper_extent(), t in -10i64..270) {
        let clock = SteppedClock::new(WallTime::EPOCH);
        let cmp = Comparator::single(&clock);
        let point = |relation| RelationEngine::evaluate_point(relation, &extent, &ms(t), &cmp).unwrap();

        let strict = point(PointRelation::ContainsDateStrict);
        let within = point(PointRelation::Within);
        let closed = point(PointRelation::ContainsDate);
        if strict.is_true() {
            prop_assert!(within.is_true());
        }
        if within.is_true() {
            prop_assert!(closed.is_true());
        }
    }

    #[test]
    fn prop_single_replica_is_totally_ordered(ticks in prop::collection::vec(1usize..4, 4)) {
        // Four increasing readings of one replica: a vector clock with no
        // concurrency behaves like a metric one
        let clock = LogicalClock::new(ReplicaId(1));
        let mut readings: Vec<Instant> = Vec::new();
        for skip in ticks {
            let mut reading = clock.now();
            for _ in 1..skip {
                reading = clock.now();
            }
            readings.push(reading);
        }

        let a = Extent::closed(readings[0].clone(), readings[2].clone());
        let b = Extent::closed(readings[1].clone(), readings[3].clone());
        let ops = Operands::new(&a, &b, Comparator::single(&clock));

        prop_assert_eq!(RelationEngine::holding(&ops).unwrap(), vec![AllenRelation::Overlaps]);
    }
}

#[test]
fn concurrent_replicas_are_indeterminate() {
    let left = LogicalClock::new(ReplicaId(1));
    let right = LogicalClock::new(ReplicaId(2));
    let a = Extent::closed(left.now(), left.now());
    let b = Extent::closed(right.now(), right.now());

    let cmp = Comparator::new(&left, &right, None).unwrap();
    let ops = Operands::new(&a, &b, cmp);

    for base in AllenRelation::ALL {
        let outcome = RelationEngine::evaluate(base.relation(), &ops).unwrap();
        assert!(!outcome.is_true(), "{base}");
    }
    assert_eq!(
        RelationEngine::evaluate(Relation::Before, &ops).unwrap(),
        RelationOutcome::Indeterminate
    );
    assert_eq!(RelationEngine::classify(&ops).unwrap(), None);
}

//! Relation engine - evaluates named relations over two extents
//!
//! Every relation is a Kleene combination of at most four bound comparisons:
//!
//! | name | compares |
//! |------|----------|
//! | `ss` | a.start vs b.start |
//! | `se` | a.start vs b.end |
//! | `es` | a.end vs b.start |
//! | `ee` | a.end vs b.end |
//!
//! An `Unbounded` end is after every bounded instant. Two open ends are
//! equal only when both operands are the same object. Open ends of distinct
//! objects follow their starts: the one begun later is the later end. A
//! start tie or causally concurrent starts leave the ends concurrent.

use chronon_core::{Bound, ChrononResult, ClockOrdering, Extent, Instant};
use chronon_time::Comparator;

use crate::outcome::{eq, le, lt};
use crate::{AllenRelation, PointRelation, Relation, RelationOutcome};

/// Two extents and the context to compare their bounds
pub struct Operands<'a> {
    pub a: &'a Extent,
    pub b: &'a Extent,
    cmp: Comparator<'a>,
    same_object: bool,
}

impl<'a> Operands<'a> {
    pub fn new(a: &'a Extent, b: &'a Extent, cmp: Comparator<'a>) -> Self {
        Operands {
            a,
            b,
            cmp,
            same_object: false,
        }
    }

    /// Mark both extents as belonging to one object (open ends coincide)
    pub fn identical(mut self) -> Self {
        self.same_object = true;
        self
    }

    fn ss(&self) -> ChrononResult<ClockOrdering> {
        self.cmp.compare(&self.a.start, &self.b.start)
    }

    fn se(&self) -> ChrononResult<ClockOrdering> {
        instant_vs_bound(&self.cmp, &self.a.start, &self.b.end)
    }

    fn es(&self) -> ChrononResult<ClockOrdering> {
        Ok(instant_vs_bound(&self.cmp, &self.b.start, &self.a.end)?.reverse())
    }

    fn ee(&self) -> ChrononResult<ClockOrdering> {
        match (&self.a.end, &self.b.end) {
            (Bound::At(x), Bound::At(y)) => self.cmp.compare(x, y),
            (Bound::At(_), Bound::Unbounded) => Ok(ClockOrdering::Before),
            (Bound::Unbounded, Bound::At(_)) => Ok(ClockOrdering::After),
            (Bound::Unbounded, Bound::Unbounded) if self.same_object => Ok(ClockOrdering::Equal),
            (Bound::Unbounded, Bound::Unbounded) => match self.ss()? {
                ordering @ (ClockOrdering::Before | ClockOrdering::After) => Ok(ordering),
                ClockOrdering::Equal | ClockOrdering::Concurrent => Ok(ClockOrdering::Concurrent),
            },
        }
    }
}

fn instant_vs_bound(cmp: &Comparator<'_>, t: &Instant, bound: &Bound) -> ChrononResult<ClockOrdering> {
    match bound {
        Bound::At(end) => cmp.compare(t, end),
        Bound::Unbounded => Ok(ClockOrdering::Before),
    }
}

/// x > y
#[inline]
fn gt(ordering: ClockOrdering) -> RelationOutcome {
    lt(ordering.reverse())
}

/// x >= y
#[inline]
fn ge(ordering: ClockOrdering) -> RelationOutcome {
    le(ordering.reverse())
}

/// Stateless evaluator of the relation catalogue
#[derive(Clone, Copy, Debug, Default)]
pub struct RelationEngine;

impl RelationEngine {
    /// Evaluate `a relation b`
    pub fn evaluate(relation: Relation, ops: &Operands<'_>) -> ChrononResult<RelationOutcome> {
        let outcome = Self::evaluate_inner(relation, ops)?;
        tracing::trace!(relation = relation.name(), %outcome, "relation evaluated");
        Ok(outcome)
    }

    fn evaluate_inner(relation: Relation, ops: &Operands<'_>) -> ChrononResult<RelationOutcome> {
        use Relation::*;

        let outcome = match relation {
            Equals => eq(ops.ss()?) & eq(ops.ee()?),
            Before => lt(ops.es()?),
            After => gt(ops.se()?),
            Meets => eq(ops.es()?),
            MetBy => eq(ops.se()?),
            Overlaps => lt(ops.ss()?) & gt(ops.es()?) & lt(ops.ee()?),
            OverlappedBy => gt(ops.ss()?) & lt(ops.se()?) & gt(ops.ee()?),
            Starts => eq(ops.ss()?) & lt(ops.ee()?),
            StartedBy => eq(ops.ss()?) & gt(ops.ee()?),
            Finishes => eq(ops.ee()?) & gt(ops.ss()?),
            FinishedBy => eq(ops.ee()?) & lt(ops.ss()?),
            During => gt(ops.ss()?) & lt(ops.ee()?),
            Contains => lt(ops.ss()?) & gt(ops.ee()?),

            OverlapsStart => lt(ops.ss()?) & gt(ops.es()?),
            OverlapsEnd => lt(ops.se()?) & gt(ops.ee()?),
            IsHeadToHeadWith => eq(ops.ss()?),
            IsTailToTailWith => eq(ops.ee()?),

            Disjunct => Self::disjunct(ops)?,
            ContemporaryOf => !Self::disjunct(ops)?,
            Lte => {
                Self::evaluate_inner(Before, ops)?
                    | Self::evaluate_inner(Meets, ops)?
                    | Self::evaluate_inner(Equals, ops)?
            }

            Older => le(ops.ss()?),
            IsOlderThan => lt(ops.ss()?),
            Younger => ge(ops.ss()?),
            IsYoungerThan => gt(ops.ss()?),

            // The later-forged object is the survivor
            Survives => gt(ops.ss()?),
            IsSurvivedBy => lt(ops.ss()?),

            YoungerContemporaryOf => !Self::disjunct(ops)? & gt(ops.ss()?),
            SurvivingContemporaryOf => !Self::disjunct(ops)? & gt(ops.ss()?),
            SurvivedByContemporaryOf => !Self::disjunct(ops)? & lt(ops.ss()?),

            IsForgedBeforeTerminationOf => lt(ops.se()?),
            TerminatedAfterBirthOf => gt(ops.es()?),

            Nothing => RelationOutcome::Nothing,
        };
        Ok(outcome)
    }

    fn disjunct(ops: &Operands<'_>) -> ChrononResult<RelationOutcome> {
        Ok(lt(ops.es()?) | gt(ops.se()?))
    }

    /// Evaluate `extent relation t` for a bare instant
    pub fn evaluate_point(
        relation: PointRelation,
        extent: &Extent,
        t: &Instant,
        cmp: &Comparator<'_>,
    ) -> ChrononResult<RelationOutcome> {
        let start = cmp.compare(&extent.start, t)?;
        let end = instant_vs_bound(cmp, t, &extent.end)?;

        let outcome = match relation {
            PointRelation::ContainsDate => le(start) & le(end),
            PointRelation::ContainsDateStrict => lt(start) & lt(end),
            PointRelation::Within => le(start) & lt(end),
        };
        tracing::trace!(relation = relation.name(), %outcome, "point relation evaluated");
        Ok(outcome)
    }

    /// The single Allen base relation holding between the operands
    ///
    /// `None` when a causal tie leaves more than one candidate, or when a
    /// degenerate (zero-length) extent satisfies several base relations.
    pub fn classify(ops: &Operands<'_>) -> ChrononResult<Option<AllenRelation>> {
        let mut holding = None;
        for base in AllenRelation::ALL {
            match Self::evaluate_inner(base.relation(), ops)? {
                RelationOutcome::True if holding.is_none() => holding = Some(base),
                RelationOutcome::True | RelationOutcome::Indeterminate => return Ok(None),
                RelationOutcome::False | RelationOutcome::Nothing => {}
            }
        }
        Ok(holding)
    }

    /// All base relations evaluating to `True`
    pub fn holding(ops: &Operands<'_>) -> ChrononResult<Vec<AllenRelation>> {
        let mut holding = Vec::new();
        for base in AllenRelation::ALL {
            if Self::evaluate_inner(base.relation(), ops)?.is_true() {
                holding.push(base);
            }
        }
        Ok(holding)
    }
}

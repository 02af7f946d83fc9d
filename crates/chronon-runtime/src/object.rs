//! Temporal objects - the asynchronous relation API
//!
//! A `TemporalObject` is a cheap handle on a shared interior. Queries take a
//! snapshot of each operand in turn, so no two object locks are ever held at
//! once. The only query that writes is `finishes`, and it writes the target
//! inside the target's own lock.

use std::sync::Arc;

use chronon_core::{
    Bound, ChrononError, ChrononResult, ClockOrdering, Extent, Instant, LifecycleState, ObjectId,
};
use chronon_relation::{Operands, PointRelation, Relation, RelationEngine, RelationOutcome};
use chronon_time::{align, ClockAdapter, ClockSource, Comparator};

use crate::space::{adopt, SpaceShared};
use crate::{LifecycleController, QueryResult, Rejection, Resolution, Snapshot, TemporalObjectRef};

struct ObjectInner {
    lifecycle: LifecycleController,
    space: Arc<SpaceShared>,
}

/// A value with a lifetime on some clock
#[derive(Clone)]
pub struct TemporalObject {
    inner: Arc<ObjectInner>,
}

impl TemporalObject {
    pub(crate) fn from_parts(lifecycle: LifecycleController, space: Arc<SpaceShared>) -> Self {
        TemporalObject {
            inner: Arc::new(ObjectInner { lifecycle, space }),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.inner.lifecycle.id()
    }

    /// Current lifecycle state; always permitted, never blocks on a query
    pub fn state(&self) -> LifecycleState {
        self.inner.lifecycle.state()
    }

    pub fn reference(&self) -> TemporalObjectRef {
        TemporalObjectRef::new(self.id(), self.state())
    }

    /// Extent, present once forged
    pub fn extent(&self) -> Option<Extent> {
        self.inner.lifecycle.snapshot().extent
    }

    /// Clock the object was (or will be) forged from
    pub fn clock(&self) -> Option<Arc<dyn ClockSource>> {
        self.inner.lifecycle.snapshot().clock
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lifecycle.snapshot()
    }

    /// Whether both handles refer to the same object
    pub fn same_as(&self, other: &TemporalObject) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn adapter(&self) -> Option<&dyn ClockAdapter> {
        self.inner.space.adapter.as_deref()
    }

    /// Attribute `error` to the object that caused it
    fn reject(&self, other: Option<&TemporalObject>, error: ChrononError) -> Rejection {
        let offender = match (&error, other) {
            (ChrononError::IncompatibleClocks { .. }, Some(other)) => other,
            (_, Some(other)) if error.object() == Some(other.id()) => other,
            _ => self,
        };
        Rejection::new(offender.reference(), error)
    }

    // ---- lifecycle ----

    /// Forge from the configured clock
    ///
    /// Resolves `True` when this call forged the object, `False` when it was
    /// already forged.
    pub async fn forge(&self) -> QueryResult {
        let forged = self.inner.lifecycle.forge(None).map_err(|e| self.reject(None, e))?;
        Ok(self.transition(forged))
    }

    /// Forge from `clock`, replacing the configured one
    pub async fn forge_with(&self, clock: Arc<dyn ClockSource>) -> QueryResult {
        let forged = self
            .inner
            .lifecycle
            .forge(Some(clock))
            .map_err(|e| self.reject(None, e))?;
        Ok(self.transition(forged))
    }

    /// Finish at the object's clock's current instant
    ///
    /// Resolves `False` when the object was already finished.
    pub async fn finish(&self) -> QueryResult {
        let finished = self.inner.lifecycle.finish(None).map_err(|e| self.reject(None, e))?;
        Ok(self.transition(finished))
    }

    /// Finish at `end`; instants of another family go through the space's adapter
    pub async fn finish_at(&self, end: Instant) -> QueryResult {
        let end = match self.extent() {
            Some(extent) => align(self.adapter(), end, extent.family()).map_err(|e| self.reject(None, e))?,
            None => end,
        };
        let finished = self
            .inner
            .lifecycle
            .finish(Some(end))
            .map_err(|e| self.reject(None, e))?;
        Ok(self.transition(finished))
    }

    fn transition(&self, changed: bool) -> Resolution {
        Resolution::new(self.reference(), RelationOutcome::from_bool(changed))
    }

    // ---- relations ----

    /// Evaluate `self relation other`
    pub async fn evaluate(&self, relation: Relation, other: &TemporalObject) -> QueryResult {
        let outcome = self
            .evaluate_now(relation, other)
            .map_err(|e| self.reject(Some(other), e))?;
        Ok(Resolution::new(self.reference(), outcome))
    }

    fn evaluate_now(&self, relation: Relation, other: &TemporalObject) -> ChrononResult<RelationOutcome> {
        let mine = self.snapshot();
        let theirs = other.snapshot();
        let (a, left) = mine.forged()?;
        let (b, right) = theirs.forged()?;

        let cmp = Comparator::new(left.as_ref(), right.as_ref(), self.adapter())?;
        let mut ops = Operands::new(a, b, cmp);
        if self.same_as(other) {
            ops = ops.identical();
        }
        RelationEngine::evaluate(relation, &ops)
    }

    /// Evaluate `self relation t` for an instant produced by `clock`
    pub async fn evaluate_point(
        &self,
        relation: PointRelation,
        t: &Instant,
        clock: &dyn ClockSource,
    ) -> QueryResult {
        let outcome = self
            .evaluate_point_now(relation, t, clock)
            .map_err(|e| self.reject(None, e))?;
        Ok(Resolution::new(self.reference(), outcome))
    }

    fn evaluate_point_now(
        &self,
        relation: PointRelation,
        t: &Instant,
        clock: &dyn ClockSource,
    ) -> ChrononResult<RelationOutcome> {
        let snapshot = self.snapshot();
        let (extent, own) = snapshot.forged()?;
        let cmp = Comparator::new(own.as_ref(), clock, self.adapter())?;
        RelationEngine::evaluate_point(relation, extent, t, &cmp)
    }

    /// Finish `target` at this object's current instant
    ///
    /// The current instant is this object's end when it is finished, else its
    /// clock's now. Resolves `True` when the target was closed by this call
    /// and `False` when it was already finished or is `self`. The extent-only predicate is
    /// `evaluate(Relation::Finishes, ..)`.
    pub async fn finishes(&self, target: &TemporalObject) -> QueryResult {
        let committed = self
            .finish_target(target)
            .map_err(|e| self.reject(Some(target), e))?;
        Ok(Resolution::new(self.reference(), RelationOutcome::from_bool(committed)))
    }

    fn finish_target(&self, target: &TemporalObject) -> ChrononResult<bool> {
        let mine = self.snapshot();
        let theirs = target.snapshot();
        let (extent, clock) = mine.forged()?;
        let (target_extent, target_clock) = theirs.forged()?;
        Comparator::new(clock.as_ref(), target_clock.as_ref(), self.adapter())?;

        // Never closes the querying object itself
        if self.same_as(target) || target_extent.is_finished() {
            return Ok(false);
        }

        let now = match &extent.end {
            Bound::At(end) => end.clone(),
            Bound::Unbounded => clock.now(),
        };
        let end = align(self.adapter(), now, target_extent.family())?;
        let committed = target.inner.lifecycle.finish_if_open(end)?;

        if committed {
            tracing::debug!(object = %self.id(), target = %target.id(), "finishes closed target");
        }
        Ok(committed)
    }

    /// Divide the extent at `at`, strictly inside it
    ///
    /// Returns two new objects of the same space: the finished head ending at
    /// `at` and the tail starting there, finished only if `self` is.
    pub async fn split(&self, at: Instant) -> Result<(TemporalObject, TemporalObject), Rejection> {
        self.split_now(at).map_err(|e| self.reject(None, e))
    }

    fn split_now(&self, at: Instant) -> ChrononResult<(TemporalObject, TemporalObject)> {
        let snapshot = self.snapshot();
        let (extent, clock) = snapshot.forged()?;
        let at = align(self.adapter(), at, extent.family())?;

        let cmp = Comparator::single(clock.as_ref());
        let after_start = cmp.compare(&extent.start, &at)? == ClockOrdering::Before;
        let before_end = match &extent.end {
            Bound::At(end) => cmp.compare(&at, end)? == ClockOrdering::Before,
            Bound::Unbounded => true,
        };
        if !(after_start && before_end) {
            return Err(ChrononError::InvalidOrdering(self.id()));
        }

        let space = &self.inner.space;
        let head = adopt(space, clock.clone(), Extent::closed(extent.start.clone(), at.clone()));
        let tail = adopt(
            space,
            clock.clone(),
            Extent {
                start: at,
                end: extent.end.clone(),
            },
        );

        tracing::debug!(object = %self.id(), head = %head.id(), tail = %tail.id(), "split");
        Ok((head, tail))
    }

    // ---- point containment ----

    /// start <= t < end
    pub async fn within(&self, t: &Instant, clock: &dyn ClockSource) -> QueryResult {
        self.evaluate_point(PointRelation::Within, t, clock).await
    }

    /// start <= t <= end
    pub async fn contains_date(&self, t: &Instant, clock: &dyn ClockSource) -> QueryResult {
        self.evaluate_point(PointRelation::ContainsDate, t, clock).await
    }

    /// start < t < end
    pub async fn contains_date_strict(&self, t: &Instant, clock: &dyn ClockSource) -> QueryResult {
        self.evaluate_point(PointRelation::ContainsDateStrict, t, clock).await
    }
}

macro_rules! relation_methods {
    ($($(#[$attr:meta])* $method:ident => $relation:ident,)*) => {
        impl TemporalObject {
            $(
                $(#[$attr])*
                pub async fn $method(&self, other: &TemporalObject) -> QueryResult {
                    self.evaluate(Relation::$relation, other).await
                }
            )*
        }
    };
}

relation_methods! {
    equals => Equals,
    before => Before,
    after => After,
    meets => Meets,
    met_by => MetBy,
    overlaps => Overlaps,
    overlapped_by => OverlappedBy,
    starts => Starts,
    started_by => StartedBy,
    finished_by => FinishedBy,
    during => During,
    contains => Contains,

    /// Starts before `other` and ends inside it
    overlaps_start => OverlapsStart,
    /// Starts inside `other` and ends after it
    overlaps_end => OverlapsEnd,
    is_head_to_head_with => IsHeadToHeadWith,
    is_tail_to_tail_with => IsTailToTailWith,
    disjunct => Disjunct,
    contemporary_of => ContemporaryOf,
    /// before, meets or equals
    lte => Lte,

    older => Older,
    is_older_than => IsOlderThan,
    younger => Younger,
    is_younger_than => IsYoungerThan,
    survives => Survives,
    is_survived_by => IsSurvivedBy,
    younger_contemporary_of => YoungerContemporaryOf,
    surviving_contemporary_of => SurvivingContemporaryOf,
    survived_by_contemporary_of => SurvivedByContemporaryOf,

    is_forged_before_termination_of => IsForgedBeforeTerminationOf,
    terminated_after_birth_of => TerminatedAfterBirthOf,

    /// Always resolves `Nothing` between forged objects
    nothing => Nothing,
}

impl std::fmt::Debug for TemporalObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TemporalObject")
            .field(&self.inner.lifecycle)
            .finish()
    }
}

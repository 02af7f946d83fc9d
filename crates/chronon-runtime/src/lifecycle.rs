//! Lifecycle controller - forge/finish state machine of one temporal object
//!
//! All transitions of an object go through its controller's mutex, so an
//! explicit `finish` and the side effect of another object's `finishes`
//! cannot both commit an end instant.

use std::sync::Arc;

use parking_lot::Mutex;

use chronon_core::{
    Bound, ChrononError, ChrononResult, ClockOrdering, Extent, Instant, LifecycleState, ObjectId,
};
use chronon_time::ClockSource;

/// Mutable lifecycle data of an object
struct Lifecycle {
    state: LifecycleState,
    extent: Option<Extent>,
    clock: Option<Arc<dyn ClockSource>>,
}

/// Point-in-time copy of an object's lifecycle
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub id: ObjectId,
    pub state: LifecycleState,
    pub extent: Option<Extent>,
    pub clock: Option<Arc<dyn ClockSource>>,
}

impl Snapshot {
    /// Extent and clock of a forged object, `NotForged` otherwise
    pub fn forged(&self) -> ChrononResult<(&Extent, &Arc<dyn ClockSource>)> {
        match (&self.extent, &self.clock) {
            (Some(extent), Some(clock)) if self.state.is_forged() => Ok((extent, clock)),
            _ => Err(ChrononError::NotForged(self.id)),
        }
    }
}

/// Per-object lifecycle controller
pub struct LifecycleController {
    id: ObjectId,
    inner: Mutex<Lifecycle>,
}

impl LifecycleController {
    /// Unforged controller, optionally with the clock it will forge from
    pub fn new(id: ObjectId, clock: Option<Arc<dyn ClockSource>>) -> Self {
        LifecycleController {
            id,
            inner: Mutex::new(Lifecycle {
                state: LifecycleState::Unforged,
                extent: None,
                clock,
            }),
        }
    }

    /// Controller forged right away from `clock`
    pub fn forged(id: ObjectId, clock: Arc<dyn ClockSource>) -> Self {
        let start = clock.now();
        Self::with_extent(id, clock, Extent::ongoing(start))
    }

    /// Controller adopting an existing extent (state follows its end bound)
    pub fn with_extent(id: ObjectId, clock: Arc<dyn ClockSource>, extent: Extent) -> Self {
        let state = if extent.is_finished() {
            LifecycleState::Finished
        } else {
            LifecycleState::Forged
        };
        LifecycleController {
            id,
            inner: Mutex::new(Lifecycle {
                state,
                extent: Some(extent),
                clock: Some(clock),
            }),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.lock().state
    }

    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner.lock();
        Snapshot {
            id: self.id,
            state: inner.state,
            extent: inner.extent.clone(),
            clock: inner.clock.clone(),
        }
    }

    /// `Unforged → Forged`
    ///
    /// A supplied clock replaces the configured one. Returns `true` when the
    /// transition happened, `false` when the object was already forged.
    pub fn forge(&self, supplied: Option<Arc<dyn ClockSource>>) -> ChrononResult<bool> {
        let mut inner = self.inner.lock();
        if inner.state.is_forged() {
            return Ok(false);
        }

        let clock = supplied
            .or_else(|| inner.clock.clone())
            .ok_or(ChrononError::ClockUnavailable(self.id))?;
        let start = clock.now();

        tracing::debug!(object = %self.id, family = %clock.family(), start = ?start, "forged");

        inner.extent = Some(Extent::ongoing(start));
        inner.clock = Some(clock);
        inner.state = LifecycleState::Forged;
        Ok(true)
    }

    /// `Forged → Finished`
    ///
    /// Returns `true` when the transition happened, `false` when the object
    /// was already finished with the same (or an unspecified) end.
    pub fn finish(&self, end: Option<Instant>) -> ChrononResult<bool> {
        let mut inner = self.inner.lock();
        match inner.state {
            LifecycleState::Unforged => {
                tracing::warn!(object = %self.id, "finish requested before forge");
                Err(ChrononError::NotForged(self.id))
            }
            LifecycleState::Finished => {
                let current = inner.extent.as_ref().and_then(|e| e.end.instant());
                match end {
                    None => Ok(false),
                    Some(end) if current == Some(&end) => Ok(false),
                    Some(_) => Err(ChrononError::AlreadyFinished(self.id)),
                }
            }
            LifecycleState::Forged => {
                let end = match end {
                    Some(end) => end,
                    None => inner
                        .clock
                        .as_ref()
                        .ok_or(ChrononError::ClockUnavailable(self.id))?
                        .now(),
                };
                self.close(&mut inner, end)?;
                Ok(true)
            }
        }
    }

    /// Finish only if still open; used by another object's `finishes`
    ///
    /// Already finished objects are left untouched and report `false`.
    pub fn finish_if_open(&self, end: Instant) -> ChrononResult<bool> {
        let mut inner = self.inner.lock();
        match inner.state {
            LifecycleState::Unforged => Err(ChrononError::NotForged(self.id)),
            LifecycleState::Finished => Ok(false),
            LifecycleState::Forged => {
                self.close(&mut inner, end)?;
                Ok(true)
            }
        }
    }

    fn close(&self, inner: &mut Lifecycle, end: Instant) -> ChrononResult<()> {
        let (Some(extent), Some(clock)) = (inner.extent.as_mut(), inner.clock.as_ref()) else {
            return Err(ChrononError::NotForged(self.id));
        };

        match clock.compare(&extent.start, &end)? {
            ClockOrdering::Before | ClockOrdering::Equal => {}
            ClockOrdering::After | ClockOrdering::Concurrent => {
                return Err(ChrononError::InvalidOrdering(self.id));
            }
        }

        tracing::debug!(object = %self.id, end = ?end, "finished");

        extent.end = Bound::At(end);
        inner.state = LifecycleState::Finished;
        Ok(())
    }
}

impl std::fmt::Debug for LifecycleController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("LifecycleController")
            .field("id", &self.id)
            .field("state", &inner.state)
            .field("extent", &inner.extent)
            .finish_non_exhaustive()
    }
}

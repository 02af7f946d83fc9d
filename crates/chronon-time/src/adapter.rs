//! Progressive clocking - projecting logical time onto the metric line
//!
//! Logical and metric instants have no common order. Comparing across the
//! two families is only allowed through an explicit adapter; without one the
//! comparison fails with `IncompatibleClocks`.

use std::fmt;
use std::time::Duration;

use chronon_core::{ChrononError, ChrononResult, ClockFamily, Instant, WallTime};

/// Maps instants of any family onto wall time
pub trait ClockAdapter: Send + Sync + fmt::Debug {
    /// Metric projection of `instant`, or `None` if it cannot be projected
    fn project(&self, instant: &Instant) -> Option<WallTime>;
}

/// Linear projection: each recorded logical event is worth one `tick`
/// after `epoch`. Metric instants project onto themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearProjection {
    pub epoch: WallTime,
    pub tick: Duration,
}

impl LinearProjection {
    pub fn new(epoch: WallTime, tick: Duration) -> Self {
        LinearProjection { epoch, tick }
    }
}

impl Default for LinearProjection {
    fn default() -> Self {
        LinearProjection {
            epoch: WallTime::EPOCH,
            tick: Duration::from_millis(1),
        }
    }
}

impl ClockAdapter for LinearProjection {
    fn project(&self, instant: &Instant) -> Option<WallTime> {
        match instant {
            Instant::Metric(t) => Some(*t),
            Instant::Logical(v) => {
                let events = i64::try_from(v.total_events()).ok()?;
                let tick_us = i64::try_from(self.tick.as_micros()).ok()?;
                let offset = events.checked_mul(tick_us)?;
                Some(WallTime(self.epoch.0.checked_add(offset)?))
            }
        }
    }
}

/// Express `instant` in `family`, projecting through the adapter if needed
///
/// Only projection onto the metric line exists; a metric instant can never be
/// turned into a vector clock snapshot.
pub fn align(
    adapter: Option<&dyn ClockAdapter>,
    instant: Instant,
    family: ClockFamily,
) -> ChrononResult<Instant> {
    if instant.family() == family {
        return Ok(instant);
    }
    let incompatible = ChrononError::IncompatibleClocks {
        left: family,
        right: instant.family(),
    };
    match (family, adapter) {
        (ClockFamily::Metric, Some(adapter)) => adapter
            .project(&instant)
            .map(Instant::Metric)
            .ok_or(incompatible),
        _ => Err(incompatible),
    }
}

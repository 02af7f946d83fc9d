//! Clock implementations for Chronon

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;

use chronon_core::{
    ChrononError, ChrononResult, ClockFamily, ClockOrdering, Instant, ReplicaId, VersionVector,
    WallTime,
};

/// A source of comparable instants
///
/// Clocks are shared (`Arc<dyn ClockSource>`) between the objects they forge;
/// `now` therefore takes `&self` and implementations keep their own interior
/// state.
pub trait ClockSource: Send + Sync + fmt::Debug {
    /// Family of every instant this clock produces
    fn family(&self) -> ClockFamily;

    /// Produce the current instant
    fn now(&self) -> Instant;

    /// Compare two instants of this clock's family
    fn compare(&self, a: &Instant, b: &Instant) -> ChrononResult<ClockOrdering> {
        let family = self.family();
        if a.family() != family || b.family() != family {
            return Err(ChrononError::IncompatibleClocks {
                left: a.family(),
                right: b.family(),
            });
        }
        a.compare(b).ok_or(ChrononError::IncompatibleClocks {
            left: a.family(),
            right: b.family(),
        })
    }

    /// Whether instants of `other` can be compared with ours directly
    fn is_compatible(&self, other: &dyn ClockSource) -> bool {
        self.family() == other.family()
    }
}

/// Logical clock - one replica of a vector clock domain
/// Each `now` is a local event: the replica's own entry advances by one
pub struct LogicalClock {
    replica: ReplicaId,
    version: Mutex<VersionVector>,
}

impl LogicalClock {
    pub fn new(replica: ReplicaId) -> Self {
        LogicalClock {
            replica,
            version: Mutex::new(VersionVector::new()),
        }
    }

    pub fn replica(&self) -> ReplicaId {
        self.replica
    }

    /// Current vector without recording an event
    pub fn peek(&self) -> VersionVector {
        self.version.lock().clone()
    }

    /// Receive event: merge a remote vector, then advance the local entry
    pub fn observe(&self, remote: &VersionVector) -> Instant {
        let mut version = self.version.lock();
        *version = version.merge(remote);
        version.increment(self.replica);
        Instant::Logical(version.clone())
    }
}

impl ClockSource for LogicalClock {
    fn family(&self) -> ClockFamily {
        ClockFamily::Logical
    }

    fn now(&self) -> Instant {
        let mut version = self.version.lock();
        version.increment(self.replica);
        Instant::Logical(version.clone())
    }
}

impl fmt::Debug for LogicalClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicalClock")
            .field("replica", &self.replica)
            .field("version", &*self.version.lock())
            .finish()
    }
}

/// Wall clock - system time, guarded to be non-decreasing
/// INVARIANT: successive `now` values never go backwards
pub struct WallClock {
    last: Mutex<WallTime>,
}

impl WallClock {
    pub fn new() -> Self {
        WallClock {
            last: Mutex::new(WallTime::MIN),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for WallClock {
    fn family(&self) -> ClockFamily {
        ClockFamily::Metric
    }

    fn now(&self) -> Instant {
        let system = WallTime::from_system(SystemTime::now());
        let mut last = self.last.lock();
        if system < *last {
            // System clock stepped back (NTP slew, manual change); hold the line
            tracing::warn!(
                behind_us = last.as_micros() - system.as_micros(),
                "wall clock went backwards, holding last instant"
            );
        } else {
            *last = system;
        }
        Instant::Metric(*last)
    }
}

impl fmt::Debug for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WallClock")
            .field("last", &*self.last.lock())
            .finish()
    }
}

/// Stepped clock - metric time that only moves when told to
/// Optionally advances by a fixed step after every reading
pub struct SteppedClock {
    value: Mutex<WallTime>,
    step: Duration,
}

impl SteppedClock {
    /// A clock frozen at `start` until advanced
    pub fn new(start: WallTime) -> Self {
        Self::with_step(start, Duration::ZERO)
    }

    /// A clock that advances by `step` after each `now`
    pub fn with_step(start: WallTime, step: Duration) -> Self {
        SteppedClock {
            value: Mutex::new(start),
            step,
        }
    }

    /// Current time without advancing
    pub fn peek(&self) -> WallTime {
        *self.value.lock()
    }

    /// Advance the clock by a duration
    /// Returns the new time
    pub fn advance(&self, dt: Duration) -> WallTime {
        let mut value = self.value.lock();
        *value = value.saturating_add(dt);
        *value
    }

    /// Set the clock to an arbitrary time (may move backwards)
    pub fn set(&self, t: WallTime) {
        *self.value.lock() = t;
    }

    /// Sync to a specific time
    /// Only allowed to move forward
    pub fn sync_to(&self, target: WallTime) {
        let mut value = self.value.lock();
        if target > *value {
            *value = target;
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }
}

impl ClockSource for SteppedClock {
    fn family(&self) -> ClockFamily {
        ClockFamily::Metric
    }

    fn now(&self) -> Instant {
        let mut value = self.value.lock();
        let current = *value;
        *value = value.saturating_add(self.step);
        Instant::Metric(current)
    }
}

impl fmt::Debug for SteppedClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteppedClock")
            .field("value", &*self.value.lock())
            .field("step", &self.step)
            .finish()
    }
}

static DEFAULT_CLOCK: OnceLock<Arc<WallClock>> = OnceLock::new();

/// Process-lifetime default clock (metric, wall time)
///
/// Used only when no clock is supplied at the outermost construction
/// boundary. The clock itself is immutable; supplying a clock replaces it for
/// that space rather than reconfiguring it.
pub fn default_clock() -> Arc<dyn ClockSource> {
    DEFAULT_CLOCK.get_or_init(|| Arc::new(WallClock::new())).clone()
}

//! Time primitives for Chronon
//!
//! Chronon compares time from two clock families:
//! - Logical: version vectors, partially ordered (causal order)
//! - Metric: wall time in microseconds since the Unix epoch, totally ordered
//!
//! An [`Instant`] is tagged with its family; instants from different families
//! have no order of their own.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::VersionVector;

/// Wall time - microseconds since the Unix epoch
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WallTime(pub i64);

impl WallTime {
    pub const EPOCH: WallTime = WallTime(0);
    pub const MAX: WallTime = WallTime(i64::MAX);
    pub const MIN: WallTime = WallTime(i64::MIN);

    #[inline]
    pub fn from_micros(micros: i64) -> Self {
        WallTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: i64) -> Self {
        WallTime(millis.saturating_mul(1000))
    }

    #[inline]
    pub fn from_secs(secs: i64) -> Self {
        WallTime(secs.saturating_mul(1_000_000))
    }

    /// Convert a system time; times before the epoch are negative
    pub fn from_system(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => WallTime(after.as_micros().min(i64::MAX as u128) as i64),
            Err(before) => WallTime(-(before.duration().as_micros().min(i64::MAX as u128) as i64)),
        }
    }

    #[inline]
    pub fn as_micros(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> i64 {
        self.0 / 1000
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        WallTime(self.0.saturating_add(micros_of(duration)))
    }

    #[inline]
    pub fn saturating_sub(self, duration: Duration) -> Self {
        WallTime(self.0.saturating_sub(micros_of(duration)))
    }
}

/// Whole microseconds of `duration`, clamped to `i64::MAX`
#[inline]
fn micros_of(duration: Duration) -> i64 {
    i64::try_from(duration.as_micros()).unwrap_or(i64::MAX)
}

impl Add<Duration> for WallTime {
    type Output = WallTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub<Duration> for WallTime {
    type Output = WallTime;

    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl Sub<WallTime> for WallTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: WallTime) -> Self::Output {
        let diff = self.0.saturating_sub(rhs.0);
        if diff >= 0 {
            Duration::from_micros(diff as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl fmt::Debug for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wall({}µs)", self.0)
    }
}

/// Clock family of an instant or clock source
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockFamily {
    /// Vector clocks - causal, partial order
    Logical,
    /// Wall clocks - absolute, total order
    Metric,
}

impl fmt::Display for ClockFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockFamily::Logical => f.write_str("logical"),
            ClockFamily::Metric => f.write_str("metric"),
        }
    }
}

/// Outcome of comparing two instants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockOrdering {
    Before,
    Equal,
    After,
    /// No causal order exists (logical family only)
    Concurrent,
}

impl ClockOrdering {
    /// Ordering seen from the other operand
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            ClockOrdering::Before => ClockOrdering::After,
            ClockOrdering::After => ClockOrdering::Before,
            other => other,
        }
    }

    #[inline]
    pub fn is_concurrent(self) -> bool {
        self == ClockOrdering::Concurrent
    }
}

impl From<Ordering> for ClockOrdering {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => ClockOrdering::Before,
            Ordering::Equal => ClockOrdering::Equal,
            Ordering::Greater => ClockOrdering::After,
        }
    }
}

/// A point in time produced by a clock source
#[derive(Clone, PartialEq, Eq)]
pub enum Instant {
    Logical(VersionVector),
    Metric(WallTime),
}

impl Instant {
    #[inline]
    pub fn family(&self) -> ClockFamily {
        match self {
            Instant::Logical(_) => ClockFamily::Logical,
            Instant::Metric(_) => ClockFamily::Metric,
        }
    }

    /// Compare within one family; `None` across families
    pub fn compare(&self, other: &Instant) -> Option<ClockOrdering> {
        match (self, other) {
            (Instant::Logical(a), Instant::Logical(b)) => Some(a.compare(b)),
            (Instant::Metric(a), Instant::Metric(b)) => Some(a.cmp(b).into()),
            _ => None,
        }
    }

    pub fn as_wall(&self) -> Option<WallTime> {
        match self {
            Instant::Metric(t) => Some(*t),
            Instant::Logical(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&VersionVector> {
        match self {
            Instant::Logical(v) => Some(v),
            Instant::Metric(_) => None,
        }
    }
}

impl From<WallTime> for Instant {
    fn from(t: WallTime) -> Self {
        Instant::Metric(t)
    }
}

impl From<VersionVector> for Instant {
    fn from(v: VersionVector) -> Self {
        Instant::Logical(v)
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instant::Logical(v) => write!(f, "{:?}", v),
            Instant::Metric(t) => write!(f, "{:?}", t),
        }
    }
}

/// End bound of an extent
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Bound {
    At(Instant),
    /// Not yet finished - extends past every bounded instant
    Unbounded,
}

impl Bound {
    pub fn instant(&self) -> Option<&Instant> {
        match self {
            Bound::At(t) => Some(t),
            Bound::Unbounded => None,
        }
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }
}

/// The interval a temporal object occupies
/// INVARIANT: start <= end once end is bounded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extent {
    pub start: Instant,
    pub end: Bound,
}

impl Extent {
    /// An extent that has started but not finished
    pub fn ongoing(start: Instant) -> Self {
        Extent {
            start,
            end: Bound::Unbounded,
        }
    }

    /// An extent with both bounds set; ordering is checked by the caller
    pub fn closed(start: Instant, end: Instant) -> Self {
        Extent {
            start,
            end: Bound::At(end),
        }
    }

    #[inline]
    pub fn family(&self) -> ClockFamily {
        self.start.family()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        !self.end.is_unbounded()
    }

    /// Duration of a finished metric extent
    pub fn duration(&self) -> Option<Duration> {
        match (&self.start, &self.end) {
            (Instant::Metric(start), Bound::At(Instant::Metric(end))) => Some(*end - *start),
            _ => None,
        }
    }
}

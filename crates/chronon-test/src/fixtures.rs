//! Deterministic fixtures
//!
//! A `Timeline` is an object space on a stepped metric clock with sequential
//! identities, so every extent and every id in a test is reproducible.

use std::future::Future;
use std::sync::Arc;

use chronon_core::{Extent, Instant, SequentialIdentity, WallTime};
use chronon_runtime::{Rejection, SpaceConfig, TemporalObject, TemporalObjectSpace};
use chronon_time::{ClockAdapter, SteppedClock};
use rand::rngs::StdRng;
use rand::Rng;

/// Metric instant `t` milliseconds after the Unix epoch
pub fn ms(t: i64) -> Instant {
    Instant::Metric(WallTime::from_millis(t))
}

/// Closed metric extent `[start, end]` in milliseconds
pub fn extent_ms(start: i64, end: i64) -> Extent {
    Extent::closed(ms(start), ms(end))
}

/// Object space on a manually driven clock
pub struct Timeline {
    clock: Arc<SteppedClock>,
    space: TemporalObjectSpace,
}

impl Timeline {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Timeline whose space reconciles clock families through `adapter`
    pub fn with_adapter(adapter: Arc<dyn ClockAdapter>) -> Self {
        Self::build(Some(adapter))
    }

    fn build(adapter: Option<Arc<dyn ClockAdapter>>) -> Self {
        let clock = Arc::new(SteppedClock::new(WallTime::EPOCH));
        let mut config = SpaceConfig::default()
            .with_clock(clock.clone())
            .with_identity(Arc::new(SequentialIdentity::new()));
        config.adapter = adapter;

        Timeline {
            clock,
            space: TemporalObjectSpace::with_config(config),
        }
    }

    pub fn clock(&self) -> &Arc<SteppedClock> {
        &self.clock
    }

    pub fn space(&self) -> &TemporalObjectSpace {
        &self.space
    }

    /// Forged, open object starting at `start` ms
    pub fn open(&self, start: i64) -> TemporalObject {
        self.clock.set(WallTime::from_millis(start));
        self.space.create()
    }

    /// Finished object spanning `[start, end]` ms
    pub async fn closed(&self, start: i64, end: i64) -> Result<TemporalObject, Rejection> {
        let object = self.open(start);
        object.finish_at(ms(end)).await?;
        Ok(object)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Random proper spans (`start < end`) within `[0, horizon)` ms
pub fn random_spans(rng: &mut StdRng, count: usize, horizon: i64) -> Vec<(i64, i64)> {
    let horizon = horizon.max(2);
    (0..count)
        .map(|_| {
            let start = rng.gen_range(0..horizon - 1);
            let end = rng.gen_range(start + 1..horizon);
            (start, end)
        })
        .collect()
}

/// Drive a future to completion on a fresh current-thread runtime
pub fn block_on<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    Ok(runtime.block_on(future))
}

//! Temporal object space - the factory of temporal objects

use std::sync::Arc;

use chronon_core::{Extent, IdentityProvider};
use chronon_time::{ClockAdapter, ClockSource};

use crate::{LifecycleController, SpaceConfig, TemporalObject};

/// Configuration shared by a space and every object it created
pub(crate) struct SpaceShared {
    pub(crate) clock: Option<Arc<dyn ClockSource>>,
    pub(crate) adapter: Option<Arc<dyn ClockAdapter>>,
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) eager_forge: bool,
}

/// Factory of temporal objects sharing one clock configuration
#[derive(Clone)]
pub struct TemporalObjectSpace {
    shared: Arc<SpaceShared>,
}

/// Create a space forging from `clock`, or from the default wall clock
pub fn create_temporal_object_space(clock: Option<Arc<dyn ClockSource>>) -> TemporalObjectSpace {
    let config = match clock {
        Some(clock) => SpaceConfig::default().with_clock(clock),
        None => SpaceConfig::default(),
    };
    TemporalObjectSpace::with_config(config)
}

impl TemporalObjectSpace {
    /// Space on the default wall clock with eager forging
    pub fn new() -> Self {
        Self::with_config(SpaceConfig::default())
    }

    /// Space without a clock; objects start unforged
    pub fn clockless() -> Self {
        Self::with_config(SpaceConfig::clockless())
    }

    pub fn with_config(config: SpaceConfig) -> Self {
        let clock = config.clock.resolve();
        tracing::debug!(
            eager_forge = config.eager_forge,
            clock = ?clock,
            adapter = config.adapter.is_some(),
            "temporal object space created"
        );
        TemporalObjectSpace {
            shared: Arc::new(SpaceShared {
                clock,
                adapter: config.adapter,
                identity: config.identity,
                eager_forge: config.eager_forge,
            }),
        }
    }

    /// Create a temporal object
    ///
    /// The object is forged at once when the space forges eagerly and has a
    /// clock; otherwise it starts unforged.
    pub fn create(&self) -> TemporalObject {
        let id = self.shared.identity.issue();
        let lifecycle = match &self.shared.clock {
            Some(clock) if self.shared.eager_forge => LifecycleController::forged(id, clock.clone()),
            clock => LifecycleController::new(id, clock.clone()),
        };
        tracing::trace!(object = %id, state = %lifecycle.state(), "temporal object created");
        TemporalObject::from_parts(lifecycle, self.shared.clone())
    }

    pub fn clock(&self) -> Option<Arc<dyn ClockSource>> {
        self.shared.clock.clone()
    }

    pub fn adapter(&self) -> Option<Arc<dyn ClockAdapter>> {
        self.shared.adapter.clone()
    }

    pub fn eager_forge(&self) -> bool {
        self.shared.eager_forge
    }
}

impl Default for TemporalObjectSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemporalObjectSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporalObjectSpace")
            .field("clock", &self.shared.clock)
            .field("adapter", &self.shared.adapter)
            .field("eager_forge", &self.shared.eager_forge)
            .finish_non_exhaustive()
    }
}

/// Create an object in `shared` that adopts an existing extent
pub(crate) fn adopt(shared: &Arc<SpaceShared>, clock: Arc<dyn ClockSource>, extent: Extent) -> TemporalObject {
    let id = shared.identity.issue();
    let lifecycle = LifecycleController::with_extent(id, clock, extent);
    TemporalObject::from_parts(lifecycle, shared.clone())
}

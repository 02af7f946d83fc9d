//! Object space configuration

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use chronon_core::{IdentityProvider, ProcessIdentity, ReplicaId, SequentialIdentity, WallTime};
use chronon_time::{
    default_clock, ClockAdapter, ClockSource, LinearProjection, LogicalClock, SteppedClock,
    WallClock,
};

/// Which clock a space forges its objects from
#[derive(Clone, Default)]
pub enum ClockSelection {
    /// The process-wide wall clock
    #[default]
    Default,
    /// A caller-supplied clock, replacing the default
    Explicit(Arc<dyn ClockSource>),
    /// No clock; objects must be forged with an explicit clock
    None,
}

impl ClockSelection {
    pub fn resolve(&self) -> Option<Arc<dyn ClockSource>> {
        match self {
            ClockSelection::Default => Some(default_clock()),
            ClockSelection::Explicit(clock) => Some(clock.clone()),
            ClockSelection::None => None,
        }
    }
}

impl fmt::Debug for ClockSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockSelection::Default => f.write_str("Default"),
            ClockSelection::Explicit(clock) => f.debug_tuple("Explicit").field(clock).finish(),
            ClockSelection::None => f.write_str("None"),
        }
    }
}

/// Object space configuration
#[derive(Clone)]
pub struct SpaceConfig {
    /// Forge objects as soon as they are created
    pub eager_forge: bool,
    /// Clock objects are forged from
    pub clock: ClockSelection,
    /// Progressive clocking adapter for cross-family comparison
    pub adapter: Option<Arc<dyn ClockAdapter>>,
    /// Issuer of object identities
    pub identity: Arc<dyn IdentityProvider>,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        SpaceConfig {
            eager_forge: true,
            clock: ClockSelection::Default,
            adapter: None,
            identity: Arc::new(ProcessIdentity::new()),
        }
    }
}

impl SpaceConfig {
    /// Objects are created unforged and forged on request
    pub fn deferred() -> Self {
        SpaceConfig {
            eager_forge: false,
            ..Self::default()
        }
    }

    /// No clock at all; every object is forged with a caller-supplied clock
    pub fn clockless() -> Self {
        SpaceConfig {
            eager_forge: false,
            clock: ClockSelection::None,
            ..Self::default()
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn ClockSource>) -> Self {
        self.clock = ClockSelection::Explicit(clock);
        self
    }

    pub fn with_adapter(mut self, adapter: Arc<dyn ClockAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_eager_forge(mut self, eager_forge: bool) -> Self {
        self.eager_forge = eager_forge;
        self
    }
}

impl fmt::Debug for SpaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceConfig")
            .field("eager_forge", &self.eager_forge)
            .field("clock", &self.clock)
            .field("adapter", &self.adapter)
            .finish_non_exhaustive()
    }
}

/// Settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid duration {value:?}: {source}")]
    Duration {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
}

/// Clock kinds selectable from settings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    /// Shared process-wide wall clock
    #[default]
    Default,
    /// A wall clock owned by this space
    Wall,
    /// A vector clock replica
    Logical,
    /// A manually stepped metric clock
    Stepped,
    /// No clock
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    #[default]
    Process,
    Sequential,
}

/// Linear projection settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionSettings {
    /// Wall time of logical event zero, milliseconds since the Unix epoch
    #[serde(default)]
    pub epoch_ms: i64,
    /// Wall time per logical event, e.g. "1ms"
    pub tick: String,
}

/// Serializable description of a space
///
/// ```json
/// { "eager_forge": true, "clock": "logical", "replica": 3,
///   "projection": { "epoch_ms": 0, "tick": "1ms" } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceSettings {
    pub eager_forge: bool,
    pub clock: ClockKind,
    /// Replica of a logical clock
    pub replica: ReplicaId,
    /// Start of a stepped clock, milliseconds since the Unix epoch
    pub stepped_start_ms: i64,
    /// Advance of a stepped clock per reading, e.g. "10ms"
    pub stepped_step: Option<String>,
    pub projection: Option<ProjectionSettings>,
    pub identity: IdentityKind,
}

impl Default for SpaceSettings {
    fn default() -> Self {
        SpaceSettings {
            eager_forge: true,
            clock: ClockKind::Default,
            replica: ReplicaId::ZERO,
            stepped_start_ms: 0,
            stepped_step: None,
            projection: None,
            identity: IdentityKind::Process,
        }
    }
}

impl SpaceSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the runtime configuration
    pub fn into_config(self) -> Result<SpaceConfig, SettingsError> {
        let clock = match self.clock {
            ClockKind::Default => ClockSelection::Default,
            ClockKind::Wall => ClockSelection::Explicit(Arc::new(WallClock::new())),
            ClockKind::Logical => ClockSelection::Explicit(Arc::new(LogicalClock::new(self.replica))),
            ClockKind::Stepped => {
                let step = match &self.stepped_step {
                    Some(step) => parse_duration(step)?,
                    None => Duration::ZERO,
                };
                let start = WallTime::from_millis(self.stepped_start_ms);
                ClockSelection::Explicit(Arc::new(SteppedClock::with_step(start, step)))
            }
            ClockKind::None => ClockSelection::None,
        };

        let adapter: Option<Arc<dyn ClockAdapter>> = match &self.projection {
            Some(projection) => Some(Arc::new(LinearProjection::new(
                WallTime::from_millis(projection.epoch_ms),
                parse_duration(&projection.tick)?,
            ))),
            None => None,
        };

        let identity: Arc<dyn IdentityProvider> = match self.identity {
            IdentityKind::Process => Arc::new(ProcessIdentity::new()),
            IdentityKind::Sequential => Arc::new(SequentialIdentity::new()),
        };

        Ok(SpaceConfig {
            eager_forge: self.eager_forge && !matches!(clock, ClockSelection::None),
            clock,
            adapter,
            identity,
        })
    }
}

fn parse_duration(value: &str) -> Result<Duration, SettingsError> {
    humantime::parse_duration(value).map_err(|source| SettingsError::Duration {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronon_core::ClockFamily;

    #[test]
    fn test_default_config() {
        let config = SpaceConfig::default();
        assert!(config.eager_forge);
        assert!(matches!(config.clock, ClockSelection::Default));
        assert_eq!(config.clock.resolve().unwrap().family(), ClockFamily::Metric);
    }

    #[test]
    fn test_clockless_config() {
        let config = SpaceConfig::clockless();
        assert!(!config.eager_forge);
        assert!(config.clock.resolve().is_none());
    }

    #[test]
    fn test_explicit_clock_replaces_default() {
        let clock: Arc<dyn ClockSource> = Arc::new(LogicalClock::new(ReplicaId(2)));
        let config = SpaceConfig::default().with_clock(clock.clone());

        let resolved = config.clock.resolve().unwrap();
        assert!(Arc::ptr_eq(&resolved, &clock));
        assert_eq!(resolved.family(), ClockFamily::Logical);
    }

    #[test]
    fn test_settings_from_json() {
        let settings = SpaceSettings::from_json(
            r#"{ "clock": "logical", "replica": 3, "projection": { "tick": "2ms" } }"#,
        )
        .unwrap();

        assert_eq!(settings.clock, ClockKind::Logical);
        assert_eq!(settings.replica, ReplicaId(3));
        assert!(settings.eager_forge);

        let config = settings.into_config().unwrap();
        assert_eq!(config.clock.resolve().unwrap().family(), ClockFamily::Logical);
        assert!(config.adapter.is_some());
    }

    #[test]
    fn test_settings_stepped_clock() {
        let settings = SpaceSettings::from_json(
            r#"{ "clock": "stepped", "stepped_start_ms": 1000, "stepped_step": "10ms" }"#,
        )
        .unwrap();
        let clock = settings.into_config().unwrap().clock.resolve().unwrap();

        assert_eq!(clock.now().as_wall(), Some(WallTime::from_millis(1000)));
        assert_eq!(clock.now().as_wall(), Some(WallTime::from_millis(1010)));
    }

    #[test]
    fn test_settings_none_clock_disables_eager_forge() {
        let config = SpaceSettings::from_json(r#"{ "clock": "none" }"#)
            .unwrap()
            .into_config()
            .unwrap();
        assert!(!config.eager_forge);
    }

    #[test]
    fn test_settings_bad_duration() {
        let settings = SpaceSettings::from_json(r#"{ "clock": "stepped", "stepped_step": "soon" }"#).unwrap();
        assert!(matches!(settings.into_config(), Err(SettingsError::Duration { .. })));
    }

    #[test]
    fn test_settings_bad_json() {
        assert!(matches!(SpaceSettings::from_json("{ clock: }"), Err(SettingsError::Json(_))));
    }
}

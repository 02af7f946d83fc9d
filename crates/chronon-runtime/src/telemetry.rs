//! Tracing subscriber setup
//!
//! The library itself only emits `tracing` events; applications and test
//! harnesses install a subscriber with one of these functions.

use std::sync::Once;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Subscriber installation errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("Subscriber already installed: {0}")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `level`, which defaults to `info` and
/// accepts full filter directives (`chronon_runtime=debug,info`).
pub fn init_tracing(level: Option<&str>, json: bool) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level.unwrap_or("info"))?,
    };
    let subscriber = Registry::default().with(filter);

    if json {
        let layer = fmt::layer().json().with_current_span(true).with_span_list(true);
        tracing::subscriber::set_global_default(subscriber.with(layer))?;
    } else {
        let layer = fmt::layer().pretty().with_target(true).with_level(true);
        tracing::subscriber::set_global_default(subscriber.with(layer))?;
    }

    tracing::debug!(json, "tracing initialized");
    Ok(())
}

static TEST_TRACING: Once = Once::new();

/// Route events to the test harness's captured output, once per process
pub fn init_test_tracing() {
    TEST_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

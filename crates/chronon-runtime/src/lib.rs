//! Chronon Runtime - Temporal objects and their lifecycle
//!
//! This crate ties the clock and relation layers to owned objects:
//! - Temporal objects with identity, lifecycle state and extent
//! - The forge/finish lifecycle controller (one writer per object)
//! - Object spaces (the factory) and their configuration
//! - The asynchronous resolution/rejection contract of every query
//! - Tracing subscriber setup

pub mod contract;
pub mod lifecycle;
pub mod config;
pub mod space;
pub mod object;
pub mod telemetry;

pub use contract::*;
pub use lifecycle::*;
pub use config::*;
pub use space::*;
pub use object::*;
pub use telemetry::*;

//! Chronon Test Harness - Scenario and property validation
//!
//! This crate provides:
//! - Deterministic timelines on a stepped metric clock
//! - Randomized relation scenarios checking the algebra's invariants
//! - Lifecycle and clock-family scenarios over the async object API
//! - Property tests of the pure relation engine

pub mod fixtures;
pub mod scenarios;

#[cfg(test)]
mod properties;

pub use fixtures::*;
pub use scenarios::*;

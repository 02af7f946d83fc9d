//! Chronon Time - Clock sources and instant comparison
//!
//! This crate implements the clock side of the algebra:
//! - The `ClockSource` capability and its logical and metric families
//! - Vector clocks (causal, partially ordered)
//! - Wall clocks and manually stepped metric clocks (totally ordered)
//! - Progressive clocking adapters projecting logical time onto wall time
//! - The comparator that relation evaluation runs on

pub mod clock;
pub mod adapter;
pub mod compare;

pub use clock::*;
pub use adapter::*;
pub use compare::*;

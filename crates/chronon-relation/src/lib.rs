//! Chronon Relation Engine - Pairwise temporal algebra
//!
//! This crate implements the pure relation engine:
//! - Three-valued relation outcomes (true, false, indeterminate, nothing)
//! - Allen's 13 base interval relations and classification
//! - Derived relations (disjunct, contemporaryOf, lte, head/tail alignment)
//! - Age and survivorship relations
//! - Point containment against bare instants
//!
//! Evaluation never mutates anything; the one impure relation (`finishes`
//! with its lifecycle side effect) lives in the runtime crate.

pub mod outcome;
pub mod allen;
pub mod relation;
pub mod engine;

pub use outcome::*;
pub use allen::*;
pub use relation::*;
pub use engine::*;

//! Chronon Core - Fundamental types of the temporal object algebra
//!
//! This crate defines the types shared by every other Chronon crate:
//! - Identifiers (ObjectId, ReplicaId) and identity providers
//! - Time primitives (WallTime, VersionVector, Instant, Bound, Extent)
//! - Lifecycle states of temporal objects
//! - Error types

pub mod id;
pub mod time;
pub mod vector;
pub mod state;
pub mod error;

pub use id::*;
pub use time::*;
pub use vector::*;
pub use state::*;
pub use error::*;

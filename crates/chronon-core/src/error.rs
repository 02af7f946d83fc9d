//! Error types for Chronon

use thiserror::Error;

use crate::{ClockFamily, ObjectId};

/// Core Chronon errors
///
/// Every variant is a precondition failure of a single call. None of them is
/// fatal; the caller may retry after fixing the precondition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChrononError {
    // Lifecycle errors
    #[error("Temporal object {0} is not forged")]
    NotForged(ObjectId),

    #[error("Temporal object {0} is already finished with a different end")]
    AlreadyFinished(ObjectId),

    #[error("Invalid ordering on {0}: end precedes start")]
    InvalidOrdering(ObjectId),

    #[error("No clock source available to forge {0}")]
    ClockUnavailable(ObjectId),

    // Clock errors
    #[error("Incompatible clocks: {left} vs {right} without an adapter")]
    IncompatibleClocks { left: ClockFamily, right: ClockFamily },

    #[error("Clock fault: {0}")]
    ClockFault(String),
}

impl ChrononError {
    /// Object the error is attached to, if any
    pub fn object(&self) -> Option<ObjectId> {
        match self {
            ChrononError::NotForged(id)
            | ChrononError::AlreadyFinished(id)
            | ChrononError::InvalidOrdering(id)
            | ChrononError::ClockUnavailable(id) => Some(*id),
            ChrononError::IncompatibleClocks { .. } | ChrononError::ClockFault(_) => None,
        }
    }
}

/// Result type for Chronon operations
pub type ChrononResult<T> = Result<T, ChrononError>;

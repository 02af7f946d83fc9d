//! Resolution and rejection of asynchronous queries
//!
//! A query resolves whenever it could be evaluated, even when the relation
//! is false or indeterminate. It rejects only when a precondition fails.

use std::fmt;

use thiserror::Error;

use chronon_core::{ChrononError, LifecycleState, ObjectId};
use chronon_relation::RelationOutcome;

/// Reference to a temporal object, with its state when the query settled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TemporalObjectRef {
    pub id: ObjectId,
    pub state: LifecycleState,
}

impl TemporalObjectRef {
    pub fn new(id: ObjectId, state: LifecycleState) -> Self {
        TemporalObjectRef { id, state }
    }
}

impl fmt::Display for TemporalObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.state)
    }
}

/// Successful query: the querying object and the relation's value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub subject: TemporalObjectRef,
    pub outcome: RelationOutcome,
}

impl Resolution {
    pub fn new(subject: TemporalObjectRef, outcome: RelationOutcome) -> Self {
        Resolution { subject, outcome }
    }
}

/// Failed precondition: the offending object and the reason
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{error} [subject {subject}]")]
pub struct Rejection {
    pub subject: TemporalObjectRef,
    #[source]
    pub error: ChrononError,
}

impl Rejection {
    pub fn new(subject: TemporalObjectRef, error: ChrononError) -> Self {
        Rejection { subject, error }
    }
}

/// Settled value of every query and transition
pub type QueryResult = Result<Resolution, Rejection>;

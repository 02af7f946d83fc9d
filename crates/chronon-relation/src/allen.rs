//! Allen's interval algebra - the 13 base relations

use std::fmt;

use crate::Relation;

/// Base relation between two proper intervals
/// Exactly one holds for any pair under a total order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AllenRelation {
    Before,
    Meets,
    Overlaps,
    Starts,
    During,
    Finishes,
    Equals,
    FinishedBy,
    Contains,
    StartedBy,
    OverlappedBy,
    MetBy,
    After,
}

impl AllenRelation {
    pub const ALL: [AllenRelation; 13] = [
        AllenRelation::Before,
        AllenRelation::Meets,
        AllenRelation::Overlaps,
        AllenRelation::Starts,
        AllenRelation::During,
        AllenRelation::Finishes,
        AllenRelation::Equals,
        AllenRelation::FinishedBy,
        AllenRelation::Contains,
        AllenRelation::StartedBy,
        AllenRelation::OverlappedBy,
        AllenRelation::MetBy,
        AllenRelation::After,
    ];

    /// Relation seen from the other interval
    pub fn inverse(self) -> AllenRelation {
        match self {
            AllenRelation::Before => AllenRelation::After,
            AllenRelation::Meets => AllenRelation::MetBy,
            AllenRelation::Overlaps => AllenRelation::OverlappedBy,
            AllenRelation::Starts => AllenRelation::StartedBy,
            AllenRelation::During => AllenRelation::Contains,
            AllenRelation::Finishes => AllenRelation::FinishedBy,
            AllenRelation::Equals => AllenRelation::Equals,
            AllenRelation::FinishedBy => AllenRelation::Finishes,
            AllenRelation::Contains => AllenRelation::During,
            AllenRelation::StartedBy => AllenRelation::Starts,
            AllenRelation::OverlappedBy => AllenRelation::Overlaps,
            AllenRelation::MetBy => AllenRelation::Meets,
            AllenRelation::After => AllenRelation::Before,
        }
    }

    /// The named relation evaluating this base relation
    pub fn relation(self) -> Relation {
        match self {
            AllenRelation::Before => Relation::Before,
            AllenRelation::Meets => Relation::Meets,
            AllenRelation::Overlaps => Relation::Overlaps,
            AllenRelation::Starts => Relation::Starts,
            AllenRelation::During => Relation::During,
            AllenRelation::Finishes => Relation::Finishes,
            AllenRelation::Equals => Relation::Equals,
            AllenRelation::FinishedBy => Relation::FinishedBy,
            AllenRelation::Contains => Relation::Contains,
            AllenRelation::StartedBy => Relation::StartedBy,
            AllenRelation::OverlappedBy => Relation::OverlappedBy,
            AllenRelation::MetBy => Relation::MetBy,
            AllenRelation::After => Relation::After,
        }
    }

    /// Intervals share at least one point
    pub fn is_contemporary(self) -> bool {
        !matches!(self, AllenRelation::Before | AllenRelation::After)
    }
}

impl fmt::Display for AllenRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.relation().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_is_involution() {
        for r in AllenRelation::ALL {
            assert_eq!(r.inverse().inverse(), r);
        }
    }

    #[test]
    fn test_equals_is_self_inverse() {
        let self_inverse: Vec<_> = AllenRelation::ALL
            .into_iter()
            .filter(|r| r.inverse() == *r)
            .collect();
        assert_eq!(self_inverse, vec![AllenRelation::Equals]);
    }

    #[test]
    fn test_inverse_matches_relation_converse() {
        for r in AllenRelation::ALL {
            assert_eq!(r.relation().converse(), Some(r.inverse().relation()));
        }
    }
}

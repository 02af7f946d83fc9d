//! Relation outcomes and three-valued logic

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use chronon_core::ClockOrdering;

/// Result of evaluating a relation
///
/// Conjunction and disjunction follow Kleene's strong three-valued logic:
/// a `False` conjunct settles a conjunction even if another conjunct is
/// `Indeterminate`, and a `True` disjunct settles a disjunction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationOutcome {
    True,
    False,
    /// A causal (logical clock) tie prevents a definite answer
    Indeterminate,
    /// Placeholder result of the `nothing` relation
    Nothing,
}

impl RelationOutcome {
    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value {
            RelationOutcome::True
        } else {
            RelationOutcome::False
        }
    }

    /// `Some(bool)` for definite outcomes
    pub fn as_bool(self) -> Option<bool> {
        match self {
            RelationOutcome::True => Some(true),
            RelationOutcome::False => Some(false),
            RelationOutcome::Indeterminate | RelationOutcome::Nothing => None,
        }
    }

    #[inline]
    pub fn is_true(self) -> bool {
        self == RelationOutcome::True
    }

    #[inline]
    pub fn is_definite(self) -> bool {
        self.as_bool().is_some()
    }

    pub fn and(self, other: RelationOutcome) -> RelationOutcome {
        use RelationOutcome::*;
        match (self, other) {
            (Nothing, _) | (_, Nothing) => Nothing,
            (False, _) | (_, False) => False,
            (Indeterminate, _) | (_, Indeterminate) => Indeterminate,
            (True, True) => True,
        }
    }

    pub fn or(self, other: RelationOutcome) -> RelationOutcome {
        use RelationOutcome::*;
        match (self, other) {
            (Nothing, _) | (_, Nothing) => Nothing,
            (True, _) | (_, True) => True,
            (Indeterminate, _) | (_, Indeterminate) => Indeterminate,
            (False, False) => False,
        }
    }

    pub fn negate(self) -> RelationOutcome {
        match self {
            RelationOutcome::True => RelationOutcome::False,
            RelationOutcome::False => RelationOutcome::True,
            other => other,
        }
    }
}

impl Not for RelationOutcome {
    type Output = RelationOutcome;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl BitAnd for RelationOutcome {
    type Output = RelationOutcome;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for RelationOutcome {
    type Output = RelationOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl From<bool> for RelationOutcome {
    fn from(value: bool) -> Self {
        RelationOutcome::from_bool(value)
    }
}

impl fmt::Display for RelationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationOutcome::True => f.write_str("true"),
            RelationOutcome::False => f.write_str("false"),
            RelationOutcome::Indeterminate => f.write_str("indeterminate"),
            RelationOutcome::Nothing => f.write_str("nothing"),
        }
    }
}

/// x < y
#[inline]
pub(crate) fn lt(ordering: ClockOrdering) -> RelationOutcome {
    match ordering {
        ClockOrdering::Before => RelationOutcome::True,
        ClockOrdering::Equal | ClockOrdering::After => RelationOutcome::False,
        ClockOrdering::Concurrent => RelationOutcome::Indeterminate,
    }
}

/// x <= y
#[inline]
pub(crate) fn le(ordering: ClockOrdering) -> RelationOutcome {
    match ordering {
        ClockOrdering::Before | ClockOrdering::Equal => RelationOutcome::True,
        ClockOrdering::After => RelationOutcome::False,
        ClockOrdering::Concurrent => RelationOutcome::Indeterminate,
    }
}

/// x == y
#[inline]
pub(crate) fn eq(ordering: ClockOrdering) -> RelationOutcome {
    match ordering {
        ClockOrdering::Equal => RelationOutcome::True,
        ClockOrdering::Before | ClockOrdering::After => RelationOutcome::False,
        ClockOrdering::Concurrent => RelationOutcome::Indeterminate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RelationOutcome::*;

    #[test]
    fn test_kleene_and() {
        assert_eq!(True & True, True);
        assert_eq!(True & False, False);
        assert_eq!(False & Indeterminate, False);
        assert_eq!(True & Indeterminate, Indeterminate);
    }

    #[test]
    fn test_kleene_or() {
        assert_eq!(False | False, False);
        assert_eq!(True | Indeterminate, True);
        assert_eq!(False | Indeterminate, Indeterminate);
    }

    #[test]
    fn test_negation() {
        assert_eq!(!True, False);
        assert_eq!(!False, True);
        assert_eq!(!Indeterminate, Indeterminate);
        assert_eq!(!Nothing, Nothing);
    }

    #[test]
    fn test_nothing_absorbs() {
        assert_eq!(Nothing & False, Nothing);
        assert_eq!(True | Nothing, Nothing);
        assert_eq!(Nothing.as_bool(), None);
    }

    #[test]
    fn test_ordering_predicates() {
        assert_eq!(lt(ClockOrdering::Before), True);
        assert_eq!(lt(ClockOrdering::Equal), False);
        assert_eq!(le(ClockOrdering::Equal), True);
        assert_eq!(eq(ClockOrdering::After), False);
        assert_eq!(eq(ClockOrdering::Concurrent), Indeterminate);
    }
}

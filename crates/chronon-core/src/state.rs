//! Lifecycle states of a temporal object

use std::fmt;

/// Lifecycle state
///
/// `Unforged → Forged → Finished`; `Finished` is terminal and no transition
/// ever leads back to `Unforged`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LifecycleState {
    /// Has identity, no usable extent
    #[default]
    Unforged,
    /// Has a start instant, end still open
    Forged,
    /// Has both start and end instants
    Finished,
}

impl LifecycleState {
    /// Relation queries are permitted
    #[inline]
    pub fn is_forged(self) -> bool {
        self != LifecycleState::Unforged
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == LifecycleState::Finished
    }

    /// Whether the lifecycle may move from `self` to `next`
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        matches!(
            (self, next),
            (LifecycleState::Unforged, LifecycleState::Forged)
                | (LifecycleState::Forged, LifecycleState::Finished)
        )
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Unforged => f.write_str("unforged"),
            LifecycleState::Forged => f.write_str("forged"),
            LifecycleState::Finished => f.write_str("finished"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        use LifecycleState::*;

        assert!(Unforged.can_transition_to(Forged));
        assert!(Forged.can_transition_to(Finished));
        assert!(!Unforged.can_transition_to(Finished));
        assert!(!Finished.can_transition_to(Unforged));
        assert!(!Finished.can_transition_to(Forged));
        assert!(!Forged.can_transition_to(Unforged));
    }

    #[test]
    fn test_state_predicates() {
        assert!(!LifecycleState::Unforged.is_forged());
        assert!(LifecycleState::Forged.is_forged());
        assert!(LifecycleState::Finished.is_forged());
        assert!(LifecycleState::Finished.is_terminal());
        assert_eq!(LifecycleState::default(), LifecycleState::Unforged);
    }
}

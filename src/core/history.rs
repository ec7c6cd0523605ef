//! Transition history tracking.
//!
//! Every applied transition is appended to an immutable history. Rejected
//! events never reach it.

use super::event::EventKind;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use authflow::core::{EventKind, Phase, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Phase::Booting,
///     to: Phase::Unauthenticated,
///     event: EventKind::RestoreToken,
///     timestamp: Utc::now(),
/// };
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that triggered it
    pub event: EventKind,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of transitions.
///
/// `record` returns a new history with the transition appended and leaves
/// the receiver untouched.
///
/// # Example
///
/// ```rust
/// use authflow::core::{EventKind, Phase, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new();
///
/// let history = history.record(StateTransition {
///     from: Phase::Booting,
///     to: Phase::Unauthenticated,
///     event: EventKind::RestoreToken,
///     timestamp: Utc::now(),
/// });
///
/// let history = history.record(StateTransition {
///     from: Phase::Unauthenticated,
///     to: Phase::Authenticated,
///     event: EventKind::SignIn,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.path();
/// assert_eq!(path, vec![&Phase::Booting, &Phase::Unauthenticated, &Phase::Authenticated]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first `from`, then each `to` in order.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last transition, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Phase;

    fn transition(from: Phase, to: Phase, event: EventKind) -> StateTransition<Phase> {
        StateTransition {
            from,
            to,
            event,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<Phase> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(transition(
            Phase::Booting,
            Phase::Unauthenticated,
            EventKind::RestoreToken,
        ));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(transition(
                Phase::Booting,
                Phase::Authenticated,
                EventKind::RestoreToken,
            ))
            .record(transition(
                Phase::Authenticated,
                Phase::Unauthenticated,
                EventKind::SignOut,
            ));

        assert_eq!(
            history.path(),
            vec![
                &Phase::Booting,
                &Phase::Authenticated,
                &Phase::Unauthenticated
            ]
        );
        assert_eq!(history.last().map(|t| t.event), Some(EventKind::SignOut));
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let history = StateHistory::new()
            .record(StateTransition {
                from: Phase::Booting,
                to: Phase::Unauthenticated,
                event: EventKind::RestoreToken,
                timestamp: start,
            })
            .record(StateTransition {
                from: Phase::Unauthenticated,
                to: Phase::Authenticated,
                event: EventKind::SignIn,
                timestamp: start + chrono::Duration::milliseconds(25),
            });

        assert_eq!(history.duration(), Some(Duration::from_millis(25)));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history = StateHistory::new().record(transition(
            Phase::Booting,
            Phase::Unauthenticated,
            EventKind::RestoreToken,
        ));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(transition(
            Phase::Booting,
            Phase::Unauthenticated,
            EventKind::RestoreToken,
        ));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<Phase> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.transitions().len(), 1);
        assert_eq!(deserialized.path(), history.path());
    }
}

//! Session machine: the single owner of `SessionState`.

use crate::core::{
    present, select_screen, EventKind, Phase, Presentation, Screen, SessionEvent, SessionState,
    State, StateHistory, StateTransition,
};
use crate::machine::transition::{accepts, reduce, TransitionError};
use chrono::Utc;

/// Result of a successful dispatch
#[derive(Clone, Debug, PartialEq)]
pub struct Applied {
    pub from: Phase,
    pub to: Phase,
    /// Screen selected from the new state.
    pub screen: Screen,
}

/// Owns the session state and applies events one at a time.
///
/// `dispatch` takes `&mut self`, so two events can never be applied to the
/// same machine concurrently.
pub struct SessionMachine {
    state: SessionState,
    history: StateHistory<Phase>,
}

impl SessionMachine {
    /// Create a machine in the booting state
    pub fn new() -> Self {
        Self {
            state: SessionState::booting(),
            history: StateHistory::new(),
        }
    }

    /// Get current state (pure)
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Screen for the current state, recomputed on every call.
    pub fn screen(&self) -> Screen {
        select_screen(&self.state)
    }

    pub fn presentation(&self) -> Presentation {
        present(&self.state)
    }

    /// Get transition history (pure)
    pub fn history(&self) -> &StateHistory<Phase> {
        &self.history
    }

    /// Whether an event of this kind would be accepted right now.
    pub fn can_dispatch(&self, event: EventKind) -> bool {
        accepts(self.phase(), event)
    }

    /// Fail with the same error `dispatch` would return for this kind.
    pub fn ensure_accepts(&self, event: EventKind) -> Result<(), TransitionError> {
        if self.can_dispatch(event) {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition {
                event,
                from: self.phase(),
            })
        }
    }

    /// Apply one event.
    ///
    /// On error the state and history are left exactly as they were.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<Applied, TransitionError> {
        let kind = event.kind();
        let from = self.phase();

        let next = reduce(&self.state, event).inspect_err(|err| {
            tracing::warn!(event = kind.name(), from = from.name(), %err, "event rejected");
        })?;

        self.state = next;
        let to = self.phase();
        self.history = self.history.record(StateTransition {
            from,
            to,
            event: kind,
            timestamp: Utc::now(),
        });

        tracing::info!(
            event = kind.name(),
            from = from.name(),
            to = to.name(),
            "session transition"
        );

        Ok(Applied {
            from,
            to,
            screen: self.screen(),
        })
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

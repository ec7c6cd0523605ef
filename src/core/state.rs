//! Session state and the phases derived from it.
//!
//! `SessionState` is the three-field value the machine owns. `Phase` is the
//! coarse position in the flow, always computed from the fields and never
//! stored alongside them.

use super::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for named, comparable state values.
///
/// Implementors are plain values: cloning and comparing them has no side
/// effects, and `name` is stable for the lifetime of the value.
///
/// # Example
///
/// ```rust
/// use authflow::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display and logging.
    fn name(&self) -> &str;
}

crate::state_enum! {
    /// Position of a session in the authentication flow.
    pub enum Phase {
        /// Persisted token not yet restored.
        Booting,
        /// Restored or signed out, no token held.
        Unauthenticated,
        /// Token held.
        Authenticated,
    }
}

/// The session's view state.
///
/// Created once per process in the booting configuration and changed only
/// through [`SessionMachine::dispatch`](crate::machine::SessionMachine::dispatch).
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SessionState {
    /// True until the first `RestoreToken` event has been applied.
    pub loading: bool,
    /// True right after a sign-out; only selects the animation hint.
    pub signed_out: bool,
    /// Present iff the user is authenticated.
    pub token: Option<Token>,
}

impl SessionState {
    /// The state every session starts in.
    pub fn booting() -> Self {
        Self {
            loading: true,
            signed_out: false,
            token: None,
        }
    }

    /// Derive the phase from the fields.
    pub fn phase(&self) -> Phase {
        match (self.loading, &self.token) {
            (true, _) => Phase::Booting,
            (false, None) => Phase::Unauthenticated,
            (false, Some(_)) => Phase::Authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == Phase::Authenticated
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::booting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booting_state_has_no_token() {
        let state = SessionState::booting();
        assert!(state.loading);
        assert!(!state.signed_out);
        assert!(state.token.is_none());
        assert_eq!(state.phase(), Phase::Booting);
    }

    #[test]
    fn loading_wins_over_token() {
        let state = SessionState {
            loading: true,
            signed_out: false,
            token: Some(Token::new("abc")),
        };
        assert_eq!(state.phase(), Phase::Booting);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn phase_follows_token_once_loaded() {
        let mut state = SessionState {
            loading: false,
            signed_out: false,
            token: None,
        };
        assert_eq!(state.phase(), Phase::Unauthenticated);

        state.token = Some(Token::new("abc"));
        assert_eq!(state.phase(), Phase::Authenticated);
        assert!(state.is_authenticated());
    }

    #[test]
    fn phase_names_are_stable() {
        assert_eq!(Phase::Booting.name(), "Booting");
        assert_eq!(Phase::Unauthenticated.name(), "Unauthenticated");
        assert_eq!(Phase::Authenticated.name(), "Authenticated");
    }

    #[test]
    fn phase_serializes_correctly() {
        let phase = Phase::Authenticated;
        let json = serde_json::to_string(&phase).unwrap();
        let deserialized: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(phase, deserialized);
    }
}

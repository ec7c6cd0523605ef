//! The session reducer.
//!
//! `reduce` is the single site where events meet state. Every accepted
//! (phase, event) pair is listed; everything else is rejected.

use crate::core::{EventKind, Phase, SessionEvent, SessionState, State};

/// Errors that can occur when applying an event
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("Event '{}' is not accepted in state '{}'", .event.name(), .from.name())]
    InvalidTransition { event: EventKind, from: Phase },
}

/// Whether `event` is accepted from `phase` (pure).
pub fn accepts(phase: Phase, event: EventKind) -> bool {
    matches!(
        (phase, event),
        (Phase::Booting, EventKind::RestoreToken)
            | (Phase::Unauthenticated, EventKind::SignIn)
            | (Phase::Authenticated, EventKind::SignOut)
    )
}

/// Compute the state that follows `event`.
///
/// Pure: the previous state is only read. A repeated `SignIn` while already
/// authenticated is rejected rather than overwriting the token.
pub fn reduce(state: &SessionState, event: SessionEvent) -> Result<SessionState, TransitionError> {
    let from = state.phase();
    match (from, event) {
        (Phase::Booting, SessionEvent::RestoreToken(token)) => Ok(SessionState {
            loading: false,
            signed_out: state.signed_out,
            token,
        }),
        (Phase::Unauthenticated, SessionEvent::SignIn(token)) => Ok(SessionState {
            loading: false,
            signed_out: false,
            token: Some(token),
        }),
        (Phase::Authenticated, SessionEvent::SignOut) => Ok(SessionState {
            loading: false,
            signed_out: true,
            token: None,
        }),
        (from, event) => Err(TransitionError::InvalidTransition {
            event: event.kind(),
            from,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Token;

    fn unauthenticated() -> SessionState {
        SessionState {
            loading: false,
            signed_out: false,
            token: None,
        }
    }

    fn authenticated(token: &str) -> SessionState {
        SessionState {
            loading: false,
            signed_out: false,
            token: Some(Token::new(token)),
        }
    }

    #[test]
    fn restore_without_token_is_unauthenticated() {
        let next = reduce(&SessionState::booting(), SessionEvent::RestoreToken(None)).unwrap();
        assert_eq!(next.phase(), Phase::Unauthenticated);
        assert!(!next.loading);
    }

    #[test]
    fn restore_with_token_is_authenticated() {
        let next = reduce(
            &SessionState::booting(),
            SessionEvent::RestoreToken(Some(Token::new("abc"))),
        )
        .unwrap();
        assert_eq!(next.phase(), Phase::Authenticated);
        assert_eq!(next.token, Some(Token::new("abc")));
    }

    #[test]
    fn sign_in_sets_token_and_clears_signed_out() {
        let mut state = unauthenticated();
        state.signed_out = true;

        let next = reduce(&state, SessionEvent::SignIn(Token::new("tok1"))).unwrap();
        assert_eq!(next, authenticated("tok1"));
    }

    #[test]
    fn sign_out_clears_token() {
        let next = reduce(&authenticated("tok1"), SessionEvent::SignOut).unwrap();
        assert_eq!(
            next,
            SessionState {
                loading: false,
                signed_out: true,
                token: None,
            }
        );
    }

    #[test]
    fn repeated_sign_in_is_rejected() {
        let result = reduce(&authenticated("tok1"), SessionEvent::SignIn(Token::new("tok2")));
        assert_eq!(
            result,
            Err(TransitionError::InvalidTransition {
                event: EventKind::SignIn,
                from: Phase::Authenticated,
            })
        );
    }

    #[test]
    fn restore_after_boot_is_rejected() {
        let result = reduce(&unauthenticated(), SessionEvent::RestoreToken(None));
        assert!(result.is_err());
    }

    #[test]
    fn events_before_restore_are_rejected() {
        let booting = SessionState::booting();
        assert!(reduce(&booting, SessionEvent::SignIn(Token::new("t"))).is_err());
        assert!(reduce(&booting, SessionEvent::SignOut).is_err());
    }

    #[test]
    fn accepts_matches_reduce() {
        let states = [
            SessionState::booting(),
            unauthenticated(),
            authenticated("t"),
        ];
        let events = [
            SessionEvent::RestoreToken(None),
            SessionEvent::SignIn(Token::new("t")),
            SessionEvent::SignOut,
        ];
        for state in &states {
            for event in &events {
                assert_eq!(
                    accepts(state.phase(), event.kind()),
                    reduce(state, event.clone()).is_ok()
                );
            }
        }
    }

    #[test]
    fn error_message_names_event_and_state() {
        let err = reduce(&SessionState::booting(), SessionEvent::SignOut).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Event 'SignOut' is not accepted in state 'Booting'"
        );
    }
}

//! Property-based tests for the session machine.
//!
//! These tests use proptest to drive the machine with random event
//! sequences and check the invariants hold after every step.

use authflow::core::{select_screen, Phase, Screen, SessionEvent, SessionState, Token};
use authflow::machine::{accepts, reduce, SessionMachine};
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_token()(value in "[a-z0-9]{1,12}") -> Token {
        Token::new(value)
    }
}

fn arbitrary_event() -> impl Strategy<Value = SessionEvent> {
    prop_oneof![
        proptest::option::of(arbitrary_token()).prop_map(SessionEvent::RestoreToken),
        arbitrary_token().prop_map(SessionEvent::SignIn),
        Just(SessionEvent::SignOut),
    ]
}

proptest! {
    #[test]
    fn token_present_iff_home(events in prop::collection::vec(arbitrary_event(), 0..30)) {
        let mut machine = SessionMachine::new();
        for event in events {
            let _ = machine.dispatch(event);
            prop_assert_eq!(
                machine.state().token.is_some(),
                machine.screen() == Screen::Home
            );
        }
    }

    #[test]
    fn loading_never_returns(events in prop::collection::vec(arbitrary_event(), 0..30)) {
        let mut machine = SessionMachine::new();
        let mut restored = false;
        for event in events {
            let is_restore = matches!(event, SessionEvent::RestoreToken(_));
            if machine.dispatch(event).is_ok() && is_restore {
                restored = true;
            }
            prop_assert_eq!(machine.state().loading, !restored);
        }
    }

    #[test]
    fn rejected_events_change_nothing(events in prop::collection::vec(arbitrary_event(), 0..30)) {
        let mut machine = SessionMachine::new();
        for event in events {
            let before = machine.state().clone();
            let recorded = machine.history().transitions().len();
            if machine.dispatch(event).is_err() {
                prop_assert_eq!(machine.state(), &before);
                prop_assert_eq!(machine.history().transitions().len(), recorded);
            }
        }
    }

    #[test]
    fn history_path_ends_at_current_phase(
        events in prop::collection::vec(arbitrary_event(), 1..30)
    ) {
        let mut machine = SessionMachine::new();
        for event in events {
            let _ = machine.dispatch(event);
        }

        let path = machine.history().path();
        if let Some(last) = path.last() {
            prop_assert_eq!(**last, machine.phase());
            prop_assert_eq!(*path[0], Phase::Booting);
        }
    }

    #[test]
    fn reduce_agrees_with_accepts(
        loading in any::<bool>(),
        signed_out in any::<bool>(),
        token in proptest::option::of(arbitrary_token()),
        event in arbitrary_event(),
    ) {
        let state = SessionState { loading, signed_out, token };
        prop_assert_eq!(
            reduce(&state, event.clone()).is_ok(),
            accepts(state.phase(), event.kind())
        );
    }

    #[test]
    fn screen_follows_phase(
        loading in any::<bool>(),
        signed_out in any::<bool>(),
        token in proptest::option::of(arbitrary_token()),
    ) {
        let state = SessionState { loading, signed_out, token };
        let expected = match state.phase() {
            Phase::Booting => Screen::Splash,
            Phase::Unauthenticated => Screen::SignIn,
            Phase::Authenticated => Screen::Home,
        };
        prop_assert_eq!(select_screen(&state), expected);
        prop_assert_eq!(select_screen(&state), select_screen(&state.clone()));
        if state.loading {
            prop_assert_eq!(select_screen(&state), Screen::Splash);
        }
    }

    #[test]
    fn restore_sets_token_verbatim(token in proptest::option::of(arbitrary_token())) {
        let next = reduce(&SessionState::booting(), SessionEvent::RestoreToken(token.clone())).unwrap();
        prop_assert!(!next.loading);
        prop_assert_eq!(next.token, token);
    }

    #[test]
    fn sign_out_always_pops(token in arbitrary_token()) {
        let state = SessionState { loading: false, signed_out: false, token: Some(token) };
        let next = reduce(&state, SessionEvent::SignOut).unwrap();
        prop_assert!(next.signed_out);
        prop_assert!(next.token.is_none());
        prop_assert_eq!(select_screen(&next), Screen::SignIn);
    }
}

//! Active screen selection.
//!
//! The presentation layer asks for the screen after every transition. The
//! selection is a pure function of [`SessionState`]; nothing here is cached.

use super::state::{Phase, SessionState};
use serde::{Deserialize, Serialize};

crate::state_enum! {
    /// The single screen presented to the user.
    pub enum Screen {
        Splash,
        SignIn,
        Home,
    }
}

crate::state_enum! {
    /// How the navigator should replace the previous screen.
    pub enum Animation {
        Push,
        Pop,
    }
}

/// Everything the presentation layer needs to render the current step.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Presentation {
    pub screen: Screen,
    pub animation: Animation,
    /// Session id shown on the Home screen.
    pub session_id: Option<String>,
}

/// Map a state to its screen.
///
/// # Example
///
/// ```rust
/// use authflow::core::{select_screen, Screen, SessionState};
///
/// assert_eq!(select_screen(&SessionState::booting()), Screen::Splash);
/// ```
pub fn select_screen(state: &SessionState) -> Screen {
    match state.phase() {
        Phase::Booting => Screen::Splash,
        Phase::Unauthenticated => Screen::SignIn,
        Phase::Authenticated => Screen::Home,
    }
}

/// Pop after a sign-out, push otherwise.
pub fn select_animation(state: &SessionState) -> Animation {
    if state.signed_out {
        Animation::Pop
    } else {
        Animation::Push
    }
}

pub fn present(state: &SessionState) -> Presentation {
    let screen = select_screen(state);
    let session_id = match screen {
        Screen::Home => state.token.as_ref().map(|t| t.expose().to_string()),
        Screen::Splash | Screen::SignIn => None,
    };
    Presentation {
        screen,
        animation: select_animation(state),
        session_id,
    }
}

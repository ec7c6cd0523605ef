//! Events accepted by the session machine.

use super::token::Token;

crate::state_enum! {
    /// Discriminant of a [`SessionEvent`], for logging and history records.
    pub enum EventKind {
        RestoreToken,
        SignIn,
        SignOut,
    }
}

/// Input to the session machine. Each variant is one transition trigger.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SessionEvent {
    /// Bootstrap finished reading the store; `None` covers both "no token"
    /// and "storage unreadable".
    RestoreToken(Option<Token>),
    /// A remote authentication (or local sign-up) produced a token.
    SignIn(Token),
    /// The remote sign-out call succeeded.
    SignOut,
}

impl SessionEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::RestoreToken(_) => EventKind::RestoreToken,
            Self::SignIn(_) => EventKind::SignIn,
            Self::SignOut => EventKind::SignOut,
        }
    }
}

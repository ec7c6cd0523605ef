//! Authflow: session state machine for a sign-in flow
//!
//! Authflow keeps a pure core and an imperative shell apart. The core is a
//! reducer over a three-field session state; the shell restores the persisted
//! token, talks to the auth server, and feeds exactly one event into the
//! machine per completed call.
//!
//! # Core Concepts
//!
//! - **SessionState**: `loading`, `signed_out` and an optional token
//! - **Events**: `RestoreToken`, `SignIn`, `SignOut`, applied one at a time
//! - **Screens**: Splash, SignIn or Home, a pure function of state
//! - **AuthSession**: the owned context the presentation layer talks to
//!
//! # Example
//!
//! ```rust
//! use authflow::core::{Screen, SessionEvent, Token};
//! use authflow::machine::SessionMachine;
//!
//! let mut machine = SessionMachine::new();
//! assert_eq!(machine.screen(), Screen::Splash);
//!
//! machine.dispatch(SessionEvent::RestoreToken(None)).unwrap();
//! assert_eq!(machine.screen(), Screen::SignIn);
//!
//! machine.dispatch(SessionEvent::SignIn(Token::new("abc"))).unwrap();
//! assert_eq!(machine.screen(), Screen::Home);
//!
//! // a second sign-in is rejected and changes nothing
//! assert!(machine.dispatch(SessionEvent::SignIn(Token::new("xyz"))).is_err());
//! ```

mod macros;

pub mod client;
pub mod config;
pub mod core;
pub mod credentials;
pub mod machine;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use client::{AuthApi, AuthError, HttpAuthClient};
pub use config::AuthConfig;
pub use crate::core::{Phase, Presentation, Screen, SessionEvent, SessionState, State, Token};
pub use credentials::Credentials;
pub use machine::{SessionMachine, TransitionError};
pub use session::{AuthSession, SessionError};
pub use storage::{FileStore, MemoryStore, StorageError, TokenStore};

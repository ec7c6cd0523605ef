//! Pure session types.
//!
//! - `SessionState` and the `Phase` derived from it
//! - `SessionEvent`, the only way state changes
//! - Screen selection for the presentation layer
//! - Immutable transition history
//!
//! Nothing in this module performs I/O.

mod event;
mod history;
mod screen;
mod state;
mod token;

pub use event::{EventKind, SessionEvent};
pub use history::{StateHistory, StateTransition};
pub use screen::{present, select_animation, select_screen, Animation, Presentation, Screen};
pub use state::{Phase, SessionState, State};
pub use token::Token;

//! The session state machine.
//!
//! `transition` holds the pure reducer; `state_machine` wraps it with the
//! owned state, history recording and logging.

mod state_machine;
mod transition;

pub use state_machine::{Applied, SessionMachine};
pub use transition::{accepts, reduce, TransitionError};

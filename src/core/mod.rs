//! Core building blocks shared by every state machine.
//!
//! This module contains the pieces a state implementation touches:
//! - The `State` capability and its optional hooks
//! - Outcome sets and the shared `Blackboard`
//! - Cooperative cancellation flags
//! - Per-run transition history
//! - `CallbackState`, a closure-backed leaf state

mod blackboard;
mod callback;
mod cancel;
mod history;
mod outcome;
mod state;

pub use blackboard::Blackboard;
pub use callback::CallbackState;
pub use cancel::CancellationFlag;
pub use history::{ExecutionHistory, Target, TransitionRecord};
pub use outcome::Outcomes;
pub use state::{State, StateHooks};

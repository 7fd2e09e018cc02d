//! The state machine executor.
//!
//! This module runs the states described in [`crate::core`]:
//! - **Transition tables**: map each state's outcomes to the next state or
//!   to one of the machine's outcomes
//! - **Executor**: the `StateMachine` loop, including hook firing and
//!   cancellation forwarding
//! - **Errors**: the fatal conditions that abort a run

mod error;
mod state_machine;
mod transition;

pub use error::ExecutionError;
pub use state_machine::StateMachine;
pub use transition::{resolve, Resolution, TransitionTable};

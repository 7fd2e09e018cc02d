//! Execution error types.

use thiserror::Error;

/// Errors that abort `StateMachine::execute`.
///
/// None of these are retried by the machine; the caller decides whether
/// to run again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutionError {
    /// A state returned a label outside its own declared outcomes.
    #[error("Outcome '{outcome}' is not registered in state '{state}'")]
    UnregisteredOutcome { state: String, outcome: String },

    /// A (possibly translated) outcome names neither a machine outcome nor a state.
    #[error("Outcome '{outcome}' from state '{state}' has no transition")]
    DanglingTransition { state: String, outcome: String },

    #[error("State machine has no states")]
    NoStates,

    #[error("Start state '{name}' is not registered")]
    UnknownStartState { name: String },

    /// Raised by a state body or hook.
    #[error("State failed: {reason}")]
    StateFailed { reason: String },
}

impl ExecutionError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::StateFailed {
            reason: reason.into(),
        }
    }

    /// Name of the state the error points at, when it names one.
    pub fn state(&self) -> Option<&str> {
        match self {
            Self::UnregisteredOutcome { state, .. } | Self::DanglingTransition { state, .. } => {
                Some(state)
            }
            Self::UnknownStartState { name } => Some(name),
            Self::NoStates | Self::StateFailed { .. } => None,
        }
    }
}

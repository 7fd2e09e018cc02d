//! Problems found by static validation.

use thiserror::Error;

/// A problem in a machine definition that would surface at run time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("State machine has no states")]
    NoStates,

    #[error("Start state '{0}' is not registered")]
    MissingStartState(String),

    #[error("Transition key '{outcome}' is not an outcome of state '{state}'")]
    UnknownTransitionKey { state: String, outcome: String },

    #[error("Outcome '{outcome}' of state '{state}' leads to unknown target '{target}'")]
    DanglingTarget {
        state: String,
        outcome: String,
        target: String,
    },

    /// Resolves as the machine outcome at run time; the state is unreachable this way.
    #[error("Outcome '{outcome}' of state '{state}' targets '{target}', which is both a machine outcome and a state")]
    AmbiguousTarget {
        state: String,
        outcome: String,
        target: String,
    },

    #[error("Outcome '{outcome}' of state '{state}' has no transition")]
    UnhandledOutcome { state: String, outcome: String },
}

//! Build errors for state machine construction.

use crate::validation::ValidationIssue;
use thiserror::Error;

/// Errors that can occur when assembling a state machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("State '{name}' is already registered")]
    DuplicateState { name: String },

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("State machine failed validation with {} issue(s)", .0.len())]
    Invalid(Vec<ValidationIssue>),
}

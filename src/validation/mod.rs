//! Optional static validation of machine definitions.
//!
//! The executor checks outcomes lazily: a bad transition only fails once a
//! run reaches it. This module finds the same problems up front, using
//! Stillwater's `Validation` type to report ALL of them in one pass instead
//! of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use jugglebot_fsm::core::CallbackState;
//! use jugglebot_fsm::validation::{validate, ValidationIssue};
//! use jugglebot_fsm::StateMachine;
//! use std::sync::Arc;
//! use stillwater::validation::Validation;
//!
//! let mut sm = StateMachine::new(["SUCCEEDED"]);
//! sm.add_state(
//!     "THROW",
//!     Arc::new(CallbackState::new(["thrown"], |_, _| Ok("thrown".into()))),
//!     [("thrown", "CATCH")],
//! )
//! .unwrap();
//!
//! match validate(&sm) {
//!     Validation::Failure(issues) => assert!(issues
//!         .iter()
//!         .any(|i| matches!(i, ValidationIssue::DanglingTarget { .. }))),
//!     Validation::Success(_) => panic!("CATCH is not registered"),
//! }
//! ```

pub mod issues;
pub mod rules;

pub use issues::ValidationIssue;
pub use rules::validate;

use crate::machine::StateMachine;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

impl StateMachine {
    /// Statically check this machine's transitions.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ValidationIssue>> {
        rules::validate(self)
    }
}

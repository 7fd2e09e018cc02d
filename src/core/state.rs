//! The `State` capability shared by leaf states and whole machines.
//!
//! A state is an opaque unit of work that finishes with one of its
//! declared outcomes. `StateMachine` implements the same trait, which is
//! how machines nest inside one another.

use super::blackboard::Blackboard;
use super::outcome::Outcomes;
use crate::machine::ExecutionError;

/// Which optional lifecycle hooks a state implements.
///
/// The executor only calls [`State::on_enter`] / [`State::on_exit`] when
/// the matching flag is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateHooks {
    pub enter: bool,
    pub exit: bool,
}

impl StateHooks {
    pub const NONE: Self = Self {
        enter: false,
        exit: false,
    };

    pub const BOTH: Self = Self {
        enter: true,
        exit: true,
    };
}

/// Trait for units of work driven by a [`StateMachine`](crate::StateMachine).
///
/// # Contract
///
/// - [`outcomes`](State::outcomes) is fixed for the lifetime of the state.
/// - [`execute`](State::execute) returns one of those outcomes; anything
///   else aborts the enclosing machine with
///   [`ExecutionError::UnregisteredOutcome`].
/// - [`cancel`](State::cancel) may be called from another thread while
///   `execute` is running. Cancellation is cooperative: the body should
///   notice it and return promptly.
/// - A cancel stays pending until [`reset_cancel`](State::reset_cancel).
///   The enclosing machine clears it when a dwell begins and when its run
///   ends, so a state re-invoked in place still sees a late cancel.
///
/// # Example
///
/// ```rust
/// use jugglebot_fsm::core::{Blackboard, CancellationFlag, Outcomes, State};
/// use jugglebot_fsm::ExecutionError;
///
/// struct HomeArm {
///     outcomes: Outcomes,
///     cancel: CancellationFlag,
/// }
///
/// impl State for HomeArm {
///     fn outcomes(&self) -> &Outcomes {
///         &self.outcomes
///     }
///
///     fn execute(&self, blackboard: &mut Blackboard) -> Result<String, ExecutionError> {
///         if self.cancel.is_canceled() {
///             return Ok("canceled".into());
///         }
///         blackboard.insert("arm_homed", true);
///         Ok("homed".into())
///     }
///
///     fn cancel(&self) {
///         self.cancel.cancel();
///     }
///
///     fn is_canceled(&self) -> bool {
///         self.cancel.is_canceled()
///     }
///
///     fn reset_cancel(&self) {
///         self.cancel.reset();
///     }
/// }
///
/// let state = HomeArm {
///     outcomes: Outcomes::new(["homed", "canceled"]),
///     cancel: CancellationFlag::new(),
/// };
/// let mut blackboard = Blackboard::new();
/// assert_eq!(state.execute(&mut blackboard).unwrap(), "homed");
/// assert_eq!(blackboard.get::<bool>("arm_homed"), Some(&true));
/// ```
pub trait State: Send + Sync {
    /// Outcome labels this state may finish with.
    fn outcomes(&self) -> &Outcomes;

    /// Run the state body to completion.
    fn execute(&self, blackboard: &mut Blackboard) -> Result<String, ExecutionError>;

    /// Request cooperative cancellation.
    fn cancel(&self);

    fn is_canceled(&self) -> bool;

    /// Clear a pending cancellation.
    fn reset_cancel(&self);

    /// Report the optional hooks this state implements.
    ///
    /// Default implementation reports none.
    fn hooks(&self) -> StateHooks {
        StateHooks::NONE
    }

    /// Called when the machine starts a dwell in this state.
    ///
    /// `previous` is the name of the state that was active before, or
    /// `None` at the start of a run.
    fn on_enter(
        &self,
        _blackboard: &mut Blackboard,
        _previous: Option<&str>,
    ) -> Result<(), ExecutionError> {
        Ok(())
    }

    /// Called when the machine leaves this state.
    fn on_exit(&self, _blackboard: &mut Blackboard) -> Result<(), ExecutionError> {
        Ok(())
    }

    /// Names of the active states below this one, outermost first.
    ///
    /// Leaf states have nothing below them.
    fn active_path(&self) -> Vec<String> {
        Vec::new()
    }
}

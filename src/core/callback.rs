//! Leaf state backed by closures.

use super::blackboard::Blackboard;
use super::cancel::CancellationFlag;
use super::outcome::Outcomes;
use super::state::{State, StateHooks};
use crate::machine::ExecutionError;
use std::fmt;

type Body =
    Box<dyn Fn(&mut Blackboard, &CancellationFlag) -> Result<String, ExecutionError> + Send + Sync>;
type EnterHook =
    Box<dyn Fn(&mut Blackboard, Option<&str>) -> Result<(), ExecutionError> + Send + Sync>;
type ExitHook = Box<dyn Fn(&mut Blackboard) -> Result<(), ExecutionError> + Send + Sync>;

/// A leaf state whose body is a closure.
///
/// The body receives the blackboard and the state's cancellation flag.
/// A cancel stays pending across invocations until the enclosing machine
/// clears it at the next dwell boundary, so a body that returns just after
/// a cancel lands sees it on its next invocation.
///
/// # Example
///
/// ```rust
/// use jugglebot_fsm::core::{Blackboard, CallbackState, State};
///
/// let count_throws = CallbackState::new(["thrown", "canceled"], |bb, cancel| {
///     if cancel.is_canceled() {
///         return Ok("canceled".to_string());
///     }
///     *bb.get_mut::<u32>("throws").unwrap() += 1;
///     Ok("thrown".to_string())
/// });
///
/// let mut bb = Blackboard::new();
/// bb.insert("throws", 0_u32);
/// assert_eq!(count_throws.execute(&mut bb).unwrap(), "thrown");
/// assert_eq!(bb.get::<u32>("throws"), Some(&1));
/// ```
pub struct CallbackState {
    outcomes: Outcomes,
    body: Body,
    on_enter: Option<EnterHook>,
    on_exit: Option<ExitHook>,
    cancel: CancellationFlag,
}

impl CallbackState {
    pub fn new<I, T, F>(outcomes: I, body: F) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        F: Fn(&mut Blackboard, &CancellationFlag) -> Result<String, ExecutionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            outcomes: Outcomes::new(outcomes),
            body: Box::new(body),
            on_enter: None,
            on_exit: None,
            cancel: CancellationFlag::new(),
        }
    }

    pub fn with_on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Blackboard, Option<&str>) -> Result<(), ExecutionError> + Send + Sync + 'static,
    {
        self.on_enter = Some(Box::new(hook));
        self
    }

    pub fn with_on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Blackboard) -> Result<(), ExecutionError> + Send + Sync + 'static,
    {
        self.on_exit = Some(Box::new(hook));
        self
    }
}

impl State for CallbackState {
    fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    fn execute(&self, blackboard: &mut Blackboard) -> Result<String, ExecutionError> {
        (self.body)(blackboard, &self.cancel)
    }

    fn cancel(&self) {
        self.cancel.cancel();
    }

    fn is_canceled(&self) -> bool {
        self.cancel.is_canceled()
    }

    fn reset_cancel(&self) {
        self.cancel.reset();
    }

    fn hooks(&self) -> StateHooks {
        StateHooks {
            enter: self.on_enter.is_some(),
            exit: self.on_exit.is_some(),
        }
    }

    fn on_enter(
        &self,
        blackboard: &mut Blackboard,
        previous: Option<&str>,
    ) -> Result<(), ExecutionError> {
        match &self.on_enter {
            Some(hook) => hook(blackboard, previous),
            None => Ok(()),
        }
    }

    fn on_exit(&self, blackboard: &mut Blackboard) -> Result<(), ExecutionError> {
        match &self.on_exit {
            Some(hook) => hook(blackboard),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for CallbackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackState")
            .field("outcomes", &self.outcomes)
            .field("hooks", &self.hooks())
            .field("canceled", &self.cancel.is_canceled())
            .finish()
    }
}

//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::MachineConfig;
use crate::core::{Outcomes, State};
use crate::machine::{StateMachine, TransitionTable};
use std::sync::Arc;
use stillwater::validation::Validation;

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use jugglebot_fsm::builder::StateMachineBuilder;
/// use jugglebot_fsm::core::{Blackboard, CallbackState};
/// use jugglebot_fsm::transitions;
///
/// let machine = StateMachineBuilder::new(["SUCCEEDED", "ABORTED"])
///     .validate_on_build(true)
///     .state(
///         "THROW",
///         CallbackState::new(["thrown", "fault"], |_, _| Ok("thrown".into())),
///         transitions! { "thrown" => "CATCH", "fault" => "ABORTED" },
///     )
///     .state(
///         "CATCH",
///         CallbackState::new(["caught", "missed"], |_, _| Ok("caught".into())),
///         transitions! { "caught" => "SUCCEEDED", "missed" => "THROW" },
///     )
///     .build()
///     .unwrap();
///
/// let mut blackboard = Blackboard::new();
/// assert_eq!(machine.execute(&mut blackboard).unwrap(), "SUCCEEDED");
/// ```
pub struct StateMachineBuilder {
    outcomes: Outcomes,
    config: MachineConfig,
    states: Vec<(String, Arc<dyn State>, TransitionTable)>,
    start: Option<String>,
}

impl StateMachineBuilder {
    /// Create a new builder for a machine finishing with `outcomes`.
    pub fn new<I, T>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            outcomes: Outcomes::new(outcomes),
            config: MachineConfig::default(),
            states: Vec::new(),
            start: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Run static validation in [`build`](Self::build).
    pub fn validate_on_build(mut self, enabled: bool) -> Self {
        self.config.validate_on_build = enabled;
        self
    }

    /// Add a state owned by this machine.
    pub fn state<S>(
        self,
        name: impl Into<String>,
        state: S,
        transitions: impl Into<TransitionTable>,
    ) -> Self
    where
        S: State + 'static,
    {
        self.shared_state(name, Arc::new(state), transitions)
    }

    /// Add a state that may also be referenced elsewhere.
    pub fn shared_state(
        mut self,
        name: impl Into<String>,
        state: Arc<dyn State>,
        transitions: impl Into<TransitionTable>,
    ) -> Self {
        self.states.push((name.into(), state, transitions.into()));
        self
    }

    /// Set the start state. Defaults to the first state added.
    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Build the state machine.
    /// Returns an error on duplicate names, no states, or failed validation.
    pub fn build(self) -> Result<StateMachine, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let validate = self.config.validate_on_build;
        let mut machine = StateMachine::with_config(self.outcomes.iter(), self.config);
        for (name, state, transitions) in self.states {
            machine.add_state(name, state, transitions)?;
        }
        if let Some(start) = self.start {
            machine.set_start_state(start);
        }

        if validate {
            if let Validation::Failure(issues) = machine.validate() {
                return Err(BuildError::Invalid(issues.iter().cloned().collect()));
            }
        }

        Ok(machine)
    }
}

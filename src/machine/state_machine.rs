//! Hierarchical state machine executor.

use crate::builder::{BuildError, MachineConfig};
use crate::core::{
    Blackboard, CancellationFlag, ExecutionHistory, Outcomes, State, StateHooks, Target,
    TransitionRecord,
};
use crate::machine::error::ExecutionError;
use crate::machine::transition::{resolve, Resolution, TransitionTable};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

struct StateEntry {
    state: Arc<dyn State>,
    transitions: TransitionTable,
}

/// Executes named states, following their outcomes through transition
/// tables until one resolves to a machine outcome.
///
/// A `StateMachine` is itself a [`State`], so it can be registered inside
/// another machine. The blackboard passed to the outer machine is handed
/// down unchanged.
///
/// While [`execute`](Self::execute) runs on one thread, other threads may
/// call [`cancel`](Self::cancel), [`notify_error`](Self::notify_error) and
/// [`current_state`](Self::current_state). The cursor lock is never held
/// while a state body runs.
pub struct StateMachine {
    outcomes: Outcomes,
    order: Vec<String>,
    states: HashMap<String, StateEntry>,
    start_state: Option<String>,
    current: Mutex<Option<String>>,
    canceled: CancellationFlag,
    history_limit: usize,
    last_history: Mutex<Option<ExecutionHistory>>,
}

/// Clears the cursor, the last active child's pending cancel and the
/// machine's own cancel flag when a run ends, including by error or panic.
struct RunGuard<'a> {
    machine: &'a StateMachine,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let last = self.machine.current.lock().take();
        if let Some(entry) = last.and_then(|name| self.machine.states.get(&name)) {
            entry.state.reset_cancel();
        }
        self.machine.canceled.reset();
    }
}

fn same_state(a: &Arc<dyn State>, b: &Arc<dyn State>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

impl StateMachine {
    pub fn new<I, T>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_config(outcomes, MachineConfig::default())
    }

    pub fn with_config<I, T>(outcomes: I, config: MachineConfig) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            outcomes: Outcomes::new(outcomes),
            order: Vec::new(),
            states: HashMap::new(),
            start_state: None,
            current: Mutex::new(None),
            canceled: CancellationFlag::new(),
            history_limit: config.history_limit,
            last_history: Mutex::new(None),
        }
    }

    /// Register a state under `name` with its outgoing transitions.
    ///
    /// The first state registered becomes the start state. Names are
    /// unique: registering a name twice fails and leaves the existing
    /// entry untouched.
    pub fn add_state(
        &mut self,
        name: impl Into<String>,
        state: Arc<dyn State>,
        transitions: impl Into<TransitionTable>,
    ) -> Result<&mut Self, BuildError> {
        let name = name.into();
        if self.states.contains_key(&name) {
            return Err(BuildError::DuplicateState { name });
        }
        if self.start_state.is_none() {
            self.start_state = Some(name.clone());
        }
        self.order.push(name.clone());
        self.states.insert(
            name,
            StateEntry {
                state,
                transitions: transitions.into(),
            },
        );
        Ok(self)
    }

    /// Override the start state.
    ///
    /// The name is checked when the machine runs, so it may be set before
    /// the state is added.
    pub fn set_start_state(&mut self, name: impl Into<String>) {
        self.start_state = Some(name.into());
    }

    pub fn start_state(&self) -> Option<&str> {
        self.start_state.as_deref()
    }

    pub fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    /// Registered state names with their transition tables, in insertion order.
    pub fn states(&self) -> impl Iterator<Item = (&str, &TransitionTable)> {
        self.order.iter().filter_map(|name| {
            self.states
                .get(name)
                .map(|entry| (name.as_str(), &entry.transitions))
        })
    }

    pub fn state(&self, name: &str) -> Option<&Arc<dyn State>> {
        self.states.get(name).map(|entry| &entry.state)
    }

    pub fn contains_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Name of the state currently executing at this level.
    ///
    /// Empty when the machine is idle.
    pub fn current_state(&self) -> String {
        self.current.lock().clone().unwrap_or_default()
    }

    /// Active state names from this machine down to the running leaf.
    pub fn active_path(&self) -> Vec<String> {
        let (name, child) = {
            let current = self.current.lock();
            match current.as_ref() {
                Some(name) => (
                    name.clone(),
                    self.states.get(name).map(|e| Arc::clone(&e.state)),
                ),
                None => return Vec::new(),
            }
        };
        let mut path = vec![name];
        if let Some(child) = child {
            path.extend(child.active_path());
        }
        path
    }

    /// Name of the leaf state actually running, through any depth of nesting.
    pub fn active_leaf(&self) -> Option<String> {
        self.active_path().pop()
    }

    /// History of the most recent run, once one has started.
    pub fn last_history(&self) -> Option<ExecutionHistory> {
        self.last_history.lock().clone()
    }

    /// Request cancellation of this machine and its active child.
    ///
    /// Forwarding recurses through nested machines down to the running leaf.
    pub fn cancel(&self) {
        self.canceled.cancel();
        let current = self.current.lock();
        if let Some(name) = current.as_ref() {
            if let Some(entry) = self.states.get(name) {
                tracing::debug!(state = %name, "Forwarding cancel to active state");
                entry.state.cancel();
            }
        }
    }

    /// Cancel the active child on behalf of an error monitor.
    ///
    /// Unlike [`cancel`](Self::cancel), the machine's own flag is left alone.
    pub fn notify_error(&self) {
        let current = self.current.lock();
        if let Some(name) = current.as_ref() {
            if let Some(entry) = self.states.get(name) {
                tracing::warn!(state = %name, "Error notified, canceling active state");
                entry.state.cancel();
            }
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.is_canceled()
    }

    /// Run the machine from its start state until it resolves one of its
    /// outcomes.
    ///
    /// Runs synchronously on the calling thread. Each call is independent:
    /// the cursor always starts at the start state.
    ///
    /// # Errors
    ///
    /// - [`ExecutionError::NoStates`] / [`ExecutionError::UnknownStartState`]
    ///   if the machine cannot start.
    /// - [`ExecutionError::UnregisteredOutcome`] if a state returns a label
    ///   it did not declare.
    /// - [`ExecutionError::DanglingTransition`] if an outcome leads nowhere.
    /// - Any error raised by a state body or hook, unchanged.
    pub fn execute(&self, blackboard: &mut Blackboard) -> Result<String, ExecutionError> {
        let (start, entry) = match self.start_state.as_deref() {
            _ if self.states.is_empty() => return Err(ExecutionError::NoStates),
            Some(start) => match self.states.get_key_value(start) {
                Some((name, entry)) => (name.clone(), entry),
                None => {
                    return Err(ExecutionError::UnknownStartState {
                        name: start.to_string(),
                    })
                }
            },
            None => return Err(ExecutionError::NoStates),
        };

        let mut history = ExecutionHistory::new(self.history_limit);
        let span = tracing::info_span!("state_machine", run_id = %history.run_id(), start = start.as_str());
        let _entered = span.enter();

        entry.state.reset_cancel();
        *self.current.lock() = Some(start.clone());
        let _guard = RunGuard { machine: self };

        let result = self.run_loop(start, entry, blackboard, &mut history);
        if let Err(error) = &result {
            tracing::error!(%error, "State machine aborted");
        }
        *self.last_history.lock() = Some(history);
        result
    }

    fn run_loop<'a>(
        &'a self,
        start: String,
        start_entry: &'a StateEntry,
        blackboard: &mut Blackboard,
        history: &mut ExecutionHistory,
    ) -> Result<String, ExecutionError> {
        let mut current = start;
        let mut entry = start_entry;
        let mut previous: Option<String> = None;
        let mut entering = true;

        loop {
            if entering {
                if entry.state.hooks().enter {
                    tracing::debug!(state = %current, previous = ?previous, "Entering state");
                    entry.state.on_enter(blackboard, previous.as_deref())?;
                }
                entering = false;
            }

            let outcome = entry.state.execute(blackboard)?;

            if !entry.state.outcomes().contains(&outcome) {
                return Err(ExecutionError::UnregisteredOutcome {
                    state: current,
                    outcome,
                });
            }

            let resolution = resolve(&outcome, &entry.transitions, &self.outcomes, |name| {
                self.states.contains_key(name)
            });
            if entry.transitions.get(&outcome).is_some() {
                tracing::info!(state = %current, %outcome, next = %resolution.label(), "Transition");
            }

            match resolution {
                Resolution::Terminal(label) => {
                    let label = label.to_string();
                    history.record(TransitionRecord {
                        state: current.clone(),
                        outcome,
                        target: Target::Outcome(label.clone()),
                        timestamp: Utc::now(),
                    });
                    Self::exit_state(&entry.state, &current, blackboard)?;
                    return Ok(label);
                }
                Resolution::Continue(next) => {
                    let Some((next, next_entry)) = self.states.get_key_value(next) else {
                        return Err(ExecutionError::DanglingTransition {
                            state: current,
                            outcome: next.to_string(),
                        });
                    };
                    history.record(TransitionRecord {
                        state: current.clone(),
                        outcome,
                        target: Target::State(next.clone()),
                        timestamp: Utc::now(),
                    });
                    if !same_state(&entry.state, &next_entry.state) {
                        Self::exit_state(&entry.state, &current, blackboard)?;
                        next_entry.state.reset_cancel();
                        previous = Some(current);
                        entering = true;
                    }
                    *self.current.lock() = Some(next.clone());
                    current = next.clone();
                    entry = next_entry;
                }
                Resolution::Dangling(label) => {
                    return Err(ExecutionError::DanglingTransition {
                        state: current,
                        outcome: label.to_string(),
                    });
                }
            }
        }
    }

    fn exit_state(
        state: &Arc<dyn State>,
        name: &str,
        blackboard: &mut Blackboard,
    ) -> Result<(), ExecutionError> {
        if state.hooks().exit {
            tracing::debug!(state = %name, "Exiting state");
            state.on_exit(blackboard)?;
        }
        Ok(())
    }
}

impl State for StateMachine {
    fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    fn execute(&self, blackboard: &mut Blackboard) -> Result<String, ExecutionError> {
        StateMachine::execute(self, blackboard)
    }

    fn cancel(&self) {
        StateMachine::cancel(self);
    }

    fn is_canceled(&self) -> bool {
        StateMachine::is_canceled(self)
    }

    fn reset_cancel(&self) {
        self.canceled.reset();
    }

    fn hooks(&self) -> StateHooks {
        StateHooks::NONE
    }

    fn active_path(&self) -> Vec<String> {
        StateMachine::active_path(self)
    }
}

impl fmt::Display for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateMachine {}: {{", self.outcomes)?;
        for (i, (name, transitions)) in self.states().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {transitions}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("outcomes", &self.outcomes)
            .field("states", &self.order)
            .field("start_state", &self.start_state)
            .field("current_state", &self.current_state())
            .finish()
    }
}

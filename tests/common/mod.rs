//! Shared test states.

#![allow(dead_code)]

use jugglebot_fsm::core::{Blackboard, CancellationFlag, Outcomes, State, StateHooks};
use jugglebot_fsm::ExecutionError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Ordered log of hook and body events, shared between states.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| *e == event).count()
    }
}

/// Leaf state that returns a scripted sequence of outcomes and logs its hooks.
pub struct Scripted {
    label: String,
    outcomes: Outcomes,
    script: Mutex<VecDeque<String>>,
    log: EventLog,
    cancel: CancellationFlag,
}

impl Scripted {
    pub fn new(label: &str, outcomes: &[&str], script: &[&str], log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            outcomes: Outcomes::new(outcomes.iter().copied()),
            script: Mutex::new(script.iter().map(|s| s.to_string()).collect()),
            log: log.clone(),
            cancel: CancellationFlag::new(),
        })
    }
}

impl State for Scripted {
    fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    fn execute(&self, _blackboard: &mut Blackboard) -> Result<String, ExecutionError> {
        self.log.push(format!("run:{}", self.label));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ExecutionError::failed(format!("{} ran out of script", self.label)))
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
        StateHooks::BOTH
    }

    fn on_enter(
        &self,
        _blackboard: &mut Blackboard,
        previous: Option<&str>,
    ) -> Result<(), ExecutionError> {
        self.log.push(format!(
            "enter:{}<-{}",
            self.label,
            previous.unwrap_or("-")
        ));
        Ok(())
    }

    fn on_exit(&self, _blackboard: &mut Blackboard) -> Result<(), ExecutionError> {
        self.log.push(format!("exit:{}", self.label));
        Ok(())
    }
}

//! Transition history of a single run.
//!
//! Every resolved step of `StateMachine::execute` appends one
//! [`TransitionRecord`]. The history is bounded: past its limit the oldest
//! records are dropped and counted, so cyclic machines that run for hours
//! keep a constant footprint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use uuid::Uuid;

/// Where a resolved outcome led.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Target {
    /// Another state of the same machine.
    State(String),
    /// One of the machine's own outcomes; the run ended here.
    Outcome(String),
}

/// Record of a single resolved step.
///
/// `outcome` is the raw label the state returned; `target` is where it
/// resolved to after transition-table translation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state that ran
    pub state: String,
    /// The outcome it returned
    pub outcome: String,
    /// Where the outcome led
    pub target: Target,
    /// When the step resolved
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded log of the steps taken during one `execute` call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionHistory {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    limit: usize,
    dropped: usize,
    records: VecDeque<TransitionRecord>,
}

impl ExecutionHistory {
    /// Create an empty history keeping at most `limit` records.
    ///
    /// A limit of zero keeps nothing but still counts dropped records.
    pub fn new(limit: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            limit,
            dropped: 0,
            records: VecDeque::new(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.limit == 0 {
            self.dropped += 1;
            return;
        }
        while self.records.len() >= self.limit {
            self.records.pop_front();
            self.dropped += 1;
        }
        self.records.push_back(record);
    }

    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records evicted because of the limit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Names of the states visited, in order.
    ///
    /// Each retained record contributes the state that ran; a state
    /// re-invoked in place appears once per invocation.
    pub fn get_path(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.state.as_str()).collect()
    }

    /// The machine outcome the run ended with, if it has ended.
    pub fn outcome(&self) -> Option<&str> {
        match self.records.back().map(|r| &r.target) {
            Some(Target::Outcome(outcome)) => Some(outcome),
            _ => None,
        }
    }

    /// Time from the start of the run to the last retained record.
    pub fn duration(&self) -> Option<Duration> {
        self.records.back().and_then(|last| {
            last.timestamp
                .signed_duration_since(self.started_at)
                .to_std()
                .ok()
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for ExecutionHistory {
    fn default() -> Self {
        Self::new(crate::builder::DEFAULT_HISTORY_LIMIT)
    }
}

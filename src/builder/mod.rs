//! Builder API and configuration for state machine construction.
//!
//! This module provides a fluent builder, a serde-loadable configuration
//! and the `transitions!` macro for declaring transition tables with
//! minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;

use serde::{Deserialize, Serialize};

/// Default number of transition records kept per run.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Tunables for a state machine.
///
/// Missing fields take their defaults when deserialized, so a partial
/// JSON document is a valid configuration.
///
/// # Example
///
/// ```
/// use jugglebot_fsm::builder::MachineConfig;
///
/// let config: MachineConfig = serde_json::from_str(r#"{ "history_limit": 16 }"#).unwrap();
/// assert_eq!(config.history_limit, 16);
/// assert!(!config.validate_on_build);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Maximum transition records kept in each run's history
    pub history_limit: usize,

    /// Run static validation when building through `StateMachineBuilder`
    pub validate_on_build: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            validate_on_build: false,
        }
    }
}

//! Jugglebot FSM: hierarchical, outcome-driven state machines
//!
//! A machine is a set of named states. Each state does some work (command a
//! motor, wait for a catch, read a sensor) and finishes with a named
//! outcome. The machine follows that outcome through the state's transition
//! table to the next state, until an outcome resolves to one of the
//! machine's own outcomes.
//!
//! # Core Concepts
//!
//! - **State**: Unit of work with declared outcomes via the `State` trait
//! - **Blackboard**: Key/value data shared by all states of one run
//! - **StateMachine**: Executor that is itself a `State`, so machines nest
//! - **Cancellation**: Cooperative, forwarded to the running leaf from any thread
//!
//! # Example
//!
//! ```rust
//! use jugglebot_fsm::core::{Blackboard, CallbackState};
//! use jugglebot_fsm::{transitions, StateMachine};
//! use std::sync::Arc;
//!
//! let mut throw_cycle = StateMachine::new(["SUCCEEDED", "ABORTED"]);
//! throw_cycle
//!     .add_state(
//!         "THROW",
//!         Arc::new(CallbackState::new(["thrown"], |bb, _| {
//!             bb.insert("ball_in_air", true);
//!             Ok("thrown".into())
//!         })),
//!         transitions! { "thrown" => "CATCH" },
//!     )
//!     .unwrap()
//!     .add_state(
//!         "CATCH",
//!         Arc::new(CallbackState::new(["caught", "dropped"], |bb, _| {
//!             bb.insert("ball_in_air", false);
//!             Ok("caught".into())
//!         })),
//!         transitions! { "caught" => "SUCCEEDED", "dropped" => "ABORTED" },
//!     )
//!     .unwrap();
//!
//! let mut blackboard = Blackboard::new();
//! assert_eq!(throw_cycle.execute(&mut blackboard).unwrap(), "SUCCEEDED");
//! assert_eq!(blackboard.get::<bool>("ball_in_air"), Some(&false));
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, MachineConfig, StateMachineBuilder};
pub use self::core::{Blackboard, CallbackState, CancellationFlag, Outcomes, State, StateHooks};
pub use machine::{ExecutionError, StateMachine, TransitionTable};
pub use validation::ValidationIssue;

//! Machine runtime.
//!
//! This module is the imperative shell around the value model: it owns
//! the current state and runs transition actions.
//!
//! # Key Concepts
//!
//! - **Transitions**: `from --input--> to` edges with an optional fallible action
//! - **Machine**: validated table plus a lock-guarded current state
//! - **Actions**: run before the state change is committed; a failing
//!   action leaves the machine where it was

mod machine;
mod transition;

pub use machine::Machine;
pub use transition::{Action, ActionError, Transition};

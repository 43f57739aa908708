//! Core value types.
//!
//! This module contains the consumer-facing value model:
//! - `State` and `Input` traits for the values a machine moves between
//! - Immutable history of committed transitions
//!
//! Nothing in here has side effects.

mod history;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::{Input, State};

//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for creating machines
//! with minimal boilerplate. All table validation happens here, so a
//! built [`Machine`](crate::runtime::Machine) never re-checks its table.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, Endpoint};
pub use machine::MachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Input, State};
use crate::runtime::Transition;

/// Create a transition without an action.
///
/// # Example
///
/// ```
/// use switchyard::builder::transition;
/// use switchyard::runtime::Transition;
///
/// let t: Transition<&str, &str> = transition("locked", "unlocked", "coin");
/// assert!(!t.has_action());
/// ```
pub fn transition<S, I, E>(from: S, to: S, input: I) -> Transition<S, I, E>
where
    S: State,
    I: Input,
{
    Transition::new(from, to, input)
}

/// Create a transition that runs `action` before it is committed.
///
/// # Example
///
/// ```
/// use switchyard::builder::transition_with;
/// use switchyard::runtime::Transition;
///
/// let t: Transition<&str, &str, String> =
///     transition_with("locked", "unlocked", "coin", |_| Ok(()));
/// assert!(t.has_action());
/// ```
pub fn transition_with<S, I, E, F>(from: S, to: S, input: I, action: F) -> Transition<S, I, E>
where
    S: State,
    I: Input,
    F: Fn(&I) -> Result<(), E> + Send + Sync + 'static,
{
    Transition::new(from, to, input).with_action(action)
}

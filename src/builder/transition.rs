//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Input, State};
use crate::runtime::{Action, ActionError, Transition};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
///
/// # Example
///
/// ```rust
/// use switchyard::builder::TransitionBuilder;
/// use switchyard::runtime::Transition;
///
/// let transition: Transition<&str, &str> = TransitionBuilder::new()
///     .from("closed")
///     .to("open")
///     .on("push")
///     .action(|_input| Ok(()))
///     .build()
///     .unwrap();
///
/// assert!(transition.has_action());
/// ```
pub struct TransitionBuilder<S: State, I: Input, E = ActionError> {
    from: Option<S>,
    to: Option<S>,
    input: Option<I>,
    action: Option<Action<I, E>>,
}

impl<S: State, I: Input, E> TransitionBuilder<S, I, E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            input: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Set the triggering input (required).
    pub fn on(mut self, input: I) -> Self {
        self.input = Some(input);
        self
    }

    /// Set the action (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&I) -> Result<(), E> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, I, E>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let input = self.input.ok_or(BuildError::MissingInput)?;

        Ok(Transition {
            from,
            to,
            input,
            action: self.action,
        })
    }
}

impl<S: State, I: Input, E> Default for TransitionBuilder<S, I, E> {
    fn default() -> Self {
        Self::new()
    }
}

//! Transition records with optional actions.

use crate::core::{Input, State};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Default error type for transition actions.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for transition action functions.
///
/// Actions run inside `Machine::process` while the machine lock is held.
/// An `Err` aborts the transition and is handed back to the caller as-is.
pub type Action<I, E = ActionError> = Arc<dyn Fn(&I) -> Result<(), E> + Send + Sync>;

/// One allowed edge of a machine: `from --input--> to`.
///
/// Equality and hashing look only at `(from, to, input)`. Two transitions
/// that differ only in their action are duplicates, and the first one
/// added to a builder wins.
pub struct Transition<S: State, I: Input, E = ActionError> {
    pub(crate) from: S,
    pub(crate) to: S,
    pub(crate) input: I,
    pub(crate) action: Option<Action<I, E>>,
}

impl<S: State, I: Input, E> Transition<S, I, E> {
    /// Create a transition without an action.
    pub fn new(from: S, to: S, input: I) -> Self {
        Self {
            from,
            to,
            input,
            action: None,
        }
    }

    /// Attach an action, replacing any previous one.
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&I) -> Result<(), E> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    pub fn from(&self) -> &S {
        &self.from
    }

    pub fn to(&self) -> &S {
        &self.to
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Check if this transition fires for `input` while in `current` (pure)
    pub fn matches(&self, current: &S, input: &I) -> bool {
        self.from == *current && self.input == *input
    }

    /// Run the action, if any.
    pub(crate) fn run_action(&self, input: &I) -> Result<(), E> {
        match &self.action {
            Some(action) => action(input),
            None => Ok(()),
        }
    }
}

impl<S: State, I: Input, E> Clone for Transition<S, I, E> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            input: self.input.clone(),
            action: self.action.clone(),
        }
    }
}

impl<S: State, I: Input, E> PartialEq for Transition<S, I, E> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.input == other.input
    }
}

impl<S: State, I: Input, E> Eq for Transition<S, I, E> {}

impl<S: State, I: Input, E> Hash for Transition<S, I, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.input.hash(state);
    }
}

impl<S: State, I: Input, E> fmt::Debug for Transition<S, I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("input", &self.input)
            .field("has_action", &self.has_action())
            .finish()
    }
}

//! State transition history tracking.
//!
//! Provides immutable tracking of committed transitions over time.
//! Machines record into a history only when built with
//! `MachineBuilder::track_history`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use switchyard::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "pending",
///     to: "running",
///     input: "start",
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, "running");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<S, I> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The input that triggered the transition
    pub input: I,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition appended.
///
/// # Example
///
/// ```rust
/// use switchyard::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: "start",
///         to: "middle",
///         input: "next",
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: "middle",
///         to: "end",
///         input: "next",
///         timestamp: Utc::now(),
///     });
///
/// assert_eq!(history.get_path(), vec![&"start", &"middle", &"end"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory<S, I> {
    transitions: Vec<StateTransition<S, I>>,
}

impl<S, I> Default for StateHistory<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, I> StateHistory<S, I> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Get all transitions in commit order.
    pub fn transitions(&self) -> &[StateTransition<S, I>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition followed by the
    /// `to` state of every transition. Empty when nothing was recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions. A wall clock that
    /// stepped backwards between the two yields zero.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        Some(
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .unwrap_or(Duration::ZERO),
        )
    }

    /// Append in place. Used by the machine while it holds its lock.
    pub(crate) fn push(&mut self, transition: StateTransition<S, I>) {
        self.transitions.push(transition);
    }
}

impl<S: Clone, I: Clone> StateHistory<S, I> {
    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S, I>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }
}

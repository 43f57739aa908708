//! Build errors for machine and transition builders.

use std::fmt;
use thiserror::Error;

/// Which end of a transition an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => f.write_str("from"),
            Self::To => f.write_str("to"),
        }
    }
}

/// Errors that can occur when building machines and transitions.
///
/// States and inputs are reported by their display name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state already set. Call .initial_state(state) once (second value: '{state}')")]
    DuplicateInitialState { state: String },

    #[error("Initial state not specified. Call .initial_state(state) before .build()")]
    MissingInitialState,

    #[error("Unknown transition {endpoint} state '{state}'. Add it with .state(state) first")]
    UnknownTransitionEndpoint { endpoint: Endpoint, state: String },

    #[error("More than one transition leaves state '{state}' on input '{input}'")]
    AmbiguousTransition { state: String, input: String },

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition input not specified. Call .on(input)")]
    MissingInput,
}

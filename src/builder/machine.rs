//! Builder for constructing state machines.

use crate::builder::error::{BuildError, Endpoint};
use crate::core::{Input, State};
use crate::logging::trace_event;
use crate::runtime::{ActionError, Machine, Transition};
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<BuildError>>;

/// Builder for constructing state machines with a fluent API.
///
/// Adding the same state or transition twice has no effect. Nothing is
/// checked until [`validate`](Self::validate) or [`build`](Self::build).
///
/// # Example
///
/// ```rust
/// use switchyard::builder::{transition, MachineBuilder};
/// use switchyard::runtime::Machine;
///
/// let machine: Machine<&str, &str> = MachineBuilder::new()
///     .initial_state("idle")
///     .state("running")
///     .final_state("done")
///     .transition(transition("idle", "running", "start"))
///     .transition(transition("running", "done", "stop"))
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.process(&"start").unwrap(), "running");
/// ```
pub struct MachineBuilder<S: State, I: Input, E = ActionError> {
    initial_state: Option<S>,
    duplicate_initial: Option<S>,
    all_states: HashSet<S>,
    final_states: HashSet<S>,
    transitions: Vec<Transition<S, I, E>>,
    transition_keys: HashSet<(S, S, I)>,
    track_history: bool,
}

impl<S: State, I: Input, E> MachineBuilder<S, I, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial_state: None,
            duplicate_initial: None,
            all_states: HashSet::new(),
            final_states: HashSet::new(),
            transitions: Vec::new(),
            transition_keys: HashSet::new(),
            track_history: false,
        }
    }

    /// Set the initial state (required, exactly once).
    ///
    /// The state is also added to the machine's states. Calling this a
    /// second time is reported by `build()` as
    /// [`BuildError::DuplicateInitialState`]; the second value is dropped.
    pub fn initial_state(mut self, state: S) -> Self {
        if self.initial_state.is_some() {
            self.duplicate_initial.get_or_insert(state);
        } else {
            self.all_states.insert(state.clone());
            self.initial_state = Some(state);
        }
        self
    }

    /// Add a state.
    pub fn state(mut self, state: S) -> Self {
        self.all_states.insert(state);
        self
    }

    /// Add several states.
    pub fn states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.all_states.extend(states);
        self
    }

    /// Add a state and mark it final.
    pub fn final_state(mut self, state: S) -> Self {
        self.all_states.insert(state.clone());
        self.final_states.insert(state);
        self
    }

    /// Add several states and mark them final.
    pub fn final_states(self, states: impl IntoIterator<Item = S>) -> Self {
        states
            .into_iter()
            .fold(self, |builder, state| builder.final_state(state))
    }

    /// Add a transition. A transition equal to one already added is ignored.
    pub fn transition(mut self, transition: Transition<S, I, E>) -> Self {
        let key = (
            transition.from.clone(),
            transition.to.clone(),
            transition.input.clone(),
        );
        if self.transition_keys.insert(key) {
            self.transitions.push(transition);
        }
        self
    }

    /// Add several transitions.
    pub fn transitions(self, transitions: impl IntoIterator<Item = Transition<S, I, E>>) -> Self {
        transitions
            .into_iter()
            .fold(self, |builder, transition| builder.transition(transition))
    }

    /// Record every committed transition (off by default).
    ///
    /// The history is unbounded: it grows by one entry per committed
    /// transition for the machine's whole lifetime, so leave it off for
    /// long-lived machines that take many steps.
    pub fn track_history(mut self) -> Self {
        self.track_history = true;
        self
    }

    /// Check the table, accumulating ALL violations.
    ///
    /// Reports initial-state problems first, then unknown transition
    /// endpoints and ambiguous `(state, input)` pairs in the order the
    /// transitions were added.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut checks = vec![self.check_initial_state()];

        for transition in &self.transitions {
            checks.push(self.check_endpoint(Endpoint::From, &transition.from));
            checks.push(self.check_endpoint(Endpoint::To, &transition.to));
        }
        checks.extend(self.check_determinism());

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the state machine.
    ///
    /// Returns the first violation found by [`validate`](Self::validate).
    pub fn build(self) -> Result<Machine<S, I, E>, BuildError> {
        if let Validation::Failure(errors) = self.validate() {
            let error = errors.head().clone();
            trace_event!(
                debug,
                error = %error,
                violations = errors.len(),
                "machine build rejected"
            );
            return Err(error);
        }

        let initial_state = self.initial_state.ok_or(BuildError::MissingInitialState)?;
        Ok(Machine::new(
            initial_state,
            self.all_states,
            self.final_states,
            self.transitions.into_iter().collect(),
            self.track_history,
        ))
    }

    fn check_initial_state(&self) -> Check {
        match (&self.initial_state, &self.duplicate_initial) {
            (_, Some(second)) => Validation::fail(BuildError::DuplicateInitialState {
                state: second.name().to_string(),
            }),
            (None, None) => Validation::fail(BuildError::MissingInitialState),
            (Some(_), None) => Validation::success(()),
        }
    }

    fn check_endpoint(&self, endpoint: Endpoint, state: &S) -> Check {
        if self.all_states.contains(state) {
            Validation::success(())
        } else {
            Validation::fail(BuildError::UnknownTransitionEndpoint {
                endpoint,
                state: state.name().to_string(),
            })
        }
    }

    /// One failure per transition that repeats an earlier `(from, input)`.
    fn check_determinism(&self) -> Vec<Check> {
        let mut seen: HashMap<(&S, &I), &S> = HashMap::new();
        self.transitions
            .iter()
            .filter_map(|transition| {
                seen.insert((&transition.from, &transition.input), &transition.to)
                    .map(|_| -> Check {
                        Validation::fail(BuildError::AmbiguousTransition {
                            state: transition.from.name().to_string(),
                            input: transition.input.name().to_string(),
                        })
                    })
            })
            .collect()
    }
}

impl<S: State, I: Input, E> Default for MachineBuilder<S, I, E> {
    fn default() -> Self {
        Self::new()
    }
}

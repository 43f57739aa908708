//! State machine that executes transitions.

use crate::core::{Input, State, StateHistory, StateTransition};
use crate::logging::trace_event;
use crate::runtime::transition::{ActionError, Transition};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A built, validated state machine.
///
/// Everything except the current state (and the optional history) is
/// fixed at build time and read without locking. `process` calls are
/// serialized through a single lock per machine, so a `Machine` can be
/// shared freely, typically behind an `Arc`.
///
/// The current state lives in its own cell, written only when a
/// transition commits. Reads never wait on a running action, and an
/// action that reads the machine sees the state it is leaving.
///
/// Machines are created with [`MachineBuilder`](crate::builder::MachineBuilder).
pub struct Machine<S: State, I: Input, E = ActionError> {
    initial_state: S,
    all_states: HashSet<S>,
    final_states: HashSet<S>,
    transitions: HashSet<Transition<S, I, E>>,
    table: HashMap<S, HashMap<I, Transition<S, I, E>>>,
    processing: Mutex<()>,
    current: RwLock<S>,
    history: Mutex<Option<StateHistory<S, I>>>,
}

impl<S: State, I: Input, E> Machine<S, I, E> {
    /// Assemble a machine from an already validated table.
    pub(crate) fn new(
        initial_state: S,
        all_states: HashSet<S>,
        final_states: HashSet<S>,
        transitions: HashSet<Transition<S, I, E>>,
        track_history: bool,
    ) -> Self {
        let mut table: HashMap<S, HashMap<I, Transition<S, I, E>>> = HashMap::new();
        for transition in &transitions {
            table
                .entry(transition.from.clone())
                .or_default()
                .entry(transition.input.clone())
                .or_insert_with(|| transition.clone());
        }

        Self {
            processing: Mutex::new(()),
            current: RwLock::new(initial_state.clone()),
            history: Mutex::new(track_history.then(StateHistory::new)),
            initial_state,
            all_states,
            final_states,
            transitions,
            table,
        }
    }

    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    /// Snapshot of the current state.
    ///
    /// Never waits for an in-flight `process` call; during its action the
    /// pre-transition state is returned.
    pub fn current_state(&self) -> S {
        self.current.read().clone()
    }

    pub fn all_states(&self) -> &HashSet<S> {
        &self.all_states
    }

    pub fn final_states(&self) -> &HashSet<S> {
        &self.final_states
    }

    pub fn transitions(&self) -> &HashSet<Transition<S, I, E>> {
        &self.transitions
    }

    /// Check if the machine is parked in a final state
    pub fn is_final(&self) -> bool {
        self.final_states.contains(&*self.current.read())
    }

    /// Whether `process(input)` would take a transition right now.
    ///
    /// Advisory only: another caller may move the machine before you act
    /// on the answer.
    pub fn can_process(&self, input: &I) -> bool {
        let current = self.current.read();
        !self.final_states.contains(&*current) && self.lookup(&current, input).is_some()
    }

    /// Snapshot of committed transitions.
    ///
    /// `None` unless the machine was built with `track_history()`.
    pub fn history(&self) -> Option<StateHistory<S, I>> {
        self.history.lock().clone()
    }

    fn lookup(&self, current: &S, input: &I) -> Option<&Transition<S, I, E>> {
        self.table.get(current).and_then(|by_input| by_input.get(input))
    }

    /// Move to `to` and record the step, as one update for readers.
    fn commit(&self, from: S, to: &S, input: &I) {
        let mut history = self.history.lock();
        *self.current.write() = to.clone();
        if let Some(history) = history.as_mut() {
            history.push(StateTransition {
                from,
                to: to.clone(),
                input: input.clone(),
                timestamp: Utc::now(),
            });
        }
    }
}

impl<S: State, I: Input, E: fmt::Display> Machine<S, I, E> {
    /// Feed one input to the machine and return the resulting state.
    ///
    /// - In a final state the input is ignored and the final state returned.
    /// - With no transition for `(current, input)` the current state is
    ///   returned unchanged.
    /// - Otherwise the transition's action runs first. If it fails, its
    ///   error is returned untouched and the machine stays where it was.
    ///   On success the machine moves to the transition's target state.
    ///
    /// Calls are mutually exclusive per machine: a concurrent caller blocks
    /// until the running call, action included, completes. An action may
    /// read the machine, but calling `process` on it again deadlocks.
    pub fn process(&self, input: &I) -> Result<S, E> {
        let _serialized = self.processing.lock();
        let current = self.current_state();
        trace_event!(
            info,
            input = input.name(),
            state = current.name(),
            "processing input"
        );

        if self.final_states.contains(&current) {
            trace_event!(
                warn,
                input = input.name(),
                state = current.name(),
                "cannot process, already in final state"
            );
            return Ok(current);
        }

        let Some(transition) = self.lookup(&current, input) else {
            trace_event!(
                warn,
                input = input.name(),
                state = current.name(),
                "no matching transition"
            );
            return Ok(current);
        };

        if let Err(error) = transition.run_action(input) {
            trace_event!(
                error,
                from = transition.from.name(),
                to = transition.to.name(),
                input = input.name(),
                error = %error,
                "transition action failed"
            );
            return Err(error);
        }

        trace_event!(
            info,
            from = current.name(),
            to = transition.to.name(),
            input = input.name(),
            "transitioned"
        );
        self.commit(current, &transition.to, input);

        Ok(transition.to.clone())
    }
}

impl<S: State, I: Input, E> fmt::Debug for Machine<S, I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("initial_state", &self.initial_state)
            .field("current_state", &*self.current.read())
            .field("all_states", &self.all_states)
            .field("final_states", &self.final_states)
            .field("transitions", &self.transitions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum WorkflowState {
        Initial,
        Processing,
        Complete,
    }

    impl State for WorkflowState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum WorkflowInput {
        Start,
        Finish,
        Restart,
    }

    impl Input for WorkflowInput {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Finish => "Finish",
                Self::Restart => "Restart",
            }
        }
    }

    type Workflow = Machine<WorkflowState, WorkflowInput, String>;

    fn workflow(fail_finish: bool, calls: Arc<AtomicUsize>) -> Workflow {
        MachineBuilder::new()
            .initial_state(WorkflowState::Initial)
            .state(WorkflowState::Processing)
            .final_state(WorkflowState::Complete)
            .transition(
                Transition::new(
                    WorkflowState::Initial,
                    WorkflowState::Processing,
                    WorkflowInput::Start,
                )
                .with_action(move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }),
            )
            .transition(
                Transition::new(
                    WorkflowState::Processing,
                    WorkflowState::Complete,
                    WorkflowInput::Finish,
                )
                .with_action(move |_| {
                    if fail_finish {
                        Err("storage unavailable".to_string())
                    } else {
                        Ok(())
                    }
                }),
            )
            .transition(Transition::new(
                WorkflowState::Complete,
                WorkflowState::Initial,
                WorkflowInput::Restart,
            ))
            .track_history()
            .build()
            .unwrap()
    }

    #[test]
    fn new_machine_starts_in_initial_state() {
        let machine = workflow(false, Arc::default());

        assert_eq!(machine.current_state(), WorkflowState::Initial);
        assert_eq!(machine.initial_state(), &WorkflowState::Initial);
        assert!(!machine.is_final());
    }

    #[test]
    fn simple_transition_succeeds() {
        let calls = Arc::new(AtomicUsize::new(0));
        let machine = workflow(false, Arc::clone(&calls));

        let state = machine.process(&WorkflowInput::Start).unwrap();

        assert_eq!(state, WorkflowState::Processing);
        assert_eq!(machine.current_state(), WorkflowState::Processing);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unmatched_input_is_a_no_op() {
        let machine = workflow(false, Arc::default());

        let state = machine.process(&WorkflowInput::Finish).unwrap();

        assert_eq!(state, WorkflowState::Initial);
        assert!(machine.history().unwrap().is_empty());
    }

    #[test]
    fn failed_action_keeps_current_state() {
        let machine = workflow(true, Arc::default());
        machine.process(&WorkflowInput::Start).unwrap();

        let result = machine.process(&WorkflowInput::Finish);

        assert_eq!(result, Err("storage unavailable".to_string()));
        assert_eq!(machine.current_state(), WorkflowState::Processing);
        assert_eq!(machine.history().unwrap().len(), 1);
    }

    #[test]
    fn final_state_ignores_declared_transitions() {
        let machine = workflow(false, Arc::default());
        machine.process(&WorkflowInput::Start).unwrap();
        machine.process(&WorkflowInput::Finish).unwrap();
        assert!(machine.is_final());

        let state = machine.process(&WorkflowInput::Restart).unwrap();

        assert_eq!(state, WorkflowState::Complete);
        assert!(!machine.can_process(&WorkflowInput::Restart));
    }

    #[test]
    fn can_process_reflects_current_state() {
        let machine = workflow(false, Arc::default());

        assert!(machine.can_process(&WorkflowInput::Start));
        assert!(!machine.can_process(&WorkflowInput::Finish));
    }

    #[test]
    fn history_records_committed_transitions() {
        let machine = workflow(false, Arc::default());
        machine.process(&WorkflowInput::Start).unwrap();
        machine.process(&WorkflowInput::Start).unwrap();
        machine.process(&WorkflowInput::Finish).unwrap();

        let history = machine.history().unwrap();
        assert_eq!(
            history.get_path(),
            vec![
                &WorkflowState::Initial,
                &WorkflowState::Processing,
                &WorkflowState::Complete
            ]
        );
        assert_eq!(history.transitions()[1].input, WorkflowInput::Finish);
    }

    #[test]
    fn history_is_off_by_default() {
        let machine: Workflow = MachineBuilder::new()
            .initial_state(WorkflowState::Initial)
            .build()
            .unwrap();

        assert!(machine.history().is_none());
    }

    #[test]
    fn debug_output_names_current_state() {
        let machine = workflow(false, Arc::default());
        let debug = format!("{machine:?}");

        assert!(debug.contains("current_state: Initial"));
    }
}

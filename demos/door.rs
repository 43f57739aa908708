//! Door Simulation
//!
//! A door driven by a switchyard machine, with a listener that is told
//! the door's state after every input.
//!
//! Key concepts:
//! - State and input enums generated with `state_enum!` / `input_enum!`
//! - Actions that run before a transition is committed
//! - A final state (`Stuck`) that freezes the door
//! - Diagnostics routed through a `tracing` subscriber
//!
//! Run with: cargo run --example door

use std::sync::{Arc, Mutex};
use switchyard::builder::{transition_with, MachineBuilder};
use switchyard::runtime::{Machine, Transition};
use switchyard::{input_enum, logging, state_enum};

state_enum! {
    pub enum DoorState {
        Open,
        Closed,
        Locked,
        Stuck,
    }
    final: [Stuck]
}

input_enum! {
    pub enum DoorInput {
        Close,
        Open,
        Lock,
        Unlock,
        StrikeLock,
    }
}

/// Every door transition drives the (simulated) actuator first.
fn actuate(
    from: DoorState,
    to: DoorState,
    input: DoorInput,
) -> Transition<DoorState, DoorInput, String> {
    transition_with(from, to, input, |input: &DoorInput| {
        println!("  actuator: handling {input:?}");
        Ok(())
    })
}

/// Callback invoked when the door reports its state.
pub trait Listener: Send {
    fn on_state_change(&mut self, state: DoorState);
}

/// A door that accepts inputs and reports its state to one listener.
pub struct Door {
    machine: Machine<DoorState, DoorInput, String>,
    listener: Mutex<Option<Box<dyn Listener>>>,
}

impl Door {
    pub fn new() -> Self {
        let machine = MachineBuilder::new()
            .initial_state(DoorState::Open)
            .states([DoorState::Closed, DoorState::Locked])
            .final_states(DoorState::FINAL.iter().copied())
            .transitions([
                actuate(DoorState::Open, DoorState::Closed, DoorInput::Close),
                actuate(DoorState::Closed, DoorState::Open, DoorInput::Open),
                actuate(DoorState::Closed, DoorState::Locked, DoorInput::Lock),
                actuate(DoorState::Locked, DoorState::Closed, DoorInput::Unlock),
                actuate(DoorState::Locked, DoorState::Stuck, DoorInput::StrikeLock),
            ])
            .build()
            .expect("door table is valid");

        Self {
            machine,
            listener: Mutex::new(None),
        }
    }

    /// Subscribe for state changes; the listener immediately gets the current state.
    pub fn subscribe(&self, listener: Box<dyn Listener>) {
        *self.listener.lock().expect("listener lock") = Some(listener);
        self.notify();
    }

    pub fn unsubscribe(&self) {
        *self.listener.lock().expect("listener lock") = None;
    }

    /// Send an input which might trigger a state change.
    pub fn on_input(&self, input: DoorInput) {
        if let Err(error) = self.machine.process(&input) {
            println!("  door refused {input:?}: {error}");
        }
        self.notify();
    }

    fn notify(&self) {
        let state = self.machine.current_state();
        if let Some(listener) = self.listener.lock().expect("listener lock").as_mut() {
            listener.on_state_change(state);
        }
    }
}

impl Default for Door {
    fn default() -> Self {
        Self::new()
    }
}

struct Screen {
    seen: Arc<Mutex<Vec<DoorState>>>,
}

impl Listener for Screen {
    fn on_state_change(&mut self, state: DoorState) {
        println!("  screen: door is {state:?}");
        self.seen.lock().expect("screen lock").push(state);
    }
}

fn main() {
    println!("=== Door Simulation ===\n");

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();
    logging::set_enabled(true);

    let door = Door::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    door.subscribe(Box::new(Screen {
        seen: Arc::clone(&seen),
    }));

    for input in [
        DoorInput::Close,
        DoorInput::Lock,
        DoorInput::Open,
        DoorInput::Unlock,
        DoorInput::Lock,
        DoorInput::StrikeLock,
        DoorInput::Unlock,
    ] {
        println!("\nInput: {input:?}");
        door.on_input(input);
    }

    door.unsubscribe();
    door.on_input(DoorInput::Open);

    println!("\nStates reported: {:?}", seen.lock().expect("screen lock"));
    println!("\n=== Example Complete ===");
}

//! Switchyard: a small, thread-safe finite-state-machine engine
//!
//! A machine is described once, as a table of states and transitions,
//! validated by a builder, and then driven one input at a time with
//! [`Machine::process`]. Only declared transitions ever happen, nothing
//! happens once a final state is reached, and a transition's action
//! runs before the state change is committed.
//!
//! # Core Concepts
//!
//! - **State / Input**: consumer-supplied values compared by equality
//! - **Transition**: a `from --input--> to` edge with an optional action
//! - **MachineBuilder**: accumulates and validates the table
//! - **Machine**: the runtime; one `process` call at a time per machine
//!
//! # Example
//!
//! ```rust
//! use switchyard::builder::{transition, transition_with, MachineBuilder};
//! use switchyard::runtime::Machine;
//! use switchyard::{input_enum, state_enum};
//!
//! state_enum! {
//!     enum Turnstile {
//!         Locked,
//!         Unlocked,
//!         Broken,
//!     }
//!     final: [Broken]
//! }
//!
//! input_enum! {
//!     enum Event {
//!         Coin,
//!         Push,
//!         Kick,
//!     }
//! }
//!
//! let machine: Machine<Turnstile, Event, String> = MachineBuilder::new()
//!     .initial_state(Turnstile::Locked)
//!     .state(Turnstile::Unlocked)
//!     .final_states(Turnstile::FINAL.iter().copied())
//!     .transition(transition_with(
//!         Turnstile::Locked,
//!         Turnstile::Unlocked,
//!         Event::Coin,
//!         |_| Ok(()),
//!     ))
//!     .transition(transition(Turnstile::Unlocked, Turnstile::Locked, Event::Push))
//!     .transition(transition(Turnstile::Locked, Turnstile::Broken, Event::Kick))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(machine.process(&Event::Push), Ok(Turnstile::Locked));
//! assert_eq!(machine.process(&Event::Coin), Ok(Turnstile::Unlocked));
//! ```

pub mod builder;
pub mod core;
pub mod logging;
pub mod runtime;

// Re-export commonly used types
pub use crate::builder::{BuildError, Endpoint, MachineBuilder, TransitionBuilder};
pub use crate::core::{Input, State, StateHistory, StateTransition};
pub use crate::runtime::{Action, ActionError, Machine, Transition};

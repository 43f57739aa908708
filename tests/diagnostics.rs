//! Diagnostics emitted through `tracing`.
//!
//! The toggle is process-wide, so everything that flips it lives in a
//! single test to keep this binary free of races.

use std::io;
use std::sync::{Arc, Mutex};
use switchyard::builder::{transition, transition_with, MachineBuilder};
use switchyard::runtime::Machine;
use switchyard::{input_enum, logging, state_enum, BuildError};

state_enum! {
    enum Door {
        Open,
        Closed,
        Stuck,
    }
    final: [Stuck]
}

input_enum! {
    enum Push {
        Close,
        Open,
        Slam,
        Jam,
    }
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn take(&self) -> String {
        let mut buffer = self.0.lock().unwrap();
        let text = String::from_utf8_lossy(&buffer).into_owned();
        buffer.clear();
        text
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_capture<T>(captured: &Captured, f: impl FnOnce() -> T) -> T {
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

fn door() -> Machine<Door, Push, String> {
    MachineBuilder::new()
        .initial_state(Door::Open)
        .state(Door::Closed)
        .final_state(Door::Stuck)
        .transition(transition(Door::Open, Door::Closed, Push::Close))
        .transition(transition_with(Door::Closed, Door::Open, Push::Open, |_| {
            Err("hinge seized".to_string())
        }))
        .transition(transition(Door::Closed, Door::Stuck, Push::Jam))
        .transition(transition(Door::Stuck, Door::Open, Push::Open))
        .build()
        .unwrap()
}

#[test]
fn diagnostics_follow_the_process_wide_toggle() {
    let captured = Captured::default();

    // Off by default: nothing reaches the subscriber.
    assert!(!logging::is_enabled());
    with_capture(&captured, || {
        let machine = door();
        machine.process(&Push::Close).unwrap();
        machine.process(&Push::Slam).unwrap();
    });
    assert_eq!(captured.take(), "");

    logging::set_enabled(true);

    let machine = door();
    with_capture(&captured, || machine.process(&Push::Close).unwrap());
    let lines = captured.take();
    assert!(lines.contains("processing input"), "{lines}");
    assert!(lines.contains("transitioned"), "{lines}");
    assert!(lines.contains("Closed"), "{lines}");
    assert!(lines.contains(" INFO "), "{lines}");

    with_capture(&captured, || machine.process(&Push::Slam).unwrap());
    let lines = captured.take();
    assert!(lines.contains("no matching transition"), "{lines}");
    assert!(lines.contains(" WARN "), "{lines}");

    with_capture(&captured, || machine.process(&Push::Open).unwrap_err());
    let lines = captured.take();
    assert!(lines.contains("transition action failed"), "{lines}");
    assert!(lines.contains("hinge seized"), "{lines}");
    assert!(lines.contains("ERROR"), "{lines}");

    with_capture(&captured, || {
        machine.process(&Push::Jam).unwrap();
        machine.process(&Push::Open).unwrap();
    });
    let lines = captured.take();
    assert!(lines.contains("already in final state"), "{lines}");

    let rejected = with_capture(&captured, || {
        MachineBuilder::<Door, Push>::new()
            .transition(transition(Door::Open, Door::Closed, Push::Close))
            .build()
    });
    assert!(matches!(rejected, Err(BuildError::MissingInitialState)));
    let lines = captured.take();
    assert!(lines.contains("machine build rejected"), "{lines}");
    assert!(lines.contains("violations=3"), "{lines}");

    logging::set_enabled(false);
    with_capture(&captured, || door().process(&Push::Close).unwrap());
    assert_eq!(captured.take(), "");

    std::env::set_var(logging::LOG_ENV_VAR, "On");
    assert!(logging::init_from_env());
    assert!(logging::is_enabled());

    std::env::remove_var(logging::LOG_ENV_VAR);
    assert!(!logging::init_from_env());
    assert!(!logging::is_enabled());
}

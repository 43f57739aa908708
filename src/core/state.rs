//! State and Input traits for machine values.
//!
//! The engine never looks inside a state or an input. It only compares
//! them for equality, hashes them for table lookup, and asks for a
//! display name when diagnostics are enabled.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are identified by equality, not by reference. Two values that
/// compare equal are the same state as far as the machine is concerned.
///
/// # Required Traits
///
/// - `Clone`: the current state is handed back by value from `process`
/// - `Eq` + `Hash`: states live in sets and key the transition table
/// - `Debug`: states must be debuggable for diagnostics
/// - `Send` + `Sync`: machines are shared across threads
///
/// # Example
///
/// ```rust
/// use switchyard::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum TaskState {
///     Pending,
///     Running,
///     Complete,
/// }
///
/// impl State for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///             Self::Complete => "Complete",
///         }
///     }
/// }
///
/// assert_eq!(TaskState::Running.name(), "Running");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Trait for machine inputs.
///
/// Same contract as [`State`]: equality, a stable hash and a display name.
///
/// # Example
///
/// ```rust
/// use switchyard::core::Input;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Signal {
///     Go,
///     Stop,
/// }
///
/// impl Input for Signal {
///     fn name(&self) -> &str {
///         match self {
///             Self::Go => "Go",
///             Self::Stop => "Stop",
///         }
///     }
/// }
/// ```
pub trait Input: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the input's name for display/logging.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl Input for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl State for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl Input for &'static str {
    fn name(&self) -> &str {
        self
    }
}

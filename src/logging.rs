//! Process-wide diagnostics toggle.
//!
//! Machines emit `tracing` events describing every `process` call, but
//! only while diagnostics are enabled. The switch is global to the
//! process and starts off. Where the events end up is decided by
//! whichever `tracing` subscriber the host installs; this crate never
//! installs one itself.
//!
//! # Example
//!
//! ```rust
//! use switchyard::logging;
//!
//! logging::set_enabled(true);
//! assert!(logging::is_enabled());
//! logging::set_enabled(false);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable read by [`init_from_env`].
pub const LOG_ENV_VAR: &str = "SWITCHYARD_LOG";

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(false);

/// Turn machine diagnostics on or off for the whole process.
pub fn set_enabled(enabled: bool) {
    LOGGING_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether machine diagnostics are currently emitted.
pub fn is_enabled() -> bool {
    LOGGING_ENABLED.load(Ordering::Relaxed)
}

/// Initialize the toggle from `SWITCHYARD_LOG`.
///
/// `1`, `true`, `on` and `yes` (any case) enable diagnostics. Anything
/// else, including an unset variable, disables them. Returns the value
/// that was applied.
pub fn init_from_env() -> bool {
    let enabled = std::env::var(LOG_ENV_VAR)
        .map(|value| parse_flag(&value))
        .unwrap_or(false);
    set_enabled(enabled);
    enabled
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Emit a `tracing` event only while diagnostics are enabled.
///
/// Same syntax as the `tracing` level macros, prefixed with the level.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        if $crate::logging::is_enabled() {
            ::tracing::$level!($($arg)+);
        }
    };
}

pub(crate) use trace_event;

//! Logging facilities for Arbor Picker.
//!
//! Arbor Picker uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the host application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Host application code...
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "arbor_picker_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "arbor_picker_core::signal";
    /// Deferral queue target.
    pub const DEFERRAL: &str = "arbor_picker_core::deferral";
}

/// Macros for common tracing patterns.
///
/// These are just wrappers around the `tracing` crate macros with consistent
/// target naming.
#[macro_export]
macro_rules! picker_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "arbor_picker_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! picker_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "arbor_picker_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! picker_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "arbor_picker_core", $($arg)*)
    };
}

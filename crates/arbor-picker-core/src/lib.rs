//! Core systems for Arbor Picker.
//!
//! This crate provides the foundational components of the Arbor Picker
//! widget core:
//!
//! - **Signal/Slot System**: Type-safe lifecycle notifications
//! - **Deferral Queue**: One-shot fixed-delay deferred actions, drained
//!   cooperatively by the host
//! - **Errors**: Core error types
//! - **Logging**: `tracing` targets and convenience macros
//!
//! The picker is single-threaded and event-driven: every handler runs to
//! completion on the host UI thread before the next event is processed.
//! Signals therefore invoke their slots directly, and the only suspension
//! points are the short fixed-delay deferrals held in [`DeferredQueue`].
//!
//! # Signal/Slot Example
//!
//! ```
//! use arbor_picker_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Deferral Example
//!
//! ```
//! use std::time::Duration;
//! use arbor_picker_core::DeferredQueue;
//!
//! let mut deferrals = DeferredQueue::new();
//! deferrals.defer(Duration::from_millis(50), "re-run search");
//!
//! // The host drains expired deferrals from its event loop:
//! for action in deferrals.drain_expired() {
//!     println!("{action}");
//! }
//! ```

mod deferral;
mod error;
pub mod logging;
pub mod signal;

pub use deferral::{DeferralId, DeferredQueue};
pub use error::{DeferralError, PickerCoreError, Result};
pub use signal::{ConnectionId, Signal};

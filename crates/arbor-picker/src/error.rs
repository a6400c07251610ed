//! Error types for the picker crate.

use thiserror::Error;

/// Errors surfaced by the picker factory.
///
/// Interaction itself never fails with an error: rejected operations
/// (selecting past the cap, deselecting a disabled option) report through
/// return values and signals instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    /// The host environment cannot render the picker at all.
    #[error("host environment cannot render the picker")]
    UnsupportedHost,

    /// A configuration value is outside its usable range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

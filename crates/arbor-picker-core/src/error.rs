//! Error types for Arbor Picker core systems.

use std::fmt;

/// The main error type for core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerCoreError {
    /// Deferral-related error.
    Deferral(DeferralError),
}

impl fmt::Display for PickerCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deferral(err) => write!(f, "Deferral error: {err}"),
        }
    }
}

impl std::error::Error for PickerCoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Deferral(err) => Some(err),
        }
    }
}

/// Deferral-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferralError {
    /// The deferral ID is invalid or has already fired.
    InvalidDeferralId,
}

impl fmt::Display for DeferralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDeferralId => write!(f, "Invalid or expired deferral ID"),
        }
    }
}

impl std::error::Error for DeferralError {}

impl From<DeferralError> for PickerCoreError {
    fn from(err: DeferralError) -> Self {
        Self::Deferral(err)
    }
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, PickerCoreError>;

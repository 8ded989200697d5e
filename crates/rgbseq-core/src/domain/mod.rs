//! Domain entities for the RGB LED sequencer.
//!
//! Every type in this module is an immutable value.  Constructors validate
//! their input against a [`config::SequencerConfiguration`] and return a
//! [`ValidationError`] instead of producing a value that the device could not
//! store.  Once constructed, lengths and channel values never change.

use thiserror::Error;

/// Device capability descriptor.
pub mod config;
/// Whole-chain containers: dot correction, grayscale, steps and sequences.
pub mod data;
/// Per-LED channel values.
pub mod led;
/// Progress reports emitted while a command runs.
pub mod progress;

/// Errors raised when a value does not fit the sequencer's capabilities.
///
/// Validation always happens at construction or method-entry time, never in
/// the middle of a wire transfer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A numeric value lies outside its permitted inclusive range.
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A fixed-length collection was supplied with the wrong number of elements.
    #[error("{name} must contain exactly {expected} elements, got {actual}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A bounded collection was supplied with too many elements.
    #[error("{name} may contain at most {max} elements, got {actual}")]
    TooLong {
        name: &'static str,
        max: usize,
        actual: usize,
    },

    /// A required text value was empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Checks that `value` lies in `min..=max`.
pub(crate) fn check_range(
    name: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

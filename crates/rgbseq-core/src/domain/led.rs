//! Per-LED channel values.
//!
//! Both types are plain `Copy` values.  Out-of-range channel values are
//! rejected rather than clamped; clamping user input is a UI concern.

use std::fmt;

use serde::Serialize;

use super::config::SequencerConfiguration;
use super::{check_range, ValidationError};

/// Static brightness compensation for the three channels of one LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LedDotCorrection {
    red: u8,
    green: u8,
    blue: u8,
}

impl LedDotCorrection {
    /// Creates a dot-correction value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if any channel exceeds
    /// `config.max_dot_correction()`.
    pub fn new(
        config: &SequencerConfiguration,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<Self, ValidationError> {
        let max = i64::from(config.max_dot_correction());
        check_range("red", i64::from(red), 0, max)?;
        check_range("green", i64::from(green), 0, max)?;
        check_range("blue", i64::from(blue), 0, max)?;
        Ok(Self { red, green, blue })
    }

    /// Full correction on every channel, the device's power-on state.
    pub fn max(config: &SequencerConfiguration) -> Self {
        let value = config.max_dot_correction();
        Self {
            red: value,
            green: value,
            blue: value,
        }
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub(crate) fn check(&self, config: &SequencerConfiguration) -> Result<(), ValidationError> {
        Self::new(config, self.red, self.green, self.blue).map(|_| ())
    }
}

impl fmt::Display for LedDotCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// PWM brightness of the three channels of one LED within a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct LedGrayscale {
    red: u8,
    green: u8,
    blue: u8,
}

impl LedGrayscale {
    /// Creates a grayscale value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if any channel exceeds
    /// `config.max_grayscale()`.
    pub fn new(
        config: &SequencerConfiguration,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<Self, ValidationError> {
        let max = i64::from(config.max_grayscale());
        check_range("red", i64::from(red), 0, max)?;
        check_range("green", i64::from(green), 0, max)?;
        check_range("blue", i64::from(blue), 0, max)?;
        Ok(Self { red, green, blue })
    }

    /// All channels dark.
    pub fn off() -> Self {
        Self::default()
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub(crate) fn check(&self, config: &SequencerConfiguration) -> Result<(), ValidationError> {
        Self::new(config, self.red, self.green, self.blue).map(|_| ())
    }
}

impl fmt::Display for LedGrayscale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

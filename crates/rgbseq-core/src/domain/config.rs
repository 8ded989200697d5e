//! The capability descriptor every other entity is validated against.

use super::{check_range, ValidationError};

/// Hardware limit of the dot-correction registers (6 bits per channel).
pub const DOT_CORRECTION_LIMIT: u8 = 63;

/// Immutable description of what the attached sequencer can store.
///
/// Loaded once per session and shared read-only, usually behind an `Arc`.
/// Zero-capacity devices are rejected here so no downstream code has to
/// special-case an empty LED chain or an empty sequence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequencerConfiguration {
    max_dot_correction: u8,
    max_grayscale: u8,
    max_step_count: u16,
    max_step_delay: u16,
    rgb_led_count: u8,
    sequence_count: u8,
}

impl SequencerConfiguration {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when `max_dot_correction`
    /// exceeds 63, or when `rgb_led_count` or `sequence_count` is zero.
    pub fn new(
        max_dot_correction: u8,
        max_grayscale: u8,
        max_step_count: u16,
        max_step_delay: u16,
        rgb_led_count: u8,
        sequence_count: u8,
    ) -> Result<Self, ValidationError> {
        check_range(
            "max_dot_correction",
            i64::from(max_dot_correction),
            0,
            i64::from(DOT_CORRECTION_LIMIT),
        )?;
        check_range("rgb_led_count", i64::from(rgb_led_count), 1, 255)?;
        check_range("sequence_count", i64::from(sequence_count), 1, 255)?;
        Ok(Self {
            max_dot_correction,
            max_grayscale,
            max_step_count,
            max_step_delay,
            rgb_led_count,
            sequence_count,
        })
    }

    pub fn max_dot_correction(&self) -> u8 {
        self.max_dot_correction
    }

    pub fn max_grayscale(&self) -> u8 {
        self.max_grayscale
    }

    pub fn max_step_count(&self) -> u16 {
        self.max_step_count
    }

    pub fn max_step_delay(&self) -> u16 {
        self.max_step_delay
    }

    /// Number of RGB LEDs in the chain.
    pub fn rgb_led_count(&self) -> usize {
        usize::from(self.rgb_led_count)
    }

    /// Number of sequence slots in the device's storage.
    pub fn sequence_count(&self) -> u8 {
        self.sequence_count
    }

    /// Checks that `index` addresses an existing sequence slot.
    ///
    /// The upper bound is exclusive: valid indices are `0..sequence_count`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] for indices past the last slot.
    pub fn check_sequence_index(&self, index: u8) -> Result<(), ValidationError> {
        check_range(
            "sequence_index",
            i64::from(index),
            0,
            i64::from(self.sequence_count) - 1,
        )
    }
}

impl Default for SequencerConfiguration {
    /// The stock board: 5 LEDs, 10 sequence slots, 770 steps per sequence.
    fn default() -> Self {
        Self {
            max_dot_correction: DOT_CORRECTION_LIMIT,
            max_grayscale: 255,
            max_step_count: 770,
            max_step_delay: 65535,
            rgb_led_count: 5,
            sequence_count: 10,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_stock_board_values() {
        let cfg = SequencerConfiguration::new(63, 255, 770, 65535, 5, 10).unwrap();
        assert_eq!(cfg, SequencerConfiguration::default());
    }

    #[test]
    fn test_new_rejects_dot_correction_above_hardware_limit() {
        let result = SequencerConfiguration::new(64, 255, 770, 65535, 5, 10);
        assert!(matches!(
            result,
            Err(ValidationError::OutOfRange { name: "max_dot_correction", value: 64, .. })
        ));
    }

    #[test]
    fn test_new_rejects_zero_led_count() {
        let result = SequencerConfiguration::new(63, 255, 770, 65535, 0, 10);
        assert!(matches!(
            result,
            Err(ValidationError::OutOfRange { name: "rgb_led_count", .. })
        ));
    }

    #[test]
    fn test_new_rejects_zero_sequence_count() {
        let result = SequencerConfiguration::new(63, 255, 770, 65535, 5, 0);
        assert!(matches!(
            result,
            Err(ValidationError::OutOfRange { name: "sequence_count", .. })
        ));
    }

    #[test]
    fn test_check_sequence_index_upper_bound_is_exclusive() {
        let cfg = SequencerConfiguration::default();
        assert!(cfg.check_sequence_index(0).is_ok());
        assert!(cfg.check_sequence_index(9).is_ok());
        assert_eq!(
            cfg.check_sequence_index(10),
            Err(ValidationError::OutOfRange {
                name: "sequence_index",
                value: 10,
                min: 0,
                max: 9,
            })
        );
    }

    #[test]
    fn test_check_sequence_index_single_slot_device() {
        let cfg = SequencerConfiguration::new(63, 255, 770, 65535, 5, 1).unwrap();
        assert!(cfg.check_sequence_index(0).is_ok());
        assert!(cfg.check_sequence_index(1).is_err());
    }
}

//! Fixed-shape containers that mirror the device's storage layout.
//!
//! Dot-correction and grayscale snapshots hold exactly one value per LED in
//! natural chain order (index 0 is the first LED).  The wire protocol sends
//! LEDs last-first, but that reversal is the transport's business; these
//! containers never reorder anything.
//!
//! Equality and hashing are element-wise.

use std::ops::Index;
use std::slice;

use serde::Serialize;

use super::config::SequencerConfiguration;
use super::led::{LedDotCorrection, LedGrayscale};
use super::{check_range, ValidationError};

// ── DotCorrectionData ─────────────────────────────────────────────────────────

/// One [`LedDotCorrection`] per LED in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DotCorrectionData {
    leds: Vec<LedDotCorrection>,
}

impl DotCorrectionData {
    /// Wraps a collection holding exactly `config.rgb_led_count()` values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LengthMismatch`] for a wrong element count
    /// and [`ValidationError::OutOfRange`] for values above the configured
    /// maximum.
    pub fn new(
        config: &SequencerConfiguration,
        leds: Vec<LedDotCorrection>,
    ) -> Result<Self, ValidationError> {
        check_len("dot_correction", config.rgb_led_count(), leds.len())?;
        for led in &leds {
            led.check(config)?;
        }
        Ok(Self { leds })
    }

    /// Builds the container by calling `generator` once per LED index, in
    /// ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if a generated value exceeds
    /// the configured maximum.
    pub fn from_fn<F>(config: &SequencerConfiguration, generator: F) -> Result<Self, ValidationError>
    where
        F: FnMut(usize) -> LedDotCorrection,
    {
        let leds = (0..config.rgb_led_count()).map(generator).collect();
        Self::new(config, leds)
    }

    pub fn len(&self) -> usize {
        self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    pub fn get(&self, led_index: usize) -> Option<&LedDotCorrection> {
        self.leds.get(led_index)
    }

    pub fn iter(&self) -> slice::Iter<'_, LedDotCorrection> {
        self.leds.iter()
    }

    pub fn as_slice(&self) -> &[LedDotCorrection] {
        &self.leds
    }

    /// Re-checks the container against another configuration, e.g. before
    /// sending data built for one board to a differently configured one.
    pub fn validate(&self, config: &SequencerConfiguration) -> Result<(), ValidationError> {
        check_len("dot_correction", config.rgb_led_count(), self.leds.len())?;
        self.leds.iter().try_for_each(|led| led.check(config))
    }
}

impl Index<usize> for DotCorrectionData {
    type Output = LedDotCorrection;

    fn index(&self, led_index: usize) -> &LedDotCorrection {
        &self.leds[led_index]
    }
}

impl<'a> IntoIterator for &'a DotCorrectionData {
    type Item = &'a LedDotCorrection;
    type IntoIter = slice::Iter<'a, LedDotCorrection>;

    fn into_iter(self) -> Self::IntoIter {
        self.leds.iter()
    }
}

// ── GrayscaleData ─────────────────────────────────────────────────────────────

/// One [`LedGrayscale`] per LED in the chain: a single animation frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GrayscaleData {
    leds: Vec<LedGrayscale>,
}

impl GrayscaleData {
    /// Wraps a collection holding exactly `config.rgb_led_count()` values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LengthMismatch`] for a wrong element count
    /// and [`ValidationError::OutOfRange`] for values above the configured
    /// maximum.
    pub fn new(
        config: &SequencerConfiguration,
        leds: Vec<LedGrayscale>,
    ) -> Result<Self, ValidationError> {
        check_len("grayscale", config.rgb_led_count(), leds.len())?;
        for led in &leds {
            led.check(config)?;
        }
        Ok(Self { leds })
    }

    /// Builds the frame by calling `generator` once per LED index, in
    /// ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if a generated value exceeds
    /// the configured maximum.
    pub fn from_fn<F>(config: &SequencerConfiguration, generator: F) -> Result<Self, ValidationError>
    where
        F: FnMut(usize) -> LedGrayscale,
    {
        let leds = (0..config.rgb_led_count()).map(generator).collect();
        Self::new(config, leds)
    }

    /// A frame with every LED switched off.
    pub fn off(config: &SequencerConfiguration) -> Self {
        Self {
            leds: vec![LedGrayscale::off(); config.rgb_led_count()],
        }
    }

    pub fn len(&self) -> usize {
        self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    pub fn get(&self, led_index: usize) -> Option<&LedGrayscale> {
        self.leds.get(led_index)
    }

    pub fn iter(&self) -> slice::Iter<'_, LedGrayscale> {
        self.leds.iter()
    }

    pub fn as_slice(&self) -> &[LedGrayscale] {
        &self.leds
    }

    fn check(&self, config: &SequencerConfiguration) -> Result<(), ValidationError> {
        check_len("grayscale", config.rgb_led_count(), self.leds.len())?;
        self.leds.iter().try_for_each(|led| led.check(config))
    }
}

impl Index<usize> for GrayscaleData {
    type Output = LedGrayscale;

    fn index(&self, led_index: usize) -> &LedGrayscale {
        &self.leds[led_index]
    }
}

impl<'a> IntoIterator for &'a GrayscaleData {
    type Item = &'a LedGrayscale;
    type IntoIter = slice::Iter<'a, LedGrayscale>;

    fn into_iter(self) -> Self::IntoIter {
        self.leds.iter()
    }
}

// ── SequenceStep ──────────────────────────────────────────────────────────────

/// One frame of an animation plus how long the device holds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SequenceStep {
    grayscale: GrayscaleData,
    step_delay: u16,
}

impl SequenceStep {
    /// Creates a step.
    ///
    /// The delay is in device ticks; the firmware defines the tick length.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if `step_delay` exceeds
    /// `config.max_step_delay()`, or any error from re-checking `grayscale`
    /// against `config`.
    pub fn new(
        config: &SequencerConfiguration,
        grayscale: GrayscaleData,
        step_delay: u16,
    ) -> Result<Self, ValidationError> {
        check_range(
            "step_delay",
            i64::from(step_delay),
            0,
            i64::from(config.max_step_delay()),
        )?;
        grayscale.check(config)?;
        Ok(Self {
            grayscale,
            step_delay,
        })
    }

    pub fn grayscale(&self) -> &GrayscaleData {
        &self.grayscale
    }

    pub fn step_delay(&self) -> u16 {
        self.step_delay
    }

    fn check(&self, config: &SequencerConfiguration) -> Result<(), ValidationError> {
        check_range(
            "step_delay",
            i64::from(self.step_delay),
            0,
            i64::from(config.max_step_delay()),
        )?;
        self.grayscale.check(config)
    }
}

// ── SequenceData ──────────────────────────────────────────────────────────────

/// An ordered animation program of at most `max_step_count` steps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SequenceData {
    steps: Vec<SequenceStep>,
}

impl SequenceData {
    /// Wraps a collection of steps.  An empty sequence is valid.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TooLong`] when there are more than
    /// `config.max_step_count()` steps, or any error from re-checking a step.
    pub fn new(
        config: &SequencerConfiguration,
        steps: Vec<SequenceStep>,
    ) -> Result<Self, ValidationError> {
        let max = usize::from(config.max_step_count());
        if steps.len() > max {
            return Err(ValidationError::TooLong {
                name: "sequence",
                max,
                actual: steps.len(),
            });
        }
        for step in &steps {
            step.check(config)?;
        }
        Ok(Self { steps })
    }

    /// Builds `step_count` steps by calling `generator` once per step index,
    /// in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when `step_count` exceeds
    /// `config.max_step_count()`; the generator is not called in that case.
    pub fn from_fn<F>(
        config: &SequencerConfiguration,
        step_count: usize,
        generator: F,
    ) -> Result<Self, ValidationError>
    where
        F: FnMut(usize) -> SequenceStep,
    {
        check_range(
            "step_count",
            step_count as i64,
            0,
            i64::from(config.max_step_count()),
        )?;
        let steps = (0..step_count).map(generator).collect();
        Self::new(config, steps)
    }

    /// Number of steps, as sent on the wire.
    pub fn step_count(&self) -> u16 {
        // `new` bounds the length by a u16 maximum.
        self.steps.len() as u16
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, step_index: usize) -> Option<&SequenceStep> {
        self.steps.get(step_index)
    }

    pub fn iter(&self) -> slice::Iter<'_, SequenceStep> {
        self.steps.iter()
    }

    pub fn as_slice(&self) -> &[SequenceStep] {
        &self.steps
    }

    /// Re-checks every step against `config`.
    pub fn validate(&self, config: &SequencerConfiguration) -> Result<(), ValidationError> {
        let max = usize::from(config.max_step_count());
        if self.steps.len() > max {
            return Err(ValidationError::TooLong {
                name: "sequence",
                max,
                actual: self.steps.len(),
            });
        }
        self.steps.iter().try_for_each(|step| step.check(config))
    }
}

impl Index<usize> for SequenceData {
    type Output = SequenceStep;

    fn index(&self, step_index: usize) -> &SequenceStep {
        &self.steps[step_index]
    }
}

impl<'a> IntoIterator for &'a SequenceData {
    type Item = &'a SequenceStep;
    type IntoIter = slice::Iter<'a, SequenceStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

fn check_len(name: &'static str, expected: usize, actual: usize) -> Result<(), ValidationError> {
    if expected != actual {
        return Err(ValidationError::LengthMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SequencerConfiguration {
        SequencerConfiguration::new(63, 255, 4, 1000, 3, 2).unwrap()
    }

    fn gray(cfg: &SequencerConfiguration, v: u8) -> LedGrayscale {
        LedGrayscale::new(cfg, v, v, v).unwrap()
    }

    #[test]
    fn test_dot_correction_data_rejects_wrong_length() {
        let cfg = config();
        let leds = vec![LedDotCorrection::max(&cfg); 2];
        assert_eq!(
            DotCorrectionData::new(&cfg, leds),
            Err(ValidationError::LengthMismatch {
                name: "dot_correction",
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_dot_correction_data_from_fn_calls_generator_in_index_order() {
        let cfg = config();
        let mut seen = Vec::new();
        let data = DotCorrectionData::from_fn(&cfg, |i| {
            seen.push(i);
            LedDotCorrection::new(&cfg, i as u8, 0, 0).unwrap()
        })
        .unwrap();
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(data[2].red(), 2);
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_dot_correction_data_rejects_value_from_wider_configuration() {
        let narrow = SequencerConfiguration::new(10, 255, 4, 1000, 3, 2).unwrap();
        let wide = config();
        let leds = vec![LedDotCorrection::max(&wide); 3];
        assert!(matches!(
            DotCorrectionData::new(&narrow, leds),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_dot_correction_data_equality_is_structural() {
        let cfg = config();
        let a = DotCorrectionData::from_fn(&cfg, |_| LedDotCorrection::max(&cfg)).unwrap();
        let b = DotCorrectionData::new(&cfg, vec![LedDotCorrection::max(&cfg); 3]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_grayscale_data_off_has_one_dark_value_per_led() {
        let cfg = config();
        let frame = GrayscaleData::off(&cfg);
        assert_eq!(frame.len(), 3);
        assert!(frame.iter().all(|led| *led == LedGrayscale::off()));
    }

    #[test]
    fn test_sequence_step_rejects_delay_above_maximum() {
        let cfg = config();
        let result = SequenceStep::new(&cfg, GrayscaleData::off(&cfg), 1001);
        assert!(matches!(
            result,
            Err(ValidationError::OutOfRange { name: "step_delay", value: 1001, .. })
        ));
    }

    #[test]
    fn test_sequence_step_rejects_frame_for_different_led_count() {
        let cfg = config();
        let other = SequencerConfiguration::new(63, 255, 4, 1000, 4, 2).unwrap();
        let result = SequenceStep::new(&cfg, GrayscaleData::off(&other), 0);
        assert!(matches!(result, Err(ValidationError::LengthMismatch { .. })));
    }

    #[test]
    fn test_sequence_data_accepts_empty_sequence() {
        let seq = SequenceData::new(&config(), Vec::new()).unwrap();
        assert_eq!(seq.step_count(), 0);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_sequence_data_rejects_too_many_steps() {
        let cfg = config();
        let step = SequenceStep::new(&cfg, GrayscaleData::off(&cfg), 0).unwrap();
        assert_eq!(
            SequenceData::new(&cfg, vec![step; 5]),
            Err(ValidationError::TooLong {
                name: "sequence",
                max: 4,
                actual: 5,
            })
        );
    }

    #[test]
    fn test_sequence_data_from_fn_rejects_step_count_before_generating() {
        let cfg = config();
        let mut calls = 0;
        let result = SequenceData::from_fn(&cfg, 5, |_| {
            calls += 1;
            SequenceStep::new(&cfg, GrayscaleData::off(&cfg), 0).unwrap()
        });
        assert!(result.is_err());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_sequence_data_from_fn_preserves_step_order() {
        let cfg = config();
        let seq = SequenceData::from_fn(&cfg, 4, |i| {
            let frame = GrayscaleData::from_fn(&cfg, |_| gray(&cfg, i as u8)).unwrap();
            SequenceStep::new(&cfg, frame, i as u16 * 10).unwrap()
        })
        .unwrap();
        assert_eq!(seq.step_count(), 4);
        let delays: Vec<u16> = seq.iter().map(SequenceStep::step_delay).collect();
        assert_eq!(delays, vec![0, 10, 20, 30]);
        assert_eq!(seq[3].grayscale()[0].red(), 3);
    }

    #[test]
    fn test_validate_checks_data_against_another_configuration() {
        let cfg = config();
        let fewer_leds = SequencerConfiguration::new(63, 255, 4, 1000, 2, 2).unwrap();
        let shorter = SequencerConfiguration::new(63, 255, 1, 1000, 3, 2).unwrap();
        let dots = DotCorrectionData::from_fn(&cfg, |_| LedDotCorrection::max(&cfg)).unwrap();
        let seq = SequenceData::from_fn(&cfg, 2, |_| {
            SequenceStep::new(&cfg, GrayscaleData::off(&cfg), 0).unwrap()
        })
        .unwrap();

        assert!(dots.validate(&cfg).is_ok());
        assert!(seq.validate(&cfg).is_ok());
        assert!(matches!(
            dots.validate(&fewer_leds),
            Err(ValidationError::LengthMismatch { .. })
        ));
        assert!(matches!(
            seq.validate(&shorter),
            Err(ValidationError::TooLong { name: "sequence", max: 1, actual: 2 })
        ));
    }
}

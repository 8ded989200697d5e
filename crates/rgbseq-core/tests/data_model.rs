//! Integration tests for the rgbseq-core data model.
//!
//! These tests build complete sequences through the public API only, the
//! same way the host crate and the sequence-file importer do.

use std::collections::HashSet;

use rgbseq_core::{
    DotCorrectionData, GrayscaleData, LedDotCorrection, LedGrayscale, SequenceData,
    SequenceStep, SequencerConfiguration, ValidationError,
};

fn rainbow(cfg: &SequencerConfiguration, steps: usize) -> SequenceData {
    SequenceData::from_fn(cfg, steps, |step| {
        let frame = GrayscaleData::from_fn(cfg, |led| {
            let v = ((step * 31 + led * 17) % 256) as u8;
            LedGrayscale::new(cfg, v, 255 - v, v / 2).expect("grayscale in range")
        })
        .expect("frame");
        SequenceStep::new(cfg, frame, (step as u16) * 100).expect("step")
    })
    .expect("sequence")
}

#[test]
fn test_identical_sequences_hash_equal() {
    let cfg = SequencerConfiguration::default();
    let mut set = HashSet::new();
    set.insert(rainbow(&cfg, 6));
    set.insert(rainbow(&cfg, 6));
    assert_eq!(set.len(), 1, "structurally equal sequences must collapse");
    set.insert(rainbow(&cfg, 7));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_sequence_at_max_step_count_is_accepted() {
    let cfg = SequencerConfiguration::new(63, 255, 12, 65535, 5, 10).unwrap();
    let seq = rainbow(&cfg, 12);
    assert_eq!(seq.step_count(), 12);
    assert!(SequenceData::from_fn(&cfg, 13, |_| seq[0].clone()).is_err());
}

#[test]
fn test_dot_correction_data_serializes_as_plain_list() {
    let cfg = SequencerConfiguration::new(63, 255, 770, 65535, 2, 10).unwrap();
    let data = DotCorrectionData::new(
        &cfg,
        vec![
            LedDotCorrection::new(&cfg, 1, 2, 3).unwrap(),
            LedDotCorrection::new(&cfg, 4, 5, 6).unwrap(),
        ],
    )
    .unwrap();

    let json = serde_json::to_value(&data).unwrap();

    assert_eq!(
        json,
        serde_json::json!([
            { "red": 1, "green": 2, "blue": 3 },
            { "red": 4, "green": 5, "blue": 6 }
        ])
    );
}

#[test]
fn test_sequence_serializes_steps_with_delay_and_frame() {
    let cfg = SequencerConfiguration::new(63, 255, 770, 65535, 1, 10).unwrap();
    let frame = GrayscaleData::new(&cfg, vec![LedGrayscale::new(&cfg, 9, 8, 7).unwrap()]).unwrap();
    let seq = SequenceData::new(&cfg, vec![SequenceStep::new(&cfg, frame, 250).unwrap()]).unwrap();

    let json = serde_json::to_value(&seq).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "steps": [
                { "grayscale": [ { "red": 9, "green": 8, "blue": 7 } ], "step_delay": 250 }
            ]
        })
    );
}

#[test]
fn test_validation_error_messages_name_the_field() {
    let cfg = SequencerConfiguration::default();
    let err = LedDotCorrection::new(&cfg, 64, 0, 0).unwrap_err();
    assert_eq!(err.to_string(), "red must be between 0 and 63, got 64");

    let err = GrayscaleData::new(&cfg, Vec::new()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::LengthMismatch {
            name: "grayscale",
            expected: 5,
            actual: 0,
        }
    );
}

//! JSON files for dot-correction and sequence data.
//!
//! Export serialises the core types directly.  Import parses into plain
//! transfer structs first and then builds the core types through their
//! validated constructors, so a file written for a different board is
//! rejected with the same [`ValidationError`] a hand-built value would get.
//!
//! Dot correction is a plain list, one entry per LED:
//!
//! ```json
//! [ { "red": 63, "green": 63, "blue": 63 }, ... ]
//! ```
//!
//! A sequence is an object with its steps:
//!
//! ```json
//! { "steps": [ { "grayscale": [ { "red": 255, "green": 0, "blue": 0 }, ... ], "step_delay": 100 } ] }
//! ```

use std::path::{Path, PathBuf};

use rgbseq_core::{
    DotCorrectionData, GrayscaleData, LedDotCorrection, LedGrayscale, SequenceData, SequenceStep,
    SequencerConfiguration, ValidationError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SequenceFileError {
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file parsed but does not fit the configured board.
    #[error("data does not fit the sequencer configuration: {0}")]
    Invalid(#[from] ValidationError),
}

// ── Transfer structs ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LedFile {
    red: u8,
    green: u8,
    blue: u8,
}

#[derive(Debug, Deserialize)]
struct StepFile {
    grayscale: Vec<LedFile>,
    step_delay: u16,
}

#[derive(Debug, Deserialize)]
struct SequenceFile {
    steps: Vec<StepFile>,
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parses dot-correction JSON and validates it against `config`.
pub fn parse_dot_correction(
    json: &str,
    config: &SequencerConfiguration,
) -> Result<DotCorrectionData, SequenceFileError> {
    let leds: Vec<LedFile> = serde_json::from_str(json)?;
    let leds = leds
        .into_iter()
        .map(|led| LedDotCorrection::new(config, led.red, led.green, led.blue))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DotCorrectionData::new(config, leds)?)
}

/// Parses sequence JSON and validates it against `config`.
pub fn parse_sequence(
    json: &str,
    config: &SequencerConfiguration,
) -> Result<SequenceData, SequenceFileError> {
    let file: SequenceFile = serde_json::from_str(json)?;
    let steps = file
        .steps
        .into_iter()
        .map(|step| {
            let leds = step
                .grayscale
                .into_iter()
                .map(|led| LedGrayscale::new(config, led.red, led.green, led.blue))
                .collect::<Result<Vec<_>, _>>()?;
            SequenceStep::new(config, GrayscaleData::new(config, leds)?, step.step_delay)
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;
    Ok(SequenceData::new(config, steps)?)
}

// ── Files ─────────────────────────────────────────────────────────────────────

pub fn read_dot_correction_file(
    path: &Path,
    config: &SequencerConfiguration,
) -> Result<DotCorrectionData, SequenceFileError> {
    parse_dot_correction(&read(path)?, config)
}

pub fn write_dot_correction_file(
    path: &Path,
    data: &DotCorrectionData,
) -> Result<(), SequenceFileError> {
    write(path, &serde_json::to_string_pretty(data)?)
}

pub fn read_sequence_file(
    path: &Path,
    config: &SequencerConfiguration,
) -> Result<SequenceData, SequenceFileError> {
    parse_sequence(&read(path)?, config)
}

pub fn write_sequence_file(path: &Path, sequence: &SequenceData) -> Result<(), SequenceFileError> {
    write(path, &serde_json::to_string_pretty(sequence)?)
}

fn read(path: &Path) -> Result<String, SequenceFileError> {
    std::fs::read_to_string(path).map_err(|source| SequenceFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: &str) -> Result<(), SequenceFileError> {
    std::fs::write(path, content).map_err(|source| SequenceFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialises any exportable value to pretty JSON; used for stdout output.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, SequenceFileError> {
    Ok(serde_json::to_string_pretty(value)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

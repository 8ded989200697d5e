//! Command objects: one sequencer operation with its arguments bound.
//!
//! A command validates its arguments when it is built, so a command that
//! exists can only fail on the wire.  Commands hold an `Arc` to the shared
//! [`RgbLedSequencer`] and may be executed any number of times; progress goes
//! to whatever observer the sequencer was built with.
//!
//! All commands implement [`SequencerCommand`], so a mixed batch can be kept
//! as `Vec<Box<dyn SequencerCommand>>` and run through the
//! [`CommandExecutionManager`](super::execution::CommandExecutionManager).

use std::sync::Arc;

use async_trait::async_trait;
use rgbseq_core::{DotCorrectionData, SequenceData, ValidationError};

use super::sequencer::{RgbLedSequencer, SequencerError};

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The operation has no result beyond success.
    Completed,
    DotCorrection(DotCorrectionData),
    Sequence(SequenceData),
}

/// A replayable unit of work against a sequencer.
#[async_trait]
pub trait SequencerCommand: Send + Sync {
    /// Short name for logs, e.g. `"play-sequence"`.
    fn name(&self) -> &'static str;

    async fn execute(&self) -> Result<CommandOutcome, SequencerError>;
}

// ── Operations without arguments ──────────────────────────────────────────────

/// Resumes playback.
pub struct ContinueCommand {
    sequencer: Arc<RgbLedSequencer>,
}

impl ContinueCommand {
    pub fn new(sequencer: Arc<RgbLedSequencer>) -> Self {
        Self { sequencer }
    }
}

#[async_trait]
impl SequencerCommand for ContinueCommand {
    fn name(&self) -> &'static str {
        "continue"
    }

    async fn execute(&self) -> Result<CommandOutcome, SequencerError> {
        self.sequencer.continue_().await?;
        Ok(CommandOutcome::Completed)
    }
}

/// Puts the device to sleep.
pub struct SleepCommand {
    sequencer: Arc<RgbLedSequencer>,
}

impl SleepCommand {
    pub fn new(sequencer: Arc<RgbLedSequencer>) -> Self {
        Self { sequencer }
    }
}

#[async_trait]
impl SequencerCommand for SleepCommand {
    fn name(&self) -> &'static str {
        "sleep"
    }

    async fn execute(&self) -> Result<CommandOutcome, SequencerError> {
        self.sequencer.sleep().await?;
        Ok(CommandOutcome::Completed)
    }
}

/// Erases all stored sequences.
pub struct ClearSequencesCommand {
    sequencer: Arc<RgbLedSequencer>,
}

impl ClearSequencesCommand {
    pub fn new(sequencer: Arc<RgbLedSequencer>) -> Self {
        Self { sequencer }
    }
}

#[async_trait]
impl SequencerCommand for ClearSequencesCommand {
    fn name(&self) -> &'static str {
        "clear-sequences"
    }

    async fn execute(&self) -> Result<CommandOutcome, SequencerError> {
        self.sequencer.clear_sequences().await?;
        Ok(CommandOutcome::Completed)
    }
}

/// Reads the device's dot correction.
pub struct ReadDotCorrectionCommand {
    sequencer: Arc<RgbLedSequencer>,
}

impl ReadDotCorrectionCommand {
    pub fn new(sequencer: Arc<RgbLedSequencer>) -> Self {
        Self { sequencer }
    }
}

#[async_trait]
impl SequencerCommand for ReadDotCorrectionCommand {
    fn name(&self) -> &'static str {
        "read-dot-correction"
    }

    async fn execute(&self) -> Result<CommandOutcome, SequencerError> {
        let data = self.sequencer.read_dot_correction().await?;
        Ok(CommandOutcome::DotCorrection(data))
    }
}

// ── Operations with arguments ─────────────────────────────────────────────────

/// Writes dot correction for every LED.
pub struct SetDotCorrectionCommand {
    sequencer: Arc<RgbLedSequencer>,
    data: DotCorrectionData,
}

impl SetDotCorrectionCommand {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `data` does not match the sequencer's
    /// LED count or limits.
    pub fn new(
        sequencer: Arc<RgbLedSequencer>,
        data: DotCorrectionData,
    ) -> Result<Self, ValidationError> {
        data.validate(sequencer.config())?;
        Ok(Self { sequencer, data })
    }
}

#[async_trait]
impl SequencerCommand for SetDotCorrectionCommand {
    fn name(&self) -> &'static str {
        "set-dot-correction"
    }

    async fn execute(&self) -> Result<CommandOutcome, SequencerError> {
        self.sequencer.set_dot_correction(&self.data).await?;
        Ok(CommandOutcome::Completed)
    }
}

/// Plays one stored sequence.
pub struct PlaySequenceCommand {
    sequencer: Arc<RgbLedSequencer>,
    index: u8,
}

impl PlaySequenceCommand {
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if `index` is not a valid slot.
    pub fn new(sequencer: Arc<RgbLedSequencer>, index: u8) -> Result<Self, ValidationError> {
        sequencer.config().check_sequence_index(index)?;
        Ok(Self { sequencer, index })
    }
}

#[async_trait]
impl SequencerCommand for PlaySequenceCommand {
    fn name(&self) -> &'static str {
        "play-sequence"
    }

    async fn execute(&self) -> Result<CommandOutcome, SequencerError> {
        self.sequencer.play_sequence(self.index).await?;
        Ok(CommandOutcome::Completed)
    }
}

/// Reads one stored sequence back from the device.
pub struct ReadSequenceCommand {
    sequencer: Arc<RgbLedSequencer>,
    index: u8,
}

impl ReadSequenceCommand {
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if `index` is not a valid slot.
    pub fn new(sequencer: Arc<RgbLedSequencer>, index: u8) -> Result<Self, ValidationError> {
        sequencer.config().check_sequence_index(index)?;
        Ok(Self { sequencer, index })
    }
}

#[async_trait]
impl SequencerCommand for ReadSequenceCommand {
    fn name(&self) -> &'static str {
        "read-sequence"
    }

    async fn execute(&self) -> Result<CommandOutcome, SequencerError> {
        let sequence = self.sequencer.read_sequence(self.index).await?;
        Ok(CommandOutcome::Sequence(sequence))
    }
}

/// Stores a sequence in one slot.
pub struct SaveSequenceCommand {
    sequencer: Arc<RgbLedSequencer>,
    index: u8,
    sequence: SequenceData,
}

impl SaveSequenceCommand {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `index` is not a valid slot or
    /// `sequence` does not fit the sequencer's configuration.
    pub fn new(
        sequencer: Arc<RgbLedSequencer>,
        index: u8,
        sequence: SequenceData,
    ) -> Result<Self, ValidationError> {
        sequencer.config().check_sequence_index(index)?;
        sequence.validate(sequencer.config())?;
        Ok(Self {
            sequencer,
            index,
            sequence,
        })
    }
}

#[async_trait]
impl SequencerCommand for SaveSequenceCommand {
    fn name(&self) -> &'static str {
        "save-sequence"
    }

    async fn execute(&self) -> Result<CommandOutcome, SequencerError> {
        self.sequencer
            .save_sequence(self.index, &self.sequence)
            .await?;
        Ok(CommandOutcome::Completed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! RgbLedSequencer: the high-level device operations.
//!
//! Each operation is a fixed script of transport calls:
//!
//! 1. Report `(0, "Performing handshake.")` and handshake.
//! 2. Send the operation's instruction byte.
//! 3. Transfer the payload (if any), reporting progress as it goes.
//! 4. Report `(100, "<operation> complete.")`.
//!
//! Multi-LED payloads always travel last LED first, and each LED goes out as
//! blue, green, red.  Intermediate progress is `2 + 98 * fraction` so that
//! the first payload report sits just above the handshake report.
//!
//! Data read from the device is collected raw and validated only after the
//! whole transfer is over, so a bad value never leaves the device halfway
//! through a transmission.

use std::sync::Arc;
use std::time::Duration;

use rgbseq_core::{
    CommandProgress, DotCorrectionData, GrayscaleData, LedDotCorrection, LedGrayscale,
    SendInstruction, SequenceData, SequenceStep, SequencerConfiguration, ValidationError,
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::picaxe::{ByteChannel, PicaxeCommandInterface, TransportError};

/// Receives progress reports while an operation runs.
///
/// Called synchronously on the task running the operation; keep it cheap.
/// Any `Fn(&CommandProgress) + Send + Sync` closure is an observer.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: &CommandProgress);
}

impl<F> ProgressObserver for F
where
    F: Fn(&CommandProgress) + Send + Sync,
{
    fn on_progress(&self, progress: &CommandProgress) {
        self(progress)
    }
}

/// Error type for sequencer operations.
#[derive(Debug, Error)]
pub enum SequencerError {
    /// An argument was rejected before anything was sent.
    #[error("invalid argument: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The device answered with values its own configuration does not allow.
    #[error("device returned invalid data: {0}")]
    DeviceData(ValidationError),

    /// Another command is still running.
    #[error("another sequencer command is already running")]
    Busy,
}

/// Raw `(red, green, blue)` triple as read off the wire.
type RawLed = (u8, u8, u8);

/// Facade over one sequencer board.
pub struct RgbLedSequencer {
    config: Arc<SequencerConfiguration>,
    interface: Mutex<PicaxeCommandInterface>,
    observer: Option<Arc<dyn ProgressObserver>>,
}

impl RgbLedSequencer {
    /// Creates a facade for the board described by `config` on `channel`.
    pub fn new(config: Arc<SequencerConfiguration>, channel: Box<dyn ByteChannel>) -> Self {
        Self {
            config,
            interface: Mutex::new(PicaxeCommandInterface::new(channel)),
            observer: None,
        }
    }

    /// Attaches a progress observer.
    pub fn with_progress(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The board configuration every operation is validated against.
    pub fn config(&self) -> &SequencerConfiguration {
        &self.config
    }

    /// Changes the channel's read and write timeouts.
    ///
    /// Waits for any operation in flight to finish first; the new timeouts
    /// apply from the next operation on.
    pub async fn set_timeouts(
        &self,
        read: Duration,
        write: Duration,
    ) -> Result<(), SequencerError> {
        let mut interface = self.interface.lock().await;
        let channel = interface.channel_mut();
        channel.set_read_timeout(read)?;
        channel.set_write_timeout(write)?;
        debug!(?read, ?write, "channel timeouts changed");
        Ok(())
    }

    // ── Operations without payload ───────────────────────────────────────────

    /// Resumes sequence playback.
    pub async fn continue_(&self) -> Result<(), SequencerError> {
        self.run_bare(SendInstruction::Continue, "Continue complete.")
            .await
    }

    /// Puts the device into low-power sleep.
    pub async fn sleep(&self) -> Result<(), SequencerError> {
        self.run_bare(SendInstruction::Sleep, "Sleep complete.").await
    }

    /// Erases every stored sequence.
    pub async fn clear_sequences(&self) -> Result<(), SequencerError> {
        self.run_bare(SendInstruction::ClearSequences, "Clear sequences complete.")
            .await
    }

    // ── Dot correction ───────────────────────────────────────────────────────

    /// Writes per-LED dot correction to the device.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Validation`] if `data` does not fit this
    /// sequencer's configuration; nothing is sent in that case.
    pub async fn set_dot_correction(&self, data: &DotCorrectionData) -> Result<(), SequencerError> {
        data.validate(&self.config)?;
        let led_count = self.config.rgb_led_count();

        let mut interface = self.interface.lock().await;
        self.begin(&mut interface, SendInstruction::SetDotCorrection)
            .await?;
        for led_index in (0..led_count).rev() {
            self.report(
                dot_correction_progress(led_count, led_index),
                format!("Setting dot correction for LED {}.", led_index + 1),
            );
            let led = &data[led_index];
            send_rgb(&mut interface, led.red(), led.green(), led.blue()).await?;
        }
        self.report(100.0, "Set dot correction complete.");
        Ok(())
    }

    /// Reads the per-LED dot correction currently stored on the device.
    pub async fn read_dot_correction(&self) -> Result<DotCorrectionData, SequencerError> {
        let led_count = self.config.rgb_led_count();
        let mut raw: Vec<RawLed> = vec![(0, 0, 0); led_count];

        let mut interface = self.interface.lock().await;
        self.begin(&mut interface, SendInstruction::ReadDotCorrection)
            .await?;
        for led_index in (0..led_count).rev() {
            self.report(
                dot_correction_progress(led_count, led_index),
                format!("Reading dot correction for LED {}.", led_index + 1),
            );
            raw[led_index] = read_rgb(&mut interface).await?;
        }
        drop(interface);

        let data = raw
            .into_iter()
            .map(|(r, g, b)| LedDotCorrection::new(&self.config, r, g, b))
            .collect::<Result<Vec<_>, _>>()
            .and_then(|leds| DotCorrectionData::new(&self.config, leds))
            .map_err(SequencerError::DeviceData)?;
        self.report(100.0, "Read dot correction complete.");
        Ok(data)
    }

    // ── Sequences ────────────────────────────────────────────────────────────

    /// Starts playback of the stored sequence at `index`.
    pub async fn play_sequence(&self, index: u8) -> Result<(), SequencerError> {
        self.config.check_sequence_index(index)?;

        let mut interface = self.interface.lock().await;
        self.begin(&mut interface, SendInstruction::PlaySequence)
            .await?;
        self.report(75.0, format!("Playing sequence {index}."));
        interface.send_byte_when_ready(index).await?;
        self.report(100.0, "Play sequence complete.");
        Ok(())
    }

    /// Stores `sequence` in slot `index` on the device.
    pub async fn save_sequence(
        &self,
        index: u8,
        sequence: &SequenceData,
    ) -> Result<(), SequencerError> {
        self.config.check_sequence_index(index)?;
        sequence.validate(&self.config)?;
        let led_count = self.config.rgb_led_count();
        let step_count = usize::from(sequence.step_count());

        let mut interface = self.interface.lock().await;
        self.begin(&mut interface, SendInstruction::SaveSequence)
            .await?;
        interface.send_byte_when_ready(index).await?;
        interface
            .send_word_when_ready(sequence.step_count())
            .await?;
        for (step_index, step) in sequence.iter().enumerate() {
            for led_index in (0..led_count).rev() {
                self.report(
                    sequence_progress(led_count, step_count, step_index, led_index),
                    format!("Sending step {} LED {}.", step_index + 1, led_index + 1),
                );
                let led = &step.grayscale()[led_index];
                send_rgb(&mut interface, led.red(), led.green(), led.blue()).await?;
            }
            interface.send_word_when_ready(step.step_delay()).await?;
        }
        self.report(100.0, "Save sequence complete.");
        Ok(())
    }

    /// Reads the sequence stored in slot `index`.
    pub async fn read_sequence(&self, index: u8) -> Result<SequenceData, SequencerError> {
        self.config.check_sequence_index(index)?;
        let led_count = self.config.rgb_led_count();

        let mut interface = self.interface.lock().await;
        self.begin(&mut interface, SendInstruction::ReadSequence)
            .await?;
        interface.send_byte_when_ready(index).await?;
        let step_count = usize::from(interface.read_word().await?);
        debug!(index, step_count, "device reported sequence length");

        let mut raw_steps: Vec<(Vec<RawLed>, u16)> = Vec::with_capacity(step_count);
        for step_index in 0..step_count {
            let mut frame: Vec<RawLed> = vec![(0, 0, 0); led_count];
            for led_index in (0..led_count).rev() {
                self.report(
                    sequence_progress(led_count, step_count, step_index, led_index),
                    format!("Reading step {} LED {}.", step_index + 1, led_index + 1),
                );
                frame[led_index] = read_rgb(&mut interface).await?;
            }
            let step_delay = interface.read_word().await?;
            raw_steps.push((frame, step_delay));
        }
        drop(interface);

        let sequence = self
            .assemble_sequence(raw_steps)
            .map_err(SequencerError::DeviceData)?;
        self.report(100.0, "Read sequence complete.");
        Ok(sequence)
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    async fn run_bare(
        &self,
        instruction: SendInstruction,
        complete: &'static str,
    ) -> Result<(), SequencerError> {
        let mut interface = self.interface.lock().await;
        self.begin(&mut interface, instruction).await?;
        self.report(100.0, complete);
        Ok(())
    }

    async fn begin(
        &self,
        interface: &mut PicaxeCommandInterface,
        instruction: SendInstruction,
    ) -> Result<(), SequencerError> {
        self.report(0.0, "Performing handshake.");
        interface.handshake().await?;
        interface.send_instruction(instruction).await?;
        Ok(())
    }

    fn assemble_sequence(
        &self,
        raw_steps: Vec<(Vec<RawLed>, u16)>,
    ) -> Result<SequenceData, ValidationError> {
        let steps = raw_steps
            .into_iter()
            .map(|(frame, step_delay)| {
                let leds = frame
                    .into_iter()
                    .map(|(r, g, b)| LedGrayscale::new(&self.config, r, g, b))
                    .collect::<Result<Vec<_>, _>>()?;
                let grayscale = GrayscaleData::new(&self.config, leds)?;
                SequenceStep::new(&self.config, grayscale, step_delay)
            })
            .collect::<Result<Vec<_>, _>>()?;
        SequenceData::new(&self.config, steps)
    }

    fn report(&self, percentage: f64, action: impl Into<String>) {
        let Some(observer) = &self.observer else {
            return;
        };
        match CommandProgress::new(percentage, action) {
            Ok(progress) => observer.on_progress(&progress),
            Err(e) => warn!(error = %e, "dropping malformed progress report"),
        }
    }
}

async fn send_rgb(
    interface: &mut PicaxeCommandInterface,
    red: u8,
    green: u8,
    blue: u8,
) -> Result<(), TransportError> {
    interface.send_byte_when_ready(blue).await?;
    interface.send_byte_when_ready(green).await?;
    interface.send_byte_when_ready(red).await
}

async fn read_rgb(interface: &mut PicaxeCommandInterface) -> Result<RawLed, TransportError> {
    let blue = interface.read_byte().await?;
    let green = interface.read_byte().await?;
    let red = interface.read_byte().await?;
    Ok((red, green, blue))
}

fn dot_correction_progress(led_count: usize, led_index: usize) -> f64 {
    let done = led_count - 1 - led_index;
    2.0 + 98.0 * done as f64 / led_count as f64
}

fn sequence_progress(led_count: usize, step_count: usize, step_index: usize, led_index: usize) -> f64 {
    let position = step_index * led_count + (led_count - 1 - led_index);
    let total = led_count * step_count;
    2.0 + 98.0 * position as f64 / total as f64
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::channel::mock::{ChannelEvent, ScriptedByteChannel};
    use std::sync::Mutex as StdMutex;

    const HANDSHAKE: u8 = 0x11;
    const READY: u8 = 0x10;

    fn config(leds: u8) -> Arc<SequencerConfiguration> {
        Arc::new(SequencerConfiguration::new(63, 255, 770, 65535, leds, 10).unwrap())
    }

    fn sequencer(
        cfg: Arc<SequencerConfiguration>,
        script: impl IntoIterator<Item = u8>,
    ) -> (RgbLedSequencer, ScriptedByteChannel) {
        let channel = ScriptedByteChannel::with_script(script);
        let recorder = channel.clone();
        (RgbLedSequencer::new(cfg, Box::new(channel)), recorder)
    }

    fn recording(seq: RgbLedSequencer) -> (RgbLedSequencer, Arc<StdMutex<Vec<CommandProgress>>>) {
        let reports = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&reports);
        let seq = seq.with_progress(Arc::new(move |p: &CommandProgress| {
            sink.lock().unwrap().push(p.clone());
        }));
        (seq, reports)
    }

    fn percentages(reports: &StdMutex<Vec<CommandProgress>>) -> Vec<f64> {
        reports
            .lock()
            .unwrap()
            .iter()
            .map(CommandProgress::progress_percentage)
            .collect()
    }

    // ── Timeouts ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_set_timeouts_reaches_the_channel_without_wire_traffic() {
        // Arrange
        let (seq, recorder) = sequencer(config(5), Vec::new());

        // Act
        seq.set_timeouts(Duration::from_millis(250), Duration::from_secs(2))
            .await
            .unwrap();

        // Assert
        assert_eq!(
            recorder.events(),
            vec![
                ChannelEvent::ReadTimeout(Duration::from_millis(250)),
                ChannelEvent::WriteTimeout(Duration::from_secs(2)),
            ]
        );
        assert!(recorder.written().is_empty());
    }

    // ── Bare operations ───────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_bare_operations_send_handshake_then_instruction() {
        // Arrange
        let (continue_seq, continue_recorder) = sequencer(config(5), [HANDSHAKE]);
        let (sleep_seq, sleep_recorder) = sequencer(config(5), [HANDSHAKE]);
        let (clear_seq, clear_recorder) = sequencer(config(5), [HANDSHAKE]);

        // Act
        continue_seq.continue_().await.unwrap();
        sleep_seq.sleep().await.unwrap();
        clear_seq.clear_sequences().await.unwrap();

        // Assert
        assert_eq!(continue_recorder.written(), vec![0x05, 0x00]);
        assert_eq!(sleep_recorder.written(), vec![0x05, 0x04]);
        assert_eq!(clear_recorder.written(), vec![0x05, 0x06]);
        assert_eq!(
            sleep_recorder.events()[..3],
            [
                ChannelEvent::SetBreak(true),
                ChannelEvent::DiscardInput,
                ChannelEvent::SetBreak(false)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_continue_reports_start_and_completion_only() {
        let (seq, _recorder) = sequencer(config(5), [HANDSHAKE]);
        let (seq, reports) = recording(seq);

        seq.continue_().await.unwrap();

        let reports = reports.lock().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].current_action(), "Performing handshake.");
        assert_eq!(reports[1].current_action(), "Continue complete.");
        assert_eq!(reports[1].progress_percentage(), 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handshake_failure_surfaces_as_transport_error() {
        let (seq, recorder) = sequencer(config(5), [READY]);

        let err = seq.sleep().await.unwrap_err();

        assert!(matches!(
            err,
            SequencerError::Transport(TransportError::UnexpectedInstruction { .. })
        ));
        assert!(recorder.written().is_empty());
    }

    // ── Dot correction ────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_set_dot_correction_sends_last_led_first_as_blue_green_red() {
        // Arrange
        let cfg = config(2);
        let data = DotCorrectionData::new(
            &cfg,
            vec![
                LedDotCorrection::new(&cfg, 1, 2, 3).unwrap(),
                LedDotCorrection::new(&cfg, 4, 5, 6).unwrap(),
            ],
        )
        .unwrap();
        let script = std::iter::once(HANDSHAKE).chain(std::iter::repeat(READY).take(6));
        let (seq, recorder) = sequencer(cfg, script);

        // Act
        seq.set_dot_correction(&data).await.unwrap();

        // Assert
        assert_eq!(recorder.written(), vec![0x05, 0x01, 6, 5, 4, 3, 2, 1]);
        assert_eq!(recorder.remaining_script(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_dot_correction_progress_for_five_leds() {
        // Arrange
        let cfg = config(5);
        let data = DotCorrectionData::from_fn(&cfg, |_| LedDotCorrection::max(&cfg)).unwrap();
        let script = std::iter::once(HANDSHAKE).chain(std::iter::repeat(READY).take(15));
        let (seq, _recorder) = sequencer(cfg, script);
        let (seq, reports) = recording(seq);

        // Act
        seq.set_dot_correction(&data).await.unwrap();

        // Assert
        let values = percentages(&reports);
        let expected = [0.0, 2.0, 21.6, 41.2, 60.8, 80.4, 100.0];
        assert_eq!(values.len(), expected.len());
        for (got, want) in values.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            reports.lock().unwrap()[1].current_action(),
            "Setting dot correction for LED 5."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_dot_correction_rejects_data_for_other_led_count_before_sending() {
        let other = config(3);
        let data = DotCorrectionData::from_fn(&other, |_| LedDotCorrection::max(&other)).unwrap();
        let (seq, recorder) = sequencer(config(2), [HANDSHAKE]);

        let err = seq.set_dot_correction(&data).await.unwrap_err();

        assert!(matches!(err, SequencerError::Validation(_)));
        assert!(recorder.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_dot_correction_stores_each_led_at_natural_index() {
        // Arrange: device sends LED 1 then LED 0, each as blue, green, red
        let (seq, recorder) = sequencer(config(2), [HANDSHAKE, 6, 5, 4, 3, 2, 1]);

        // Act
        let data = seq.read_dot_correction().await.unwrap();

        // Assert
        assert_eq!(recorder.written(), vec![0x05, 0x08]);
        assert_eq!((data[0].red(), data[0].green(), data[0].blue()), (1, 2, 3));
        assert_eq!((data[1].red(), data[1].green(), data[1].blue()), (4, 5, 6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_dot_correction_out_of_range_value_is_device_data_after_full_transfer() {
        let (seq, recorder) = sequencer(config(2), [HANDSHAKE, 64, 0, 0, 0, 0, 0]);

        let err = seq.read_dot_correction().await.unwrap_err();

        assert!(matches!(
            err,
            SequencerError::DeviceData(ValidationError::OutOfRange { name: "blue", .. })
        ));
        assert_eq!(recorder.remaining_script(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_dot_correction_short_reply_times_out() {
        let (seq, _recorder) = sequencer(config(2), [HANDSHAKE, 1, 2]);

        let err = seq.read_dot_correction().await.unwrap_err();

        assert!(matches!(
            err,
            SequencerError::Transport(TransportError::Timeout)
        ));
    }

    // ── Sequences ─────────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_play_sequence_rejects_index_equal_to_sequence_count() {
        let (seq, recorder) = sequencer(config(5), [HANDSHAKE, READY]);

        let err = seq.play_sequence(10).await.unwrap_err();

        assert!(matches!(
            err,
            SequencerError::Validation(ValidationError::OutOfRange {
                name: "sequence_index",
                ..
            })
        ));
        assert!(recorder.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_sequence_zero_sends_gated_index_and_reports_75() {
        // Arrange
        let (seq, recorder) = sequencer(config(5), [HANDSHAKE, READY]);
        let (seq, reports) = recording(seq);

        // Act
        seq.play_sequence(0).await.unwrap();

        // Assert
        assert_eq!(recorder.written(), vec![0x05, 0x02, 0x00]);
        assert_eq!(percentages(&reports), vec![0.0, 75.0, 100.0]);
        assert_eq!(
            reports.lock().unwrap()[1].current_action(),
            "Playing sequence 0."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_sequence_wire_layout() {
        // Arrange: 1 LED, 2 steps
        let cfg = config(1);
        let steps = vec![
            SequenceStep::new(
                &cfg,
                GrayscaleData::new(&cfg, vec![LedGrayscale::new(&cfg, 10, 20, 30).unwrap()]).unwrap(),
                0x0102,
            )
            .unwrap(),
            SequenceStep::new(&cfg, GrayscaleData::off(&cfg), 7).unwrap(),
        ];
        let sequence = SequenceData::new(&cfg, steps).unwrap();
        // index + word + 2 * (3 + word) gated bytes
        let script = std::iter::once(HANDSHAKE).chain(std::iter::repeat(READY).take(13));
        let (seq, recorder) = sequencer(cfg, script);

        // Act
        seq.save_sequence(3, &sequence).await.unwrap();

        // Assert
        assert_eq!(
            recorder.written(),
            vec![0x05, 0x03, 3, 2, 0, 30, 20, 10, 0x02, 0x01, 0, 0, 0, 7, 0]
        );
        assert_eq!(recorder.remaining_script(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_sequence_progress_is_strictly_increasing() {
        let cfg = config(2);
        let sequence = SequenceData::from_fn(&cfg, 3, |_| {
            SequenceStep::new(&cfg, GrayscaleData::off(&cfg), 1).unwrap()
        })
        .unwrap();
        let gated = 1 + 2 + 3 * (2 * 3 + 2);
        let script = std::iter::once(HANDSHAKE).chain(std::iter::repeat(READY).take(gated));
        let (seq, _recorder) = sequencer(cfg, script);
        let (seq, reports) = recording(seq);

        seq.save_sequence(0, &sequence).await.unwrap();

        let values = percentages(&reports);
        assert_eq!(values.len(), 2 + 6);
        assert_eq!(values[1], 2.0);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_sequence_decodes_frames_and_delays() {
        // Arrange: 2 LEDs, 1 step, delay 0x0203
        let script = [HANDSHAKE, READY, 1, 0, 6, 5, 4, 3, 2, 1, 0x03, 0x02];
        let (seq, recorder) = sequencer(config(2), script);

        // Act
        let sequence = seq.read_sequence(4).await.unwrap();

        // Assert
        assert_eq!(recorder.written(), vec![0x05, 0x07, 4]);
        assert_eq!(sequence.step_count(), 1);
        let step = &sequence[0];
        assert_eq!(step.step_delay(), 0x0203);
        assert_eq!(step.grayscale()[0], LedGrayscale::new(&config(2), 1, 2, 3).unwrap());
        assert_eq!(step.grayscale()[1], LedGrayscale::new(&config(2), 4, 5, 6).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_sequence_empty_sequence_reports_no_payload_progress() {
        let (seq, _recorder) = sequencer(config(2), [HANDSHAKE, READY, 0, 0]);
        let (seq, reports) = recording(seq);

        let sequence = seq.read_sequence(0).await.unwrap();

        assert!(sequence.is_empty());
        assert_eq!(percentages(&reports), vec![0.0, 100.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_sequence_too_many_steps_is_device_data() {
        // Arrange: configuration allows one step, device claims two
        let cfg = Arc::new(SequencerConfiguration::new(63, 255, 1, 65535, 1, 10).unwrap());
        let script = [HANDSHAKE, READY, 2, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0];
        let (seq, recorder) = sequencer(cfg, script);

        // Act
        let err = seq.read_sequence(0).await.unwrap_err();

        // Assert
        assert!(matches!(
            err,
            SequencerError::DeviceData(ValidationError::TooLong { .. })
        ));
        assert_eq!(recorder.remaining_script(), 0);
    }

    #[test]
    fn test_sequence_progress_formula() {
        // 5 LEDs, 2 steps: first report of step 1 is position 5 of 10
        assert_eq!(sequence_progress(5, 2, 1, 4), 2.0 + 98.0 * 0.5);
        assert_eq!(dot_correction_progress(5, 4), 2.0);
    }
}

//! rgbseq: command-line driver for the PICAXE RGB LED sequencer.
//!
//! # Usage
//!
//! ```text
//! rgbseq [--config <FILE>] [--port <NAME>] <COMMAND>
//!
//! Commands:
//!   continue                          Resume sequence playback
//!   sleep                             Put the device to sleep
//!   clear-sequences                   Erase all stored sequences
//!   play <INDEX>                      Play a stored sequence
//!   read-dot-correction [--output F]  Print or save the dot correction
//!   set-dot-correction <R> <G> <B>    Same dot correction for every LED
//!   set-dot-correction --input F      Dot correction from a JSON file
//!   read-sequence <INDEX> [--output F]
//!   save-sequence <INDEX> <FILE>
//! ```
//!
//! Without `--output`, read commands print JSON to stdout.
//!
//! # Configuration
//!
//! Sequencer limits and serial port settings come from a TOML file (see
//! `infrastructure::storage::config`).  `--config` or `RGBSEQ_CONFIG`
//! selects the file; otherwise the platform config directory is used.
//! `--port` overrides the configured port name.
//!
//! Logging goes through `tracing`.  `RUST_LOG` wins over the `log_level` in
//! the config file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rgbseq_core::{CommandProgress, DotCorrectionData, LedDotCorrection, SequencerConfiguration};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rgbseq_host::application::commands::{
    ClearSequencesCommand, CommandOutcome, ContinueCommand, PlaySequenceCommand,
    ReadDotCorrectionCommand, ReadSequenceCommand, SaveSequenceCommand, SequencerCommand,
    SetDotCorrectionCommand, SleepCommand,
};
use rgbseq_host::application::execution::CommandExecutionManager;
use rgbseq_host::application::sequencer::RgbLedSequencer;
use rgbseq_host::infrastructure::channel::SerialPortChannel;
use rgbseq_host::infrastructure::storage::{config, sequence_file};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Drives a PICAXE RGB LED sequencer over a serial port.
#[derive(Debug, Parser)]
#[command(name = "rgbseq", version)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, env = "RGBSEQ_CONFIG")]
    config: Option<PathBuf>,

    /// Serial port name, overriding the config file (e.g. COM3, /dev/ttyUSB0).
    #[arg(long)]
    port: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resume sequence playback.
    Continue,
    /// Put the device into low-power sleep.
    Sleep,
    /// Erase every stored sequence.
    ClearSequences,
    /// Play the stored sequence at INDEX.
    Play { index: u8 },
    /// Read the dot correction stored on the device.
    ReadDotCorrection {
        /// Write JSON to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write dot correction: one RED GREEN BLUE triple for every LED, or a
    /// JSON file with one entry per LED.
    SetDotCorrection {
        #[arg(
            num_args = 3,
            value_names = ["RED", "GREEN", "BLUE"],
            required_unless_present = "input",
            conflicts_with = "input"
        )]
        values: Vec<u8>,
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Read the sequence stored at INDEX.
    ReadSequence {
        index: u8,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Store the JSON sequence in FILE at INDEX.
    SaveSequence { index: u8, file: PathBuf },
}

impl Command {
    /// Binds the subcommand to a sequencer command, validating arguments.
    fn into_sequencer_command(
        self,
        sequencer: Arc<RgbLedSequencer>,
    ) -> anyhow::Result<(Box<dyn SequencerCommand>, Option<PathBuf>)> {
        let config = *sequencer.config();
        let bound: (Box<dyn SequencerCommand>, Option<PathBuf>) = match self {
            Command::Continue => (Box::new(ContinueCommand::new(sequencer)), None),
            Command::Sleep => (Box::new(SleepCommand::new(sequencer)), None),
            Command::ClearSequences => (Box::new(ClearSequencesCommand::new(sequencer)), None),
            Command::Play { index } => (Box::new(PlaySequenceCommand::new(sequencer, index)?), None),
            Command::ReadDotCorrection { output } => {
                (Box::new(ReadDotCorrectionCommand::new(sequencer)), output)
            }
            Command::SetDotCorrection { values, input } => {
                let data = match input {
                    Some(path) => sequence_file::read_dot_correction_file(&path, &config)
                        .with_context(|| format!("loading dot correction from {}", path.display()))?,
                    None => uniform_dot_correction(&config, &values)?,
                };
                (Box::new(SetDotCorrectionCommand::new(sequencer, data)?), None)
            }
            Command::ReadSequence { index, output } => {
                (Box::new(ReadSequenceCommand::new(sequencer, index)?), output)
            }
            Command::SaveSequence { index, file } => {
                let sequence = sequence_file::read_sequence_file(&file, &config)
                    .with_context(|| format!("loading sequence from {}", file.display()))?;
                (Box::new(SaveSequenceCommand::new(sequencer, index, sequence)?), None)
            }
        };
        Ok(bound)
    }
}

fn uniform_dot_correction(
    config: &SequencerConfiguration,
    values: &[u8],
) -> anyhow::Result<DotCorrectionData> {
    let [red, green, blue] = values else {
        anyhow::bail!("expected RED GREEN BLUE, got {} values", values.len());
    };
    let led = LedDotCorrection::new(config, *red, *green, *blue)?;
    Ok(DotCorrectionData::from_fn(config, |_| led)?)
}

fn log_progress(progress: &CommandProgress) {
    info!(
        percent = format_args!("{:.0}", progress.progress_percentage()),
        "{}",
        progress.current_action()
    );
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_file_path()?,
    };
    let mut app_config = config::load_config_from(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    if let Some(port) = cli.port {
        app_config.serial_port.port_name = port;
    }
    let sequencer_config = app_config.validate()?;

    // `RUST_LOG` wins; otherwise the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.log_level)),
        )
        .init();

    info!(
        config = %config_path.display(),
        port = %app_config.serial_port.port_name,
        "rgbseq starting"
    );

    let channel = SerialPortChannel::open(&app_config.serial_port)
        .with_context(|| format!("opening serial port {}", app_config.serial_port.port_name))?;
    let sequencer = Arc::new(
        RgbLedSequencer::new(Arc::new(sequencer_config), Box::new(channel))
            .with_progress(Arc::new(log_progress)),
    );

    let (command, output) = cli.command.into_sequencer_command(sequencer)?;
    let manager = CommandExecutionManager::new();
    let outcome = manager.execute(command.as_ref()).await?;

    let json = match &outcome {
        CommandOutcome::Completed => return Ok(()),
        CommandOutcome::DotCorrection(data) => sequence_file::to_json(data)?,
        CommandOutcome::Sequence(sequence) => sequence_file::to_json(sequence)?,
    };
    match output {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "result written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Shared helpers for the rgbseq-host integration tests.

use std::sync::{Arc, Mutex};

use rgbseq_core::{CommandProgress, SequencerConfiguration};
use rgbseq_host::application::sequencer::RgbLedSequencer;
use rgbseq_host::infrastructure::channel::ScriptedByteChannel;

pub const HANDSHAKE: u8 = 0x11;
pub const READY: u8 = 0x10;

/// A sequencer on a scripted channel, plus a recorder into that channel.
pub fn scripted_sequencer(
    config: SequencerConfiguration,
    script: impl IntoIterator<Item = u8>,
) -> (Arc<RgbLedSequencer>, ScriptedByteChannel) {
    let channel = ScriptedByteChannel::with_script(script);
    let recorder = channel.clone();
    let sequencer = RgbLedSequencer::new(Arc::new(config), Box::new(channel));
    (Arc::new(sequencer), recorder)
}

/// Like [`scripted_sequencer`], recording every progress report.
pub fn observed_sequencer(
    config: SequencerConfiguration,
    script: impl IntoIterator<Item = u8>,
) -> (
    Arc<RgbLedSequencer>,
    ScriptedByteChannel,
    Arc<Mutex<Vec<CommandProgress>>>,
) {
    let channel = ScriptedByteChannel::with_script(script);
    let recorder = channel.clone();
    let reports = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reports);
    let sequencer = RgbLedSequencer::new(Arc::new(config), Box::new(channel)).with_progress(
        Arc::new(move |p: &CommandProgress| sink.lock().unwrap().push(p.clone())),
    );
    (Arc::new(sequencer), recorder, reports)
}

/// Handshake reply followed by `gates` ready codes.
pub fn gated_script(gates: usize) -> Vec<u8> {
    std::iter::once(HANDSHAKE)
        .chain(std::iter::repeat(READY).take(gates))
        .collect()
}

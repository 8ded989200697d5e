//! Scripted byte channel for tests.
//!
//! # Why a scripted channel?
//!
//! The real [`SerialPortChannel`](super::serial::SerialPortChannel) needs a
//! board on the other end of a cable.  `ScriptedByteChannel` replaces the
//! board with two in-memory lists:
//!
//! - a **script** of bytes the "device" will send, consumed one per
//!   `read_byte` call;
//! - an **event log** of every channel call the host made, in order.
//!
//! When the script runs dry, `read_byte` fails with
//! [`TransportError::Timeout`], exactly as a silent device would.
//!
//! # Usage in tests
//!
//! ```ignore
//! let channel = ScriptedByteChannel::with_script([0x11]);
//! let recorder = channel.clone();
//! let sequencer = RgbLedSequencer::new(config, Box::new(channel));
//!
//! sequencer.continue_().await.unwrap();
//!
//! assert_eq!(recorder.written(), vec![0x05, 0x00]);
//! ```
//!
//! Clones share state, so keep one clone as a recorder after handing the other
//! to the code under test.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::picaxe::{ByteChannel, TransportError};

/// One recorded channel call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEvent {
    SetBreak(bool),
    DiscardInput,
    /// A byte handed out from the script.
    Read(u8),
    Write(u8),
    ReadTimeout(Duration),
    WriteTimeout(Duration),
}

#[derive(Debug, Default)]
struct ScriptState {
    script: VecDeque<u8>,
    events: Vec<ChannelEvent>,
    fail_writes: bool,
}

/// An in-memory [`ByteChannel`] that plays a device script and records calls.
#[derive(Debug, Clone, Default)]
pub struct ScriptedByteChannel {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedByteChannel {
    /// Creates a channel with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a channel whose reads return `bytes` in order.
    pub fn with_script(bytes: impl IntoIterator<Item = u8>) -> Self {
        let channel = Self::new();
        channel.push_script(bytes);
        channel
    }

    /// Appends bytes to the end of the script.
    pub fn push_script(&self, bytes: impl IntoIterator<Item = u8>) {
        self.state().script.extend(bytes);
    }

    /// Makes every subsequent `write_byte` fail with a broken-pipe I/O error.
    pub fn fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    /// All channel calls recorded so far.
    pub fn events(&self) -> Vec<ChannelEvent> {
        self.state().events.clone()
    }

    /// Only the bytes written by the host, in order.
    pub fn written(&self) -> Vec<u8> {
        self.state()
            .events
            .iter()
            .filter_map(|event| match event {
                ChannelEvent::Write(byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }

    /// Number of script bytes not yet consumed.
    pub fn remaining_script(&self) -> usize {
        self.state().script.len()
    }

    fn state(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ByteChannel for ScriptedByteChannel {
    async fn read_byte(&mut self) -> Result<u8, TransportError> {
        let mut state = self.state();
        let byte = state.script.pop_front().ok_or(TransportError::Timeout)?;
        state.events.push(ChannelEvent::Read(byte));
        Ok(byte)
    }

    async fn write_byte(&mut self, value: u8) -> Result<(), TransportError> {
        let mut state = self.state();
        if state.fail_writes {
            return Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe).into());
        }
        state.events.push(ChannelEvent::Write(value));
        Ok(())
    }

    fn set_break(&mut self, asserted: bool) -> Result<(), TransportError> {
        self.state().events.push(ChannelEvent::SetBreak(asserted));
        Ok(())
    }

    fn discard_input_buffer(&mut self) -> Result<(), TransportError> {
        self.state().events.push(ChannelEvent::DiscardInput);
        Ok(())
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        self.state().events.push(ChannelEvent::ReadTimeout(timeout));
        Ok(())
    }

    fn set_write_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        self.state().events.push(ChannelEvent::WriteTimeout(timeout));
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

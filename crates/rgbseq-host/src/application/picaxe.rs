//! PICAXE wire protocol transport.
//!
//! Implements the handshake and the ready-gated transfer primitives on top of
//! a [`ByteChannel`].
//!
//! # Protocol
//!
//! ```text
//! Host                                   Device
//! ────                                   ──────
//! set break ──────────────────────────►  (resets into command mode)
//! wait 500 ms, discard input, clear break
//!                                 ◄────  0x11 Handshake
//! 0x05 Handshake ─────────────────────►
//! wait 50 ms
//! instruction byte ───────────────────►
//!                                 ◄────  0x10 Ready
//! payload byte ───────────────────────►
//!                                 ◄────  0x10 Ready
//! payload byte ───────────────────────►  ...
//! ```
//!
//! Words travel as two gated bytes, low byte first.  Reads from the device
//! are not gated: the host simply reads raw bytes.
//!
//! Any error leaves the device in an unknown state.  Nothing here retries;
//! the recovery path is always a fresh [`PicaxeCommandInterface::handshake`].

use std::time::Duration;

use async_trait::async_trait;
use rgbseq_core::{ReceiveInstruction, ReceivedCode, SendInstruction};
use thiserror::Error;
use tracing::{debug, trace};

#[cfg(test)]
use mockall::automock;

/// How long the break signal is held before the handshake exchange.
pub const BREAK_STATE_TIME: Duration = Duration::from_millis(500);

/// Settle time after the handshake code has been written.
pub const HANDSHAKE_TIME: Duration = Duration::from_millis(50);

/// Errors raised by the transport and by [`ByteChannel`] implementations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A read or write did not complete within the channel's timeout.
    #[error("serial channel timed out")]
    Timeout,

    /// The device sent something other than the code the protocol expects.
    #[error("expected {expected} but received {received}")]
    UnexpectedInstruction {
        expected: ReceiveInstruction,
        received: ReceivedCode,
    },

    /// Any other channel failure.
    #[error("serial channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A primitive, single-owner byte channel to the device.
///
/// Implementations must fail with [`TransportError::Timeout`] when a read or
/// write exceeds the configured timeout.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ByteChannel: Send {
    /// Reads exactly one byte.
    async fn read_byte(&mut self) -> Result<u8, TransportError>;

    /// Writes exactly one byte.
    async fn write_byte(&mut self, value: u8) -> Result<(), TransportError>;

    /// Asserts (`true`) or clears (`false`) the break signal.
    fn set_break(&mut self, asserted: bool) -> Result<(), TransportError>;

    /// Drops any bytes waiting in the receive buffer.
    fn discard_input_buffer(&mut self) -> Result<(), TransportError>;

    /// Sets how long [`ByteChannel::read_byte`] waits before timing out.
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<(), TransportError>;

    /// Sets how long [`ByteChannel::write_byte`] waits before timing out.
    fn set_write_timeout(&mut self, timeout: Duration) -> Result<(), TransportError>;
}

/// The PICAXE protocol on top of a [`ByteChannel`].
pub struct PicaxeCommandInterface {
    channel: Box<dyn ByteChannel>,
}

impl PicaxeCommandInterface {
    /// Wraps `channel`; nothing is sent until the first handshake.
    pub fn new(channel: Box<dyn ByteChannel>) -> Self {
        Self { channel }
    }

    /// Gives access to the channel, e.g. to adjust timeouts.
    pub fn channel_mut(&mut self) -> &mut dyn ByteChannel {
        self.channel.as_mut()
    }

    /// Synchronises with the device so that it accepts one instruction.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::UnexpectedInstruction`] if the device does not
    /// answer with the handshake code, or any channel error.
    pub async fn handshake(&mut self) -> Result<(), TransportError> {
        debug!("asserting break for handshake");
        self.channel.set_break(true)?;
        tokio::time::sleep(BREAK_STATE_TIME).await;
        self.channel.discard_input_buffer()?;
        self.channel.set_break(false)?;
        self.check_received_instruction(ReceiveInstruction::Handshake)
            .await?;
        self.send_instruction(SendInstruction::Handshake).await?;
        tokio::time::sleep(HANDSHAKE_TIME).await;
        debug!("handshake complete");
        Ok(())
    }

    /// Writes an instruction byte without waiting for the ready code.
    pub async fn send_instruction(
        &mut self,
        instruction: SendInstruction,
    ) -> Result<(), TransportError> {
        debug!(?instruction, "sending instruction");
        self.channel.write_byte(instruction.code()).await
    }

    /// Waits for the device's ready code, then writes `value`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::UnexpectedInstruction`] if the byte read is
    /// not [`ReceiveInstruction::Ready`]; `value` is not written in that case.
    pub async fn send_byte_when_ready(&mut self, value: u8) -> Result<(), TransportError> {
        self.check_received_instruction(ReceiveInstruction::Ready)
            .await?;
        trace!(value, "writing payload byte");
        self.channel.write_byte(value).await
    }

    /// Sends `value` as two ready-gated bytes, low byte first.
    pub async fn send_word_when_ready(&mut self, value: u16) -> Result<(), TransportError> {
        let [low, high] = value.to_le_bytes();
        self.send_byte_when_ready(low).await?;
        self.send_byte_when_ready(high).await
    }

    /// Reads one raw byte.
    pub async fn read_byte(&mut self) -> Result<u8, TransportError> {
        let value = self.channel.read_byte().await?;
        trace!(value, "read payload byte");
        Ok(value)
    }

    /// Reads two raw bytes, low byte first.
    pub async fn read_word(&mut self) -> Result<u16, TransportError> {
        let low = self.read_byte().await?;
        let high = self.read_byte().await?;
        Ok(u16::from_le_bytes([low, high]))
    }

    async fn check_received_instruction(
        &mut self,
        expected: ReceiveInstruction,
    ) -> Result<(), TransportError> {
        let received = ReceivedCode(self.channel.read_byte().await?);
        if received != expected {
            return Err(TransportError::UnexpectedInstruction { expected, received });
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Instruction codes exchanged with the sequencer firmware.
//!
//! The host writes a [`SendInstruction`] byte to start an operation and the
//! device paces every transfer with [`ReceiveInstruction`] bytes.  The numeric
//! values are burned into the PICAXE firmware.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Instruction codes written by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SendInstruction {
    Continue = 0,
    SetDotCorrection = 1,
    PlaySequence = 2,
    SaveSequence = 3,
    Sleep = 4,
    Handshake = 5,
    ClearSequences = 6,
    ReadSequence = 7,
    ReadDotCorrection = 8,
}

impl SendInstruction {
    /// Returns the byte written on the wire.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SendInstruction {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0 => Ok(SendInstruction::Continue),
            1 => Ok(SendInstruction::SetDotCorrection),
            2 => Ok(SendInstruction::PlaySequence),
            3 => Ok(SendInstruction::SaveSequence),
            4 => Ok(SendInstruction::Sleep),
            5 => Ok(SendInstruction::Handshake),
            6 => Ok(SendInstruction::ClearSequences),
            7 => Ok(SendInstruction::ReadSequence),
            8 => Ok(SendInstruction::ReadDotCorrection),
            _ => Err(()),
        }
    }
}

/// Receive codes written by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ReceiveInstruction {
    Undefined = 0x00,
    /// The device is ready for the next payload byte.
    Ready = 0x10,
    /// The device answers a break signal with this code.
    Handshake = 0x11,
}

impl ReceiveInstruction {
    /// Returns the byte read from the wire.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ReceiveInstruction {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0x00 => Ok(ReceiveInstruction::Undefined),
            0x10 => Ok(ReceiveInstruction::Ready),
            0x11 => Ok(ReceiveInstruction::Handshake),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ReceiveInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (0x{:02X})", self, self.code())
    }
}

/// A raw byte received where a [`ReceiveInstruction`] was expected.
///
/// The device can put anything on the wire, so the raw value is kept and
/// decoded lazily for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceivedCode(pub u8);

impl ReceivedCode {
    /// Decodes the byte, or `None` if it is not a known receive code.
    pub fn instruction(self) -> Option<ReceiveInstruction> {
        ReceiveInstruction::try_from(self.0).ok()
    }
}

impl From<ReceiveInstruction> for ReceivedCode {
    fn from(instruction: ReceiveInstruction) -> Self {
        ReceivedCode(instruction.code())
    }
}

impl PartialEq<ReceiveInstruction> for ReceivedCode {
    fn eq(&self, other: &ReceiveInstruction) -> bool {
        self.0 == other.code()
    }
}

impl fmt::Display for ReceivedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.instruction() {
            Some(instruction) => instruction.fmt(f),
            None => write!(f, "unknown code (0x{:02X})", self.0),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! # rgbseq-core
//!
//! Shared library for the RGB LED sequencer host driver containing the
//! validated data model and the PICAXE wire instruction codes.
//!
//! It has zero dependencies on serial ports, async runtimes, or the file
//! system; everything here can be constructed and tested in isolation.
//!
//! # Architecture overview
//!
//! The sequencer is a small board built around a PICAXE microcontroller that
//! drives a chain of RGB LEDs.  The host talks to it over a serial link using
//! a byte-at-a-time protocol.  This crate defines:
//!
//! - **`domain`** – The capability descriptor ([`SequencerConfiguration`]) and
//!   the fixed-shape value containers that are validated against it: per-LED
//!   dot correction and grayscale values, whole-chain snapshots, animation
//!   steps and sequences, and command progress reports.
//!
//! - **`protocol`** – The instruction codes the host sends and the receive
//!   codes the device answers with.  The numeric values are fixed by the
//!   firmware and must never change.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `rgbseq_core::SequenceData` instead of the full module path.
pub use domain::config::SequencerConfiguration;
pub use domain::data::{DotCorrectionData, GrayscaleData, SequenceData, SequenceStep};
pub use domain::led::{LedDotCorrection, LedGrayscale};
pub use domain::progress::CommandProgress;
pub use domain::ValidationError;
pub use protocol::instruction::{ReceiveInstruction, ReceivedCode, SendInstruction};

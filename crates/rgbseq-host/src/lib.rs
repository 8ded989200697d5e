//! rgbseq-host library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does rgbseq-host do?
//!
//! The host talks to the sequencer board over a serial line.  Every
//! operation follows the same shape:
//!
//! 1. Hold a break signal so the PICAXE drops whatever it is doing, then
//!    exchange handshake codes.
//! 2. Send one instruction byte (continue, sleep, play a sequence, ...).
//! 3. Transfer the payload one byte at a time, waiting for the device to say
//!    "ready" before every byte it receives.
//!
//! The layers are:
//!
//! - **`application`** – The protocol transport (`PicaxeCommandInterface`),
//!   the device-operation facade (`RgbLedSequencer`), replayable command
//!   objects and the `CommandExecutionManager` that allows one command at a
//!   time.  Depends only on the `ByteChannel` trait.
//!
//! - **`infrastructure`** – Concrete channels (the `serialport` backend and a
//!   scripted recording channel for tests), the TOML config store and the
//!   JSON sequence-file format.

/// Application layer: protocol transport, sequencer facade and commands.
pub mod application;

/// Infrastructure layer: serial port, config and file adapters.
pub mod infrastructure;

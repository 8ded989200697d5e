//! Application layer for the sequencer host.
//!
//! Nothing in this layer opens a port or touches the file system.  The
//! physical link is reached only through the [`picaxe::ByteChannel`] trait,
//! which the infrastructure layer implements.
//!
//! # Sub-modules
//!
//! - **`picaxe`** – The PICAXE handshake and the ready-gated byte and word
//!   transfer primitives.
//!
//! - **`sequencer`** – `RgbLedSequencer`, which turns each device
//!   operation into a fixed script of transport calls and reports progress.
//!
//! - **`commands`** – One struct per operation with its parameters bound and
//!   validated up front, all behind the `SequencerCommand` trait.
//!
//! - **`execution`** – `CommandExecutionManager`, which rejects a command
//!   while another is still on the wire.

pub mod commands;
pub mod execution;
pub mod picaxe;
pub mod sequencer;

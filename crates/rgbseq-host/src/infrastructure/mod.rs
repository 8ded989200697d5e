//! Infrastructure layer for the sequencer host.
//!
//! Contains the adapters that touch the outside world: the serial port, the
//! TOML configuration file and JSON data files.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `rgbseq_core`.  Application code reaches it only through the `ByteChannel`
//! trait; the scripted channel is the one exception, used by tests.

pub mod channel;
pub mod storage;

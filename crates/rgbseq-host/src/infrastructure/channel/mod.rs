//! `ByteChannel` implementations.
//!
//! - **`serial`** – The real link, built on the `serialport` crate.
//! - **`mock`** – An in-memory channel that plays a scripted device and
//!   records every call.  Always compiled so integration tests in `tests/`
//!   can use it.

pub mod mock;
pub mod serial;

pub use mock::{ChannelEvent, ScriptedByteChannel};
pub use serial::SerialPortChannel;

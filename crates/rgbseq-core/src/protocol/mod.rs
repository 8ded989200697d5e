//! PICAXE wire protocol constants.

pub mod instruction;

pub use instruction::{ReceiveInstruction, ReceivedCode, SendInstruction};

//! Storage infrastructure: configuration and data files.
//!
//! - **`config`** – The TOML application config (sequencer limits, serial
//!   port settings, log level) in the platform config directory.
//! - **`sequence_file`** – JSON import and export of dot-correction and
//!   sequence data.  Imports go through the validated constructors.

pub mod config;
pub mod sequence_file;

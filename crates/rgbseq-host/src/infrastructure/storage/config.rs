//! TOML-based configuration for the sequencer host.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\RgbLedSequencer\config.toml`
//! - Linux:    `~/.config/rgbledsequencer/config.toml`
//! - macOS:    `~/Library/Application Support/RgbLedSequencer/config.toml`
//!
//! The command-line tool can point at any other file instead.
//!
//! ```toml
//! log_level = "info"
//!
//! [sequencer]
//! max_dot_correction = 63
//! max_grayscale = 255
//! max_step_count = 770
//! max_step_delay = 65535
//! rgb_led_count = 5
//! sequence_count = 10
//!
//! [serial_port]
//! port_name = "COM1"
//! baud_rate = 38400
//! parity = "none"
//! data_bits = 8
//! stop_bits = "one"
//! read_timeout_ms = 3000
//! write_timeout_ms = 3000
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = "...")]`, so an empty file (or no
//! file at all) yields the stock board on `COM1`.  A file only needs the
//! values that differ.
//!
//! Loading validates the result: the `[sequencer]` section must form a valid
//! [`SequencerConfiguration`] and the port settings must be ones the PICAXE
//! serial hardware can use.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rgbseq_core::{SequencerConfiguration, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Baud rates the serial port settings accept.
pub const SUPPORTED_BAUD_RATES: [u32; 15] = [
    110, 300, 600, 1200, 1800, 2400, 4800, 7200, 9600, 14400, 19200, 38400, 57600, 76800, 115200,
];

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The `[sequencer]` section does not describe a valid device.
    #[error("invalid sequencer settings: {0}")]
    Sequencer(#[from] ValidationError),

    #[error("unsupported baud rate {0}")]
    UnsupportedBaudRate(u32),

    #[error("data bits must be between 5 and 8, got {0}")]
    InvalidDataBits(u8),

    #[error("serial port name must not be empty")]
    EmptyPortName,
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub sequencer: SequencerSettings,
    #[serde(default)]
    pub serial_port: SerialPortSettings,
}

/// Capabilities of the attached board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SequencerSettings {
    #[serde(default = "default_max_dot_correction")]
    pub max_dot_correction: u8,
    #[serde(default = "default_max_grayscale")]
    pub max_grayscale: u8,
    #[serde(default = "default_max_step_count")]
    pub max_step_count: u16,
    #[serde(default = "default_max_step_delay")]
    pub max_step_delay: u16,
    #[serde(default = "default_rgb_led_count")]
    pub rgb_led_count: u8,
    #[serde(default = "default_sequence_count")]
    pub sequence_count: u8,
}

/// Serial line parity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParitySetting {
    #[default]
    None,
    Odd,
    Even,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StopBitsSetting {
    #[default]
    One,
    Two,
}

/// How to open the serial port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SerialPortSettings {
    /// OS name of the port, e.g. `"COM3"` or `"/dev/ttyUSB0"`.
    #[serde(default = "default_port_name")]
    pub port_name: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    #[serde(default)]
    pub parity: ParitySetting,
    #[serde(default = "default_data_bits")]
    pub data_bits: u8,
    #[serde(default)]
    pub stop_bits: StopBitsSetting,
    #[serde(default = "default_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub write_timeout_ms: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_dot_correction() -> u8 {
    63
}
fn default_max_grayscale() -> u8 {
    255
}
fn default_max_step_count() -> u16 {
    770
}
fn default_max_step_delay() -> u16 {
    65535
}
fn default_rgb_led_count() -> u8 {
    5
}
fn default_sequence_count() -> u8 {
    10
}
fn default_port_name() -> String {
    "COM1".to_string()
}
fn default_baud_rate() -> u32 {
    38400
}
fn default_data_bits() -> u8 {
    8
}
fn default_timeout_ms() -> u64 {
    3000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            sequencer: SequencerSettings::default(),
            serial_port: SerialPortSettings::default(),
        }
    }
}

impl Default for SequencerSettings {
    fn default() -> Self {
        Self {
            max_dot_correction: default_max_dot_correction(),
            max_grayscale: default_max_grayscale(),
            max_step_count: default_max_step_count(),
            max_step_delay: default_max_step_delay(),
            rgb_led_count: default_rgb_led_count(),
            sequence_count: default_sequence_count(),
        }
    }
}

impl Default for SerialPortSettings {
    fn default() -> Self {
        Self {
            port_name: default_port_name(),
            baud_rate: default_baud_rate(),
            parity: ParitySetting::default(),
            data_bits: default_data_bits(),
            stop_bits: StopBitsSetting::default(),
            read_timeout_ms: default_timeout_ms(),
            write_timeout_ms: default_timeout_ms(),
        }
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

impl SequencerSettings {
    /// Builds the validated capability descriptor.
    pub fn to_configuration(&self) -> Result<SequencerConfiguration, ValidationError> {
        SequencerConfiguration::new(
            self.max_dot_correction,
            self.max_grayscale,
            self.max_step_count,
            self.max_step_delay,
            self.rgb_led_count,
            self.sequence_count,
        )
    }
}

impl SerialPortSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port_name.trim().is_empty() {
            return Err(ConfigError::EmptyPortName);
        }
        if !SUPPORTED_BAUD_RATES.contains(&self.baud_rate) {
            return Err(ConfigError::UnsupportedBaudRate(self.baud_rate));
        }
        if !(5..=8).contains(&self.data_bits) {
            return Err(ConfigError::InvalidDataBits(self.data_bits));
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

impl AppConfig {
    /// Checks every section and returns the sequencer configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Sequencer`] for an impossible device description
    /// or one of the serial-port variants for unusable port settings.
    pub fn validate(&self) -> Result<SequencerConfiguration, ConfigError> {
        let sequencer = self.sequencer.to_configuration()?;
        self.serial_port.validate()?;
        Ok(sequencer)
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads and validates `AppConfig` from `path`, returning the defaults if
/// the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, or a validation variant
/// if the values are unusable.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let cfg = match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str::<AppConfig>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("RgbLedSequencer"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("rgbledsequencer"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("RgbLedSequencer")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

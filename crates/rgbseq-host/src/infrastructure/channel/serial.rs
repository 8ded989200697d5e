//! Serial port `ByteChannel` built on the `serialport` crate.
//!
//! `serialport` is a blocking API, so every read and write runs on tokio's
//! blocking pool via `spawn_blocking`.  The port lives behind an
//! `Arc<Mutex<_>>` so the blocking closure can own a handle to it.
//!
//! The port has a single OS timeout; the channel keeps separate read and
//! write timeouts and applies the right one before each operation.  An
//! expired timeout surfaces as [`TransportError::Timeout`].
//!
//! Dropping a `read_byte` or `write_byte` future does not stop the blocking
//! call: it runs until its own timeout and holds the port lock until then.
//! `set_break` and `discard_input_buffer` take the same lock synchronously,
//! so right after a cancelled read they can block the calling thread for up
//! to the read timeout.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info};

use crate::application::picaxe::{ByteChannel, TransportError};
use crate::infrastructure::storage::config::{ParitySetting, SerialPortSettings, StopBitsSetting};

/// A `ByteChannel` over a physical serial port.
pub struct SerialPortChannel {
    port: Arc<Mutex<Box<dyn SerialPort>>>,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl SerialPortChannel {
    /// Opens the port described by `settings` and asserts DTR and RTS.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] if the port cannot be opened or
    /// configured, including unsupported data-bit counts.
    pub fn open(settings: &SerialPortSettings) -> Result<Self, TransportError> {
        let mut port = serialport::new(&settings.port_name, settings.baud_rate)
            .data_bits(data_bits(settings.data_bits)?)
            .parity(match settings.parity {
                ParitySetting::None => Parity::None,
                ParitySetting::Odd => Parity::Odd,
                ParitySetting::Even => Parity::Even,
            })
            .stop_bits(match settings.stop_bits {
                StopBitsSetting::One => StopBits::One,
                StopBitsSetting::Two => StopBits::Two,
            })
            .flow_control(FlowControl::None)
            .timeout(settings.read_timeout())
            .open()
            .map_err(io::Error::from)?;

        port.write_data_terminal_ready(true)
            .map_err(io::Error::from)?;
        port.write_request_to_send(true).map_err(io::Error::from)?;

        info!(
            port = %settings.port_name,
            baud = settings.baud_rate,
            "serial port opened"
        );
        Ok(Self {
            port: Arc::new(Mutex::new(port)),
            read_timeout: settings.read_timeout(),
            write_timeout: settings.write_timeout(),
        })
    }

    /// Locks the port on the calling thread.  Blocks while a cancelled
    /// transfer is still running on the blocking pool.
    fn lock(&self) -> Result<MutexGuard<'_, Box<dyn SerialPort>>, TransportError> {
        self.port
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "serial port lock poisoned").into())
    }

    async fn blocking<T, F>(&self, timeout: Duration, op: F) -> Result<T, TransportError>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn SerialPort) -> io::Result<T> + Send + 'static,
    {
        let port = Arc::clone(&self.port);
        let joined = tokio::task::spawn_blocking(move || {
            let mut port = port
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "serial port lock poisoned"))?;
            port.set_timeout(timeout)?;
            op(port.as_mut())
        })
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        joined.map_err(map_io_error)
    }
}

#[async_trait]
impl ByteChannel for SerialPortChannel {
    async fn read_byte(&mut self) -> Result<u8, TransportError> {
        self.blocking(self.read_timeout, |port| {
            let mut buf = [0u8; 1];
            port.read_exact(&mut buf)?;
            Ok(buf[0])
        })
        .await
    }

    async fn write_byte(&mut self, value: u8) -> Result<(), TransportError> {
        self.blocking(self.write_timeout, move |port| {
            port.write_all(&[value])?;
            port.flush()
        })
        .await
    }

    fn set_break(&mut self, asserted: bool) -> Result<(), TransportError> {
        let port = self.lock()?;
        let result = if asserted {
            port.set_break()
        } else {
            port.clear_break()
        };
        result.map_err(|e| io::Error::from(e).into())
    }

    fn discard_input_buffer(&mut self) -> Result<(), TransportError> {
        self.lock()?
            .clear(ClearBuffer::Input)
            .map_err(|e| io::Error::from(e).into())
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        debug!(?timeout, "read timeout changed");
        self.read_timeout = timeout;
        Ok(())
    }

    fn set_write_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        debug!(?timeout, "write timeout changed");
        self.write_timeout = timeout;
        Ok(())
    }
}

fn data_bits(bits: u8) -> Result<DataBits, TransportError> {
    match bits {
        5 => Ok(DataBits::Five),
        6 => Ok(DataBits::Six),
        7 => Ok(DataBits::Seven),
        8 => Ok(DataBits::Eight),
        other => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsupported data bits: {other}"),
        )
        .into()),
    }
}

fn map_io_error(e: io::Error) -> TransportError {
    match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TransportError::Timeout,
        _ => TransportError::Io(e),
    }
}

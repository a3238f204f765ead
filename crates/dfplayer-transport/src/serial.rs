use std::io::{Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, SerialPortType, StopBits};
use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::SerialLink;

/// Line rate every DFPlayer-family module ships with.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default read timeout applied when the port is opened.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Line settings for opening a serial port.
///
/// Framing is fixed at 8 data bits, no parity, 1 stop bit, no flow control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialSettings {
    /// Baud rate. Default: 9600.
    pub baud_rate: u32,
    /// Initial read timeout. Default: 100 ms.
    pub read_timeout: Duration,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// UART transport over a host serial device (`/dev/ttyUSB0`, `COM3`, ...).
pub struct SerialPortLink {
    port: Box<dyn SerialPort>,
    path: String,
}

impl SerialPortLink {
    /// Open `path` with 8N1 framing and no flow control.
    pub fn open(path: impl Into<String>, settings: &SerialSettings) -> Result<Self> {
        let path = path.into();
        let port = serialport::new(path.as_str(), settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(settings.read_timeout)
            .open()
            .map_err(|source| TransportError::Open {
                path: path.clone(),
                source,
            })?;

        debug!(%path, baud = settings.baud_rate, "opened serial port");
        Ok(Self { port, path })
    }

    /// The device path this link was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Transport name for diagnostics.
    pub fn transport_name(&self) -> &'static str {
        "uart"
    }
}

impl Read for SerialPortLink {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.port.read(buf)
    }
}

impl Write for SerialPortLink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.port.flush()
    }
}

impl SerialLink for SerialPortLink {
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.port
            .set_timeout(timeout)
            .map_err(TransportError::Configure)
    }

    fn discard_input(&mut self) -> Result<()> {
        self.port
            .clear(ClearBuffer::Input)
            .map_err(TransportError::Configure)
    }

    fn try_clone_link(&self) -> Result<Self> {
        let port = self.port.try_clone().map_err(TransportError::Configure)?;
        Ok(Self {
            port,
            path: self.path.clone(),
        })
    }
}

impl std::fmt::Debug for SerialPortLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialPortLink")
            .field("path", &self.path)
            .field("type", &self.transport_name())
            .finish()
    }
}

/// A serial device visible to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    /// Device path or name.
    pub name: String,
    /// Bus kind: `usb`, `pci`, `bluetooth` or `unknown`.
    pub kind: &'static str,
    /// USB product string or `vid:pid`, when known.
    pub description: Option<String>,
}

/// Enumerate serial ports on this host.
pub fn available_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports().map_err(TransportError::Enumerate)?;
    Ok(ports
        .into_iter()
        .map(|port| {
            let (kind, description) = match port.port_type {
                SerialPortType::UsbPort(info) => (
                    "usb",
                    Some(
                        info.product
                            .unwrap_or_else(|| format!("{:04x}:{:04x}", info.vid, info.pid)),
                    ),
                ),
                SerialPortType::PciPort => ("pci", None),
                SerialPortType::BluetoothPort => ("bluetooth", None),
                SerialPortType::Unknown => ("unknown", None),
            };
            PortInfo {
                name: port.port_name,
                kind,
                description,
            }
        })
        .collect())
}

//! Serial link abstraction for DFPlayer-family MP3 modules.
//!
//! Provides a unified interface over the byte channel the module is wired to:
//! - [`SerialLink`]: blocking read/write with a settable read timeout
//! - [`Delay`]: blocking waits for boot and device settle time
//!
//! This is the lowest layer of dfplayer. Everything else builds on top of
//! the traits provided here; [`SerialPortLink`] is the implementation over a
//! real UART.

pub mod error;
pub mod serial;
pub mod traits;

pub use error::{Result, TransportError};
pub use serial::{available_ports, PortInfo, SerialPortLink, SerialSettings, DEFAULT_BAUD_RATE};
pub use traits::{Delay, SerialLink, ThreadDelay};

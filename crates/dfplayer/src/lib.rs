//! Serial driver for DFPlayer-family MP3 playback modules.
//!
//! The module is driven over a 9600-baud UART with fixed 10-byte frames
//! (8 bytes on checksum-less clones). This crate bundles the layers:
//!
//! # Crate Structure
//!
//! - [`transport`]: serial link abstraction and the host serial port
//! - [`frame`]: command vocabulary, frame codec, checksum variants
//! - [`player`]: transactions, clamped commands, typed queries and status
//!
//! ```no_run
//! use dfplayer::player::{Player, PlayerConfig};
//! use dfplayer::transport::{SerialPortLink, SerialSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let link = SerialPortLink::open("/dev/ttyUSB0", &SerialSettings::default())?;
//! let mut player = Player::begin(link, PlayerConfig::default())?;
//! player.set_volume(20)?;
//! player.play_track(1)?;
//! println!("volume now {}", player.volume());
//! # Ok(())
//! # }
//! ```

/// Re-export transport types.
pub mod transport {
    pub use dfplayer_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use dfplayer_frame::*;
}

/// Re-export player types.
pub mod player {
    pub use dfplayer_player::*;
}

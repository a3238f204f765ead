//! Playback control for DFPlayer-family MP3 modules.
//!
//! This is the "just works" layer. Open a link, hand it to [`Player`] and
//! call one method per module command. Numeric arguments are clamped to the
//! protocol ranges, queries fold communication failures into a zero reading,
//! and the last reply stays available for status interpretation.

pub mod clamp;
pub mod config;
pub mod error;
pub mod player;
pub mod status;

pub use config::{PlayerConfig, BOOT_DELAY, DEFAULT_TIMEOUT, SOURCE_SELECT_DELAY};
pub use error::{PlayerError, Result};
pub use player::Player;
pub use status::{PlaybackState, StatusCode};

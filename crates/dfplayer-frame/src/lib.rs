//! Command/reply framing for DFPlayer-family MP3 modules.
//!
//! Every exchange on the serial line is one fixed-layout frame:
//! - a start marker, protocol version and body length
//! - a command (or reply marker), an acknowledgement flag and 16 bits of data
//! - a 16-bit checksum whose formula depends on the module variant
//! - an end marker
//!
//! The reader and writer own their buffers; no state is shared between
//! transactions.

pub mod codec;
pub mod command;
pub mod error;
pub mod reader;
pub mod variant;
pub mod writer;

pub use codec::{
    decode_frame, encode_frame, verify_checksum, Frame, FrameConfig, DATA_LEN, END_BYTE,
    FRAME_SIZE, SHORT_FRAME_SIZE, START_BYTE, VERSION,
};
pub use command::{
    command_name, CommandCode, REPLY_ACCEPTED, REPLY_ERROR, REPLY_PLAYBACK_DONE, REPLY_READY,
};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use variant::{ChecksumPolicy, ModuleVariant};
pub use writer::FrameWriter;

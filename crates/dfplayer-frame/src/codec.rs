use std::time::Duration;

use bytes::{Buf, BufMut, BytesMut};

use crate::command::CommandCode;
use crate::error::{FrameError, Result};
use crate::variant::ModuleVariant;

/// Start marker.
pub const START_BYTE: u8 = 0x7E;

/// Protocol version byte.
pub const VERSION: u8 = 0xFF;

/// Number of body bytes (VERSION through DATA_LO).
pub const DATA_LEN: u8 = 0x06;

/// End marker.
pub const END_BYTE: u8 = 0xEF;

/// Frame with checksum: start (1) + body (6) + checksum (2) + end (1).
pub const FRAME_SIZE: usize = 10;

/// Frame without checksum bytes.
pub const SHORT_FRAME_SIZE: usize = 8;

/// Default time to wait for a reply.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// One command or reply.
///
/// `command` is the raw COMMAND byte: an opcode on outgoing frames, an echoed
/// query code or a reply marker on incoming ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub command: u8,
    /// ACK/feedback flag.
    pub ack: bool,
    /// DATA_HI:DATA_LO, big-endian.
    pub data: u16,
}

impl Frame {
    /// Create a new frame.
    pub fn new(command: impl Into<u8>, data: u16, ack: bool) -> Self {
        Self {
            command: command.into(),
            ack,
            data,
        }
    }

    pub fn data_hi(&self) -> u8 {
        self.data.to_be_bytes()[0]
    }

    pub fn data_lo(&self) -> u8 {
        self.data.to_be_bytes()[1]
    }

    /// Returns true if this reply echoes `command`.
    pub fn echoes(&self, command: CommandCode) -> bool {
        self.command == command.code()
    }

    /// Encode this frame for `variant`.
    pub fn encode(&self, variant: ModuleVariant, dst: &mut BytesMut) {
        encode_raw(self.command, self.data, self.ack, variant, dst);
    }
}

/// Encode a command frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌───────┬─────────┬────────┬─────────┬─────┬─────────┬─────────┬──────────┬─────┐
/// │ START │ VERSION │ LENGTH │ COMMAND │ ACK │ DATA_HI │ DATA_LO │ CHECKSUM │ END │
/// │ 0x7E  │ 0xFF    │ 0x06   │         │ 0/1 │         │         │ (2B BE)  │0xEF │
/// └───────┴─────────┴────────┴─────────┴─────┴─────────┴─────────┴──────────┴─────┘
/// ```
/// The checksum bytes are absent for [`ModuleVariant::NoChecksum`].
pub fn encode_frame(
    command: CommandCode,
    data: u16,
    ack: bool,
    variant: ModuleVariant,
    dst: &mut BytesMut,
) {
    encode_raw(command.code(), data, ack, variant, dst);
}

fn encode_raw(command: u8, data: u16, ack: bool, variant: ModuleVariant, dst: &mut BytesMut) {
    dst.reserve(variant.frame_len());
    dst.put_u8(START_BYTE);
    let body_start = dst.len();
    dst.put_u8(VERSION);
    dst.put_u8(DATA_LEN);
    dst.put_u8(command);
    dst.put_u8(u8::from(ack));
    dst.put_u16(data);
    if let Some(checksum) = variant.checksum_policy().compute(&dst[body_start..]) {
        dst.put_u16(checksum);
    }
    dst.put_u8(END_BYTE);
}

/// Decode a frame from the bytes of one receive.
///
/// Checks, in order: length, start marker, version, body length, end
/// marker. The checksum is not examined; see [`verify_checksum`].
pub fn decode_frame(src: &[u8], variant: ModuleVariant) -> Result<Frame> {
    let expected = variant.frame_len();
    if src.len() < expected {
        return Err(FrameError::Incomplete {
            expected,
            received: src.len(),
        });
    }

    let mut buf = &src[..expected];
    let start = buf.get_u8();
    if start != START_BYTE {
        return Err(FrameError::BadStart(start));
    }
    let version = buf.get_u8();
    if version != VERSION {
        return Err(FrameError::BadVersion(version));
    }
    let length = buf.get_u8();
    if length != DATA_LEN {
        return Err(FrameError::BadLength(length));
    }
    let end = src[expected - 1];
    if end != END_BYTE {
        return Err(FrameError::BadEnd(end));
    }

    let command = buf.get_u8();
    let ack = buf.get_u8() != 0;
    let data = buf.get_u16();
    Ok(Frame { command, ack, data })
}

/// Check the checksum bytes of a structurally valid frame.
///
/// Always succeeds for variants without a checksum.
pub fn verify_checksum(src: &[u8], variant: ModuleVariant) -> Result<()> {
    if src.len() < variant.frame_len() {
        return Err(FrameError::Incomplete {
            expected: variant.frame_len(),
            received: src.len(),
        });
    }
    let Some(computed) = variant.checksum_policy().compute(&src[1..7]) else {
        return Ok(());
    };
    let received = u16::from_be_bytes([src[7], src[8]]);
    if computed != received {
        return Err(FrameError::BadChecksum { computed, received });
    }
    Ok(())
}

/// Configuration for the frame codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Module variant; selects frame length and checksum policy.
    pub variant: ModuleVariant,
    /// How long a receive waits for a complete frame. Default: 100 ms.
    pub read_timeout: Duration,
    /// Verify checksums of received frames. Default: off.
    pub strict_checksum: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            variant: ModuleVariant::default(),
            read_timeout: DEFAULT_READ_TIMEOUT,
            strict_checksum: false,
        }
    }
}

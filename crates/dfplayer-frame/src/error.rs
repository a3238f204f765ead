/// Errors that can occur while receiving or sending frames.
///
/// The structural variants are listed in the order the decoder checks them.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Fewer bytes arrived than the frame length before the timeout.
    #[error("incomplete frame ({received} of {expected} bytes)")]
    Incomplete { expected: usize, received: usize },

    /// The first byte is not the start marker.
    #[error("invalid start byte 0x{0:02X} (expected 0x7E)")]
    BadStart(u8),

    /// The version byte is not 0xFF.
    #[error("invalid version byte 0x{0:02X} (expected 0xFF)")]
    BadVersion(u8),

    /// The length byte is not 0x06.
    #[error("invalid length byte 0x{0:02X} (expected 0x06)")]
    BadLength(u8),

    /// The last byte is not the end marker.
    #[error("invalid end byte 0x{0:02X} (expected 0xEF)")]
    BadEnd(u8),

    /// The received checksum does not match the body (strict mode only).
    #[error("checksum mismatch (computed 0x{computed:04X}, received 0x{received:04X})")]
    BadChecksum { computed: u16, received: u16 },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;

use std::io::ErrorKind;
use std::time::{Duration, Instant};

use bytes::BytesMut;
use dfplayer_transport::{SerialLink, TransportError};
use tracing::{debug, trace};

use crate::codec::{decode_frame, verify_checksum, Frame, FrameConfig, FRAME_SIZE};
use crate::command::command_name;
use crate::error::{FrameError, Result};
use crate::variant::ModuleVariant;

/// Reads complete reply frames from a [`SerialLink`].
///
/// Each receive starts from an empty line: pending input is discarded so a
/// reply left over from an earlier transaction cannot be mistaken for the
/// current one.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: SerialLink> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(FRAME_SIZE),
            config,
        }
    }

    /// Read the next frame, waiting at most the configured timeout.
    pub fn read_frame(&mut self) -> Result<Frame> {
        self.read_frame_within(self.config.read_timeout)
    }

    /// Discard pending input, then read the next frame, waiting at most
    /// `timeout`.
    ///
    /// Returns `Err(FrameError::Incomplete)` when the timeout elapses before
    /// a full frame arrived.
    pub fn read_frame_within(&mut self, timeout: Duration) -> Result<Frame> {
        self.discard_input()?;
        self.read_reply_within(timeout)
    }

    /// Drop every byte received but not yet read.
    ///
    /// Call before sending a request so that only its reply is read back.
    pub fn discard_input(&mut self) -> Result<()> {
        self.inner
            .discard_input()
            .map_err(transport_to_frame_error)
    }

    /// Read the reply to a request that was just sent, waiting at most the
    /// configured timeout.
    ///
    /// Pending input is kept: the reply may already be buffered when the
    /// write returns.
    pub fn read_reply(&mut self) -> Result<Frame> {
        self.read_reply_within(self.config.read_timeout)
    }

    /// [`FrameReader::read_reply`] with an explicit timeout.
    pub fn read_reply_within(&mut self, timeout: Duration) -> Result<Frame> {
        let variant = self.config.variant;
        let expected = variant.frame_len();
        self.buf.clear();

        let deadline = Instant::now() + timeout;
        let mut chunk = [0u8; FRAME_SIZE];
        while self.buf.len() < expected {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            self.inner
                .set_read_timeout(deadline - now)
                .map_err(transport_to_frame_error)?;

            let wanted = expected - self.buf.len();
            match self.inner.read(&mut chunk[..wanted]) {
                Ok(0) => break,
                Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    break
                }
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        trace!(bytes = ?self.buf.as_ref(), "raw reply");
        let frame = decode_frame(&self.buf, variant)?;
        if self.config.strict_checksum {
            verify_checksum(&self.buf, variant)?;
        }

        debug!(
            command = command_name(frame.command),
            data = frame.data,
            "received frame"
        );
        Ok(frame)
    }

    /// Borrow the underlying link.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying link.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner link.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Switch the frame layout for subsequent receives.
    pub fn set_variant(&mut self, variant: ModuleVariant) {
        self.config.variant = variant;
    }

    /// Update the receive timeout used by [`FrameReader::read_frame`].
    pub fn set_read_timeout(&mut self, timeout: Duration) {
        self.config.read_timeout = timeout;
    }

    /// Enable or disable checksum verification of received frames.
    pub fn set_strict_checksum(&mut self, strict: bool) {
        self.config.strict_checksum = strict;
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

pub(crate) fn transport_to_frame_error(err: TransportError) -> FrameError {
    match err {
        TransportError::Io(io) => FrameError::Io(io),
        other => FrameError::Io(std::io::Error::other(other.to_string())),
    }
}

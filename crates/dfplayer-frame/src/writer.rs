use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::{debug, trace};

use crate::codec::{Frame, FRAME_SIZE};
use crate::command::{command_name, CommandCode};
use crate::error::{FrameError, Result};
use crate::variant::ModuleVariant;

/// Writes complete command frames to any `Write` stream.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
    variant: ModuleVariant,
}

impl<T: Write> FrameWriter<T> {
    /// Create a new frame writer for the default module variant.
    pub fn new(inner: T) -> Self {
        Self::with_variant(inner, ModuleVariant::default())
    }

    /// Create a new frame writer for `variant`.
    pub fn with_variant(inner: T, variant: ModuleVariant) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(FRAME_SIZE),
            variant,
        }
    }

    /// Encode and send one command (blocking).
    pub fn send(&mut self, command: CommandCode, data: u16, ack: bool) -> Result<()> {
        self.write_frame(&Frame::new(command, data, ack))
    }

    /// Write a complete frame (blocking).
    ///
    /// The frame is written in one go and the stream flushed.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        frame.encode(self.variant, &mut self.buf);
        trace!(bytes = ?self.buf.as_ref(), "raw command");

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::Io(std::io::Error::from(ErrorKind::WriteZero))),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()?;
        debug!(
            command = command_name(frame.command),
            data = frame.data,
            ack = frame.ack,
            "sent frame"
        );
        Ok(())
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Bytes of the most recently written frame.
    pub fn last_sent(&self) -> &[u8] {
        &self.buf
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Switch the frame layout for subsequent writes.
    pub fn set_variant(&mut self, variant: ModuleVariant) {
        self.variant = variant;
    }

    pub fn variant(&self) -> ModuleVariant {
        self.variant
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::codec::decode_frame;

    #[test]
    fn write_single_frame() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(CommandCode::SetVolume, 30, false).unwrap();

        let wire = writer.into_inner().into_inner();
        assert_eq!(wire, [0x7E, 0xFF, 0x06, 0x06, 0x00, 0x00, 0x1E, 0xFE, 0xD7, 0xEF]);
    }

    #[test]
    fn write_multiple_frames() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(CommandCode::Next, 0, false).unwrap();
        writer.send(CommandCode::PlayFolder, 0x0203, true).unwrap();

        let wire = writer.into_inner().into_inner();
        assert_eq!(wire.len(), 2 * FRAME_SIZE);
        let second = decode_frame(&wire[FRAME_SIZE..], ModuleVariant::Mini).unwrap();
        assert!(second.echoes(CommandCode::PlayFolder));
        assert!(second.ack);
        assert_eq!(second.data, 0x0203);
    }

    #[test]
    fn last_sent_tracks_variant() {
        let mut writer = FrameWriter::with_variant(Vec::new(), ModuleVariant::NoChecksum);
        writer.send(CommandCode::Pause, 0, false).unwrap();
        assert_eq!(writer.last_sent().len(), 8);

        writer.set_variant(ModuleVariant::FnX10p);
        writer.send(CommandCode::Pause, 0, false).unwrap();
        assert_eq!(writer.last_sent().len(), 10);
        assert_eq!(writer.variant(), ModuleVariant::FnX10p);
        assert_eq!(writer.get_ref().len(), 18);
    }

    #[test]
    fn partial_writes_are_completed() {
        struct OneByteWriter(Vec<u8>);

        impl Write for OneByteWriter {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.push(buf[0]);
                Ok(1)
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut writer = FrameWriter::new(OneByteWriter(Vec::new()));
        writer.send(CommandCode::Stop, 0, false).unwrap();
        assert_eq!(writer.get_ref().0.as_slice(), writer.last_sent());
    }

    #[test]
    fn closed_stream_reports_write_zero() {
        struct ClosedWriter;

        impl Write for ClosedWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Ok(0)
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut writer = FrameWriter::new(ClosedWriter);
        let err = writer.send(CommandCode::Stop, 0, false).unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::WriteZero));
    }

    #[test]
    fn interrupted_write_retries() {
        struct InterruptedOnce {
            interrupted: bool,
            bytes: Vec<u8>,
        }

        impl Write for InterruptedOnce {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(std::io::Error::from(ErrorKind::Interrupted));
                }
                self.bytes.extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut writer = FrameWriter::new(InterruptedOnce {
            interrupted: false,
            bytes: Vec::new(),
        });
        writer.send(CommandCode::Resume, 0, false).unwrap();
        assert_eq!(writer.get_ref().bytes.len(), FRAME_SIZE);
    }
}

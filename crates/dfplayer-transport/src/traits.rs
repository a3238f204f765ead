use std::io::{Read, Write};
use std::time::Duration;

use crate::error::Result;

/// A duplex byte link to the module.
///
/// A `read` that sees no byte within the configured read timeout fails with
/// `ErrorKind::TimedOut` (or `WouldBlock`); it never blocks indefinitely.
/// The driver assumes exclusive ownership of the link.
pub trait SerialLink: Read + Write {
    /// Set the maximum time a single `read` call may block.
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<()>;

    /// Drop every byte received but not yet read.
    fn discard_input(&mut self) -> Result<()>;

    /// Open a second handle onto the same link.
    ///
    /// Both handles share the underlying device; writes on one and reads on
    /// the other observe the same byte stream.
    fn try_clone_link(&self) -> Result<Self>
    where
        Self: Sized;
}

/// Blocking delay used for boot waits and device settle time.
pub trait Delay {
    /// Block the calling thread for `duration`.
    fn delay(&mut self, duration: Duration);
}

/// [`Delay`] backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn thread_delay_blocks_for_duration() {
        let start = Instant::now();
        ThreadDelay.delay(Duration::from_millis(15));
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn thread_delay_zero_returns_immediately() {
        let start = Instant::now();
        ThreadDelay.delay(Duration::ZERO);
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn delay_through_mutable_reference() {
        struct Recorder(Vec<Duration>);
        impl Delay for Recorder {
            fn delay(&mut self, duration: Duration) {
                self.0.push(duration);
            }
        }

        fn settle<D: Delay>(mut delay: D) {
            delay.delay(Duration::from_millis(200));
        }

        let mut recorder = Recorder(Vec::new());
        settle(&mut recorder);
        assert_eq!(recorder.0, vec![Duration::from_millis(200)]);
    }
}

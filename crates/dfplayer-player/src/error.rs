/// Errors that can occur in player operations.
///
/// Only host-side failures surface here; a module that stays silent or
/// answers with garbage is reported through sentinel readings instead.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] dfplayer_transport::TransportError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] dfplayer_frame::FrameError),
}

pub type Result<T> = std::result::Result<T, PlayerError>;

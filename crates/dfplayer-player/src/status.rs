use dfplayer_frame::{
    Frame, ModuleVariant, REPLY_ACCEPTED, REPLY_ERROR, REPLY_PLAYBACK_DONE, REPLY_READY,
};

/// Meaning of the most recent reply.
///
/// Error variants are the module's own codes (DATA_LO of an error reply); the
/// `Accepted`, `Done` and `Ready` codes are synthesized from reply markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// No reply, or a reply that is neither an error nor a status push.
    Unknown,
    /// Module busy (initialization not finished).
    Busy,
    /// Module asleep; only source commands are accepted.
    Asleep,
    /// Request not fully received.
    MalformedRequest,
    /// Request checksum mismatch.
    ChecksumMismatch,
    /// Track or folder out of range.
    OutOfRange,
    /// Track or folder not found.
    NotFound,
    /// Advert requested while nothing is playing.
    AdvertBusy,
    /// Storage read failed (card removed or damaged).
    StorageMissing,
    /// Error code 0x09, undocumented.
    DeviceUnknown,
    /// Module entered sleep.
    EnteredSleep,
    /// Command accepted.
    Accepted,
    /// Track playback finished.
    Done,
    /// Module ready after boot or reset.
    Ready,
    /// An error code outside the documented set, passed through verbatim.
    Other(u8),
}

impl StatusCode {
    /// Map an error code carried in DATA_LO of an error reply.
    pub fn from_error_code(code: u8) -> Self {
        match code {
            0x01 => Self::Busy,
            0x02 => Self::Asleep,
            0x03 => Self::MalformedRequest,
            0x04 => Self::ChecksumMismatch,
            0x05 => Self::OutOfRange,
            0x06 => Self::NotFound,
            0x07 => Self::AdvertBusy,
            0x08 => Self::StorageMissing,
            0x09 => Self::DeviceUnknown,
            0x0A => Self::EnteredSleep,
            other => Self::Other(other),
        }
    }

    /// Interpret a received frame. Performs no I/O.
    pub fn from_frame(frame: Option<&Frame>) -> Self {
        let Some(frame) = frame else {
            return Self::Unknown;
        };
        match frame.command {
            REPLY_ERROR => Self::from_error_code(frame.data_lo()),
            REPLY_ACCEPTED => Self::Accepted,
            REPLY_PLAYBACK_DONE => Self::Done,
            REPLY_READY => Self::Ready,
            _ => Self::Unknown,
        }
    }

    /// Numeric status: module error codes 0x01-0x0A, then 0x0B accepted,
    /// 0x0C done, 0x0D ready, 0x00 unknown.
    pub const fn code(self) -> u8 {
        match self {
            Self::Unknown => 0x00,
            Self::Busy => 0x01,
            Self::Asleep => 0x02,
            Self::MalformedRequest => 0x03,
            Self::ChecksumMismatch => 0x04,
            Self::OutOfRange => 0x05,
            Self::NotFound => 0x06,
            Self::AdvertBusy => 0x07,
            Self::StorageMissing => 0x08,
            Self::DeviceUnknown => 0x09,
            Self::EnteredSleep => 0x0A,
            Self::Accepted => 0x0B,
            Self::Done => 0x0C,
            Self::Ready => 0x0D,
            Self::Other(code) => code,
        }
    }

    pub const fn is_error(self) -> bool {
        !matches!(self, Self::Unknown | Self::Accepted | Self::Done | Self::Ready)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Busy => "busy",
            Self::Asleep => "asleep",
            Self::MalformedRequest => "malformed-request",
            Self::ChecksumMismatch => "checksum-mismatch",
            Self::OutOfRange => "out-of-range",
            Self::NotFound => "not-found",
            Self::AdvertBusy => "advert-busy",
            Self::StorageMissing => "storage-missing",
            Self::DeviceUnknown => "device-unknown",
            Self::EnteredSleep => "entered-sleep",
            Self::Accepted => "accepted",
            Self::Done => "done",
            Self::Ready => "ready",
            Self::Other(_) => "other",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.code())
    }
}

/// Transport state reported by the status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
    AsleepOrStandby,
    /// No valid reply (the query returned the zero sentinel).
    CommunicationError,
    Unknown,
}

impl PlaybackState {
    /// Decode the status query value: high byte is the source indicator,
    /// low byte the sub-state.
    pub fn from_status(status: u16, variant: ModuleVariant) -> Self {
        match status {
            0x0000 => Self::CommunicationError,
            0x0200 => Self::Stopped,
            0x0201 => Self::Playing,
            0x0202 => Self::Paused,
            0x0001 => Self::AsleepOrStandby,
            0x0101 if variant == ModuleVariant::Hw247a => Self::Playing,
            _ => Self::Unknown,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::AsleepOrStandby => "asleep-or-standby",
            Self::CommunicationError => "communication-error",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(command: u8, data: u16) -> Frame {
        Frame::new(command, data, false)
    }

    #[test]
    fn error_reply_carries_module_code() {
        let asleep = frame(REPLY_ERROR, 0x0002);
        assert_eq!(StatusCode::from_frame(Some(&asleep)), StatusCode::Asleep);

        let not_found = frame(REPLY_ERROR, 0xFF06);
        assert_eq!(StatusCode::from_frame(Some(&not_found)), StatusCode::NotFound);
    }

    #[test]
    fn every_documented_error_code_maps() {
        for code in 0x01..=0x0A {
            let status = StatusCode::from_error_code(code);
            assert!(!matches!(status, StatusCode::Other(_)), "code {code}");
            assert_eq!(status.code(), code);
            assert!(status.is_error());
        }
    }

    #[test]
    fn undocumented_error_code_passes_through() {
        let status = StatusCode::from_frame(Some(&frame(REPLY_ERROR, 0x0033)));
        assert_eq!(status, StatusCode::Other(0x33));
        assert_eq!(status.code(), 0x33);
    }

    #[test]
    fn status_pushes_ignore_data() {
        for data in [0x0000, 0x0002, 0xFFFF] {
            assert_eq!(
                StatusCode::from_frame(Some(&frame(REPLY_PLAYBACK_DONE, data))),
                StatusCode::Done
            );
        }
        assert_eq!(
            StatusCode::from_frame(Some(&frame(REPLY_READY, 0x0002))),
            StatusCode::Ready
        );
        assert_eq!(
            StatusCode::from_frame(Some(&frame(REPLY_ACCEPTED, 0))),
            StatusCode::Accepted
        );
    }

    #[test]
    fn other_replies_are_unknown() {
        assert_eq!(StatusCode::from_frame(Some(&frame(0x43, 20))), StatusCode::Unknown);
        assert_eq!(StatusCode::from_frame(None), StatusCode::Unknown);
        assert!(!StatusCode::Unknown.is_error());
    }

    #[test]
    fn synthetic_codes_follow_error_range() {
        assert_eq!(StatusCode::Accepted.code(), 0x0B);
        assert_eq!(StatusCode::Done.code(), 0x0C);
        assert_eq!(StatusCode::Ready.code(), 0x0D);
        assert_eq!(StatusCode::Asleep.to_string(), "asleep (0x02)");
    }

    #[test]
    fn playback_state_table() {
        let mini = ModuleVariant::Mini;
        assert_eq!(PlaybackState::from_status(0x0200, mini), PlaybackState::Stopped);
        assert_eq!(PlaybackState::from_status(0x0201, mini), PlaybackState::Playing);
        assert_eq!(PlaybackState::from_status(0x0202, mini), PlaybackState::Paused);
        assert_eq!(
            PlaybackState::from_status(0x0001, mini),
            PlaybackState::AsleepOrStandby
        );
        assert_eq!(
            PlaybackState::from_status(0x0000, mini),
            PlaybackState::CommunicationError
        );
        assert_eq!(PlaybackState::from_status(0x0305, mini), PlaybackState::Unknown);
    }

    #[test]
    fn hw247a_reports_playing_for_0101() {
        for variant in [ModuleVariant::Mini, ModuleVariant::FnX10p, ModuleVariant::NoChecksum] {
            assert_eq!(
                PlaybackState::from_status(0x0101, variant),
                PlaybackState::Unknown
            );
        }
        assert_eq!(
            PlaybackState::from_status(0x0101, ModuleVariant::Hw247a),
            PlaybackState::Playing
        );
    }
}

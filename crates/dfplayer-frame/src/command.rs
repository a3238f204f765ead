//! Command codes and reply markers.
//!
//! Codes 0x01-0x25 drive playback, 0x42-0x4F are queries answered with a
//! data frame. Replies reuse the COMMAND position: a query reply echoes the
//! query code, while 0x3D-0x41 mark status pushes and acknowledgements.

/// Track playback finished (pushed by the module, unsolicited).
pub const REPLY_PLAYBACK_DONE: u8 = 0x3D;

/// Module ready after boot or reset (pushed by the module, unsolicited).
pub const REPLY_READY: u8 = 0x3F;

/// Request failed; DATA_LO carries the error code.
pub const REPLY_ERROR: u8 = 0x40;

/// Command accepted (sent when the request had its ACK flag set).
pub const REPLY_ACCEPTED: u8 = 0x41;

/// Opcode placed in the COMMAND byte of an outgoing frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandCode {
    Next = 0x01,
    Previous = 0x02,
    /// Track 1..9999 in upload order.
    PlayTrack = 0x03,
    VolumeUp = 0x04,
    VolumeDown = 0x05,
    /// Volume 0..30.
    SetVolume = 0x06,
    /// 0=off, 1=pop, 2=rock, 3=jazz, 4=classic, 5=bass.
    SetEq = 0x07,
    /// Loop track 1..9999.
    LoopTrack = 0x08,
    /// 1=USB, 2=SD, 3=aux, 4=unused, 5=NOR flash, 6=sleep.
    SetSource = 0x09,
    Standby = 0x0A,
    /// Leave standby. Ignored by most firmware.
    Normal = 0x0B,
    Reset = 0x0C,
    Resume = 0x0D,
    Pause = 0x0E,
    /// DATA_HI = folder 1..99, DATA_LO = track 1..255.
    PlayFolder = 0x0F,
    /// DATA_HI = gain enable, DATA_LO = gain 0..31.
    SetDacGain = 0x10,
    RepeatAll = 0x11,
    PlayMp3Folder = 0x12,
    PlayAdvertFolder = 0x13,
    /// Upper nibble = folder 1..15, lower 12 bits = track 1..3000.
    Play3000Folder = 0x14,
    StopAdvert = 0x15,
    Stop = 0x16,
    RepeatFolder = 0x17,
    RandomAll = 0x18,
    LoopCurrentTrack = 0x19,
    /// 0=enable, 1=disable.
    SetDac = 0x1A,
    /// DATA_HI = advert folder 1..9, DATA_LO = track 1..255.
    PlayAdvertFolderN = 0x25,

    GetStatus = 0x42,
    GetVolume = 0x43,
    GetEq = 0x44,
    GetPlayMode = 0x45,
    GetVersion = 0x46,
    GetUsbTrackCount = 0x47,
    GetSdTrackCount = 0x48,
    GetFlashTrackCount = 0x49,
    GetUsbTrack = 0x4B,
    GetSdTrack = 0x4C,
    GetFlashTrack = 0x4D,
    GetFolderTrackCount = 0x4E,
    GetFolderCount = 0x4F,
}

impl CommandCode {
    /// Every defined opcode, in code order.
    pub const ALL: [CommandCode; 40] = [
        Self::Next,
        Self::Previous,
        Self::PlayTrack,
        Self::VolumeUp,
        Self::VolumeDown,
        Self::SetVolume,
        Self::SetEq,
        Self::LoopTrack,
        Self::SetSource,
        Self::Standby,
        Self::Normal,
        Self::Reset,
        Self::Resume,
        Self::Pause,
        Self::PlayFolder,
        Self::SetDacGain,
        Self::RepeatAll,
        Self::PlayMp3Folder,
        Self::PlayAdvertFolder,
        Self::Play3000Folder,
        Self::StopAdvert,
        Self::Stop,
        Self::RepeatFolder,
        Self::RandomAll,
        Self::LoopCurrentTrack,
        Self::SetDac,
        Self::PlayAdvertFolderN,
        Self::GetStatus,
        Self::GetVolume,
        Self::GetEq,
        Self::GetPlayMode,
        Self::GetVersion,
        Self::GetUsbTrackCount,
        Self::GetSdTrackCount,
        Self::GetFlashTrackCount,
        Self::GetUsbTrack,
        Self::GetSdTrack,
        Self::GetFlashTrack,
        Self::GetFolderTrackCount,
        Self::GetFolderCount,
    ];

    /// The wire value of this opcode.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up the opcode for a wire value.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|cmd| cmd.code() == code)
    }

    /// Returns true if the module answers this opcode with a data frame.
    pub const fn is_query(self) -> bool {
        self.code() >= Self::GetStatus.code()
    }

    /// Human-readable name for logs and CLI output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::PlayTrack => "play-track",
            Self::VolumeUp => "volume-up",
            Self::VolumeDown => "volume-down",
            Self::SetVolume => "set-volume",
            Self::SetEq => "set-eq",
            Self::LoopTrack => "loop-track",
            Self::SetSource => "set-source",
            Self::Standby => "standby",
            Self::Normal => "normal",
            Self::Reset => "reset",
            Self::Resume => "resume",
            Self::Pause => "pause",
            Self::PlayFolder => "play-folder",
            Self::SetDacGain => "set-dac-gain",
            Self::RepeatAll => "repeat-all",
            Self::PlayMp3Folder => "play-mp3-folder",
            Self::PlayAdvertFolder => "play-advert-folder",
            Self::Play3000Folder => "play-3000-folder",
            Self::StopAdvert => "stop-advert",
            Self::Stop => "stop",
            Self::RepeatFolder => "repeat-folder",
            Self::RandomAll => "random-all",
            Self::LoopCurrentTrack => "loop-current-track",
            Self::SetDac => "set-dac",
            Self::PlayAdvertFolderN => "play-advert-folder-n",
            Self::GetStatus => "get-status",
            Self::GetVolume => "get-volume",
            Self::GetEq => "get-eq",
            Self::GetPlayMode => "get-play-mode",
            Self::GetVersion => "get-version",
            Self::GetUsbTrackCount => "get-usb-track-count",
            Self::GetSdTrackCount => "get-sd-track-count",
            Self::GetFlashTrackCount => "get-flash-track-count",
            Self::GetUsbTrack => "get-usb-track",
            Self::GetSdTrack => "get-sd-track",
            Self::GetFlashTrack => "get-flash-track",
            Self::GetFolderTrackCount => "get-folder-track-count",
            Self::GetFolderCount => "get-folder-count",
        }
    }
}

impl From<CommandCode> for u8 {
    fn from(cmd: CommandCode) -> Self {
        cmd.code()
    }
}

impl std::fmt::Display for CommandCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.code())
    }
}

/// Returns a human-readable name for the COMMAND byte of any frame.
pub fn command_name(code: u8) -> &'static str {
    match code {
        REPLY_PLAYBACK_DONE => "playback-done",
        REPLY_READY => "ready",
        REPLY_ERROR => "error",
        REPLY_ACCEPTED => "accepted",
        _ => CommandCode::from_code(code).map_or("unknown", CommandCode::name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique_and_ordered() {
        for pair in CommandCode::ALL.windows(2) {
            assert!(pair[0].code() < pair[1].code(), "{} vs {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn from_code_inverts_code() {
        for cmd in CommandCode::ALL {
            assert_eq!(CommandCode::from_code(cmd.code()), Some(cmd));
        }
        assert_eq!(CommandCode::from_code(0x14), Some(CommandCode::Play3000Folder));
        assert_eq!(CommandCode::from_code(0x4A), None);
        assert_eq!(CommandCode::from_code(0x00), None);
    }

    #[test]
    fn queries_start_at_get_status() {
        assert!(!CommandCode::PlayAdvertFolderN.is_query());
        assert!(CommandCode::GetStatus.is_query());
        assert!(CommandCode::GetFolderCount.is_query());
        assert_eq!(CommandCode::ALL.iter().filter(|c| c.is_query()).count(), 13);
    }

    #[test]
    fn names_cover_reply_markers() {
        assert_eq!(command_name(REPLY_ERROR), "error");
        assert_eq!(command_name(REPLY_ACCEPTED), "accepted");
        assert_eq!(command_name(REPLY_PLAYBACK_DONE), "playback-done");
        assert_eq!(command_name(REPLY_READY), "ready");
        assert_eq!(command_name(0x43), "get-volume");
        assert_eq!(command_name(0xAA), "unknown");
    }

    #[test]
    fn display_includes_hex_code() {
        assert_eq!(CommandCode::SetVolume.to_string(), "set-volume (0x06)");
    }
}

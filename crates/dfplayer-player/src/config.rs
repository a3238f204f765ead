use std::time::Duration;

use dfplayer_frame::{FrameConfig, ModuleVariant};

/// Default time to wait for a reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);

/// Time the module needs after power-up or reset, worst case for a large SD card.
pub const BOOT_DELAY: Duration = Duration::from_millis(3000);

/// Time the module needs to switch playback source.
pub const SOURCE_SELECT_DELAY: Duration = Duration::from_millis(200);

/// Controls how a [`crate::Player`] talks to the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    /// How long to wait for a reply. Also the settle time of slow chips.
    pub timeout: Duration,
    /// Module variant.
    pub variant: ModuleVariant,
    /// Ask the module to acknowledge every command, and wait for it.
    pub acknowledge: bool,
    /// Wait [`BOOT_DELAY`] before the first command.
    pub boot_wait: bool,
    /// Verify checksums of replies.
    pub strict_checksum: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            variant: ModuleVariant::default(),
            acknowledge: false,
            boot_wait: true,
            strict_checksum: false,
        }
    }
}

impl PlayerConfig {
    pub(crate) fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            variant: self.variant,
            read_timeout: self.timeout,
            strict_checksum: self.strict_checksum,
        }
    }
}

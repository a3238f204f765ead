use std::time::Duration;

use dfplayer_frame::{CommandCode, Frame, FrameReader, FrameWriter, ModuleVariant};
use dfplayer_transport::{Delay, SerialLink, ThreadDelay};
use tracing::{debug, warn};

use crate::clamp;
use crate::config::{PlayerConfig, BOOT_DELAY, SOURCE_SELECT_DELAY};
use crate::error::Result;
use crate::status::{PlaybackState, StatusCode};

/// A connected MP3 module.
///
/// Owns the link exclusively: one transaction (send, then optionally wait
/// for the reply) completes before the next starts. Callers sharing a player
/// across threads must serialize access themselves.
pub struct Player<L, D = ThreadDelay> {
    reader: FrameReader<L>,
    writer: FrameWriter<L>,
    delay: D,
    config: PlayerConfig,
    last_frame: Option<Frame>,
}

impl<L: SerialLink> Player<L> {
    /// Take ownership of `link` and configure the driver.
    ///
    /// Blocks for [`BOOT_DELAY`] when `config.boot_wait` is set.
    pub fn begin(link: L, config: PlayerConfig) -> Result<Self> {
        Self::with_delay(link, config, ThreadDelay)
    }
}

impl<L: SerialLink, D: Delay> Player<L, D> {
    /// Like [`Player::begin`] with an explicit delay primitive.
    pub fn with_delay(link: L, config: PlayerConfig, mut delay: D) -> Result<Self> {
        let reader_link = link.try_clone_link()?;
        let reader = FrameReader::with_config(reader_link, config.frame_config());
        let writer = FrameWriter::with_variant(link, config.variant);

        if config.boot_wait {
            debug!(delay = ?BOOT_DELAY, "waiting for module boot");
            delay.delay(BOOT_DELAY);
        }

        Ok(Self {
            reader,
            writer,
            delay,
            config,
            last_frame: None,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Switch module variant (checksum policy, frame length, status table).
    pub fn set_variant(&mut self, variant: ModuleVariant) {
        self.config.variant = variant;
        self.reader.set_variant(variant);
        self.writer.set_variant(variant);
    }

    /// Change how long to wait for replies.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = timeout;
        self.reader.set_read_timeout(timeout);
    }

    /// Enable or disable acknowledgement of commands.
    pub fn set_acknowledge(&mut self, enable: bool) {
        self.config.acknowledge = enable;
    }

    /// Enable or disable checksum verification of replies.
    pub fn set_strict_checksum(&mut self, strict: bool) {
        self.config.strict_checksum = strict;
        self.reader.set_strict_checksum(strict);
    }

    /// The most recently received frame, if the last receive succeeded.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Borrow the link commands are written to.
    pub fn link(&self) -> &L {
        self.writer.get_ref()
    }

    /// Send one command.
    ///
    /// With acknowledgement enabled, pending input is discarded before the
    /// write, then waits up to the timeout for the reply and keeps it for
    /// [`Player::interpret_last_frame`]; a missing or malformed reply clears it. Without acknowledgement, slow chips are given the
    /// timeout to settle instead.
    pub fn command(&mut self, command: CommandCode, data: u16) -> Result<()> {
        let ack = self.config.acknowledge;
        if ack {
            self.reader.discard_input()?;
        }
        self.writer.send(command, data, ack)?;

        if ack {
            self.last_frame = match self.reader.read_reply() {
                Ok(frame) => Some(frame),
                Err(err) => {
                    warn!(command = command.name(), error = %err, "no valid acknowledgement");
                    None
                }
            };
        } else if self.config.variant.settles_after_write() {
            debug!(delay = ?self.config.timeout, "waiting for slow module");
            self.delay.delay(self.config.timeout);
        }
        Ok(())
    }

    /// Send a query and return the 16-bit reply value.
    ///
    /// Returns 0 on any failure: write error, timeout, malformed reply, or a
    /// reply that does not echo `command` (an error reply, for instance; see
    /// [`Player::interpret_last_frame`]).
    ///
    /// Queries are always sent with the ACK flag clear, whatever
    /// [`Player::set_acknowledge`] says: the reply carrying the value is the
    /// acknowledgement, and an extra accepted frame would be read in its place.
    pub fn query(&mut self, command: CommandCode) -> u16 {
        self.query_with(command, 0)
    }

    /// [`Player::query`] with a data argument.
    pub fn query_with(&mut self, command: CommandCode, data: u16) -> u16 {
        let sent = self
            .reader
            .discard_input()
            .and_then(|()| self.writer.send(command, data, false));
        if let Err(err) = sent {
            warn!(command = command.name(), error = %err, "query not sent");
            self.last_frame = None;
            return 0;
        }

        match self.reader.read_reply() {
            Ok(frame) => {
                self.last_frame = Some(frame);
                if frame.echoes(command) {
                    frame.data
                } else {
                    debug!(
                        command = command.name(),
                        reply = frame.command,
                        "reply does not answer query"
                    );
                    0
                }
            }
            Err(err) => {
                warn!(command = command.name(), error = %err, "no valid reply");
                self.last_frame = None;
                0
            }
        }
    }

    /// Wait up to `timeout` for a frame the module sends on its own, such as
    /// the playback-finished push.
    ///
    /// Pending input is discarded first. A received frame replaces the
    /// retained one.
    pub fn receive_frame(&mut self, timeout: Duration) -> dfplayer_frame::Result<Frame> {
        let frame = self.reader.read_frame_within(timeout)?;
        self.last_frame = Some(frame);
        Ok(frame)
    }

    /// Interpret the retained reply. Performs no I/O.
    pub fn interpret_last_frame(&self) -> StatusCode {
        StatusCode::from_frame(self.last_frame.as_ref())
    }

    /// Query and decode the transport state.
    pub fn query_playback_state(&mut self) -> PlaybackState {
        let status = self.query(CommandCode::GetStatus);
        PlaybackState::from_status(status, self.config.variant)
    }

    /// Select the playback source: 1=USB, 2=SD, 3=aux, 4=unused, 5=NOR flash,
    /// 6=sleep. Interrupts playback.
    pub fn set_source(&mut self, source: u8) -> Result<()> {
        let source = clamp::source(source);
        self.command(CommandCode::SetSource, u16::from(source))?;
        if source != clamp::SOURCE_SLEEP {
            self.delay.delay(SOURCE_SELECT_DELAY);
        }
        Ok(())
    }

    /// Play a track from the root by upload order, 1..9999.
    pub fn play_track(&mut self, track: u16) -> Result<()> {
        let track = clamp::track(track, clamp::TRACK_MAX);
        self.command(CommandCode::PlayTrack, track)
    }

    pub fn next(&mut self) -> Result<()> {
        self.command(CommandCode::Next, 0)
    }

    pub fn previous(&mut self) -> Result<()> {
        self.command(CommandCode::Previous, 0)
    }

    pub fn pause(&mut self) -> Result<()> {
        self.command(CommandCode::Pause, 0)
    }

    /// Resume after pause or stop.
    pub fn resume(&mut self) -> Result<()> {
        self.command(CommandCode::Resume, 0)
    }

    pub fn stop(&mut self) -> Result<()> {
        self.command(CommandCode::Stop, 0)
    }

    /// Play `track` (1..255) from numbered folder `folder` (1..99).
    pub fn play_folder(&mut self, folder: u8, track: u16) -> Result<()> {
        let folder = clamp::folder(folder, clamp::FOLDER_MAX);
        let track = clamp::track(track, clamp::FOLDER_TRACK_MAX);
        self.command(CommandCode::PlayFolder, u16::from(folder) << 8 | track)
    }

    /// Play `track` (1..3000) from folder `folder` (1..15) of the 3000-track scheme.
    pub fn play_large_folder(&mut self, folder: u8, track: u16) -> Result<()> {
        let folder = clamp::folder(folder, clamp::LARGE_FOLDER_MAX);
        let track = clamp::track(track, clamp::LARGE_FOLDER_TRACK_MAX);
        self.command(CommandCode::Play3000Folder, u16::from(folder) << 12 | track)
    }

    /// Play a track (1..9999) from the `mp3` folder.
    pub fn play_mp3_folder(&mut self, track: u16) -> Result<()> {
        let track = clamp::track(track, clamp::TRACK_MAX);
        self.command(CommandCode::PlayMp3Folder, track)
    }

    /// Interrupt playback with a track (1..9999) from the `advert` folder,
    /// then resume.
    pub fn play_advert_folder(&mut self, track: u16) -> Result<()> {
        let track = clamp::track(track, clamp::TRACK_MAX);
        self.command(CommandCode::PlayAdvertFolder, track)
    }

    /// Interrupt playback with `track` (1..255) from `advertN` (1..9).
    pub fn play_advert_folder_n(&mut self, folder: u8, track: u16) -> Result<()> {
        let folder = clamp::folder(folder, clamp::ADVERT_FOLDER_MAX);
        let track = clamp::track(track, clamp::FOLDER_TRACK_MAX);
        self.command(CommandCode::PlayAdvertFolderN, u16::from(folder) << 8 | track)
    }

    pub fn stop_advert_folder(&mut self) -> Result<()> {
        self.command(CommandCode::StopAdvert, 0)
    }

    /// Set volume, 0..30.
    pub fn set_volume(&mut self, volume: u8) -> Result<()> {
        self.command(CommandCode::SetVolume, u16::from(clamp::volume(volume)))
    }

    pub fn volume_up(&mut self) -> Result<()> {
        self.command(CommandCode::VolumeUp, 0)
    }

    pub fn volume_down(&mut self) -> Result<()> {
        self.command(CommandCode::VolumeDown, 0)
    }

    pub fn enable_dac(&mut self, enable: bool) -> Result<()> {
        self.command(CommandCode::SetDac, u16::from(!enable))
    }

    /// Set DAC output gain, 0..31.
    pub fn set_dac_gain(&mut self, gain: u8, enable: bool) -> Result<()> {
        let gain = clamp::dac_gain(gain);
        self.command(CommandCode::SetDacGain, u16::from(enable) << 8 | u16::from(gain))
    }

    /// Set the equalizer: 0=off, 1=pop, 2=rock, 3=jazz, 4=classic, 5=bass.
    pub fn set_eq(&mut self, preset: u8) -> Result<()> {
        self.command(CommandCode::SetEq, u16::from(clamp::eq(preset)))
    }

    /// Loop a root track (1..9999).
    pub fn repeat_track(&mut self, track: u16) -> Result<()> {
        let track = clamp::track(track, clamp::TRACK_MAX);
        self.command(CommandCode::LoopTrack, track)
    }

    /// Loop the track currently playing. Any playback command ends the loop.
    pub fn repeat_current_track(&mut self, enable: bool) -> Result<()> {
        self.command(CommandCode::LoopCurrentTrack, u16::from(!enable))
    }

    pub fn repeat_all(&mut self, enable: bool) -> Result<()> {
        self.command(CommandCode::RepeatAll, u16::from(enable))
    }

    /// Loop every track of a numbered folder (1..99).
    pub fn repeat_folder(&mut self, folder: u8) -> Result<()> {
        let folder = clamp::folder(folder, clamp::FOLDER_MAX);
        self.command(CommandCode::RepeatFolder, u16::from(folder))
    }

    pub fn random_all(&mut self) -> Result<()> {
        self.command(CommandCode::RandomAll, 0)
    }

    /// Put the module to sleep (source 6). Leave with [`Player::wakeup`].
    pub fn sleep(&mut self) -> Result<()> {
        self.set_source(clamp::SOURCE_SLEEP)
    }

    /// Leave sleep by selecting `source`. Selecting the sleep source is ignored.
    pub fn wakeup(&mut self, source: u8) -> Result<()> {
        if source == clamp::SOURCE_SLEEP {
            return Ok(());
        }
        self.set_source(source)
    }

    /// Enter standby, or leave it by waking up on `source`.
    pub fn enable_standby(&mut self, enable: bool, source: u8) -> Result<()> {
        if enable {
            self.command(CommandCode::Standby, 0)
        } else {
            self.wakeup(source)
        }
    }

    /// Send the leave-standby command. Most firmware ignores it; prefer
    /// [`Player::wakeup`].
    pub fn normal_mode(&mut self) -> Result<()> {
        self.command(CommandCode::Normal, 0)
    }

    /// Restore factory settings and wait for the module to boot again.
    pub fn reset(&mut self) -> Result<()> {
        self.command(CommandCode::Reset, 0)?;
        debug!(delay = ?BOOT_DELAY, "waiting for module reboot");
        self.delay.delay(BOOT_DELAY);
        Ok(())
    }

    /// Current volume, 0..30. 0 on communication error.
    pub fn volume(&mut self) -> u8 {
        low_byte(self.query(CommandCode::GetVolume))
    }

    /// Current EQ preset. 0 on communication error.
    pub fn eq(&mut self) -> u8 {
        low_byte(self.query(CommandCode::GetEq))
    }

    /// Current loop mode: 0=all, 1=folder, 2=track, 3=random, 4=off.
    pub fn play_mode(&mut self) -> u8 {
        low_byte(self.query(CommandCode::GetPlayMode))
    }

    /// Firmware version. 0 on communication error.
    pub fn version(&mut self) -> u8 {
        low_byte(self.query(CommandCode::GetVersion))
    }

    pub fn total_tracks_usb(&mut self) -> u16 {
        self.query(CommandCode::GetUsbTrackCount)
    }

    pub fn total_tracks_sd(&mut self) -> u16 {
        self.query(CommandCode::GetSdTrackCount)
    }

    pub fn total_tracks_flash(&mut self) -> u16 {
        self.query(CommandCode::GetFlashTrackCount)
    }

    /// Track currently playing from USB.
    pub fn track_usb(&mut self) -> u16 {
        self.query(CommandCode::GetUsbTrack)
    }

    /// Track currently playing from SD.
    pub fn track_sd(&mut self) -> u16 {
        self.query(CommandCode::GetSdTrack)
    }

    /// Track currently playing from NOR flash.
    pub fn track_flash(&mut self) -> u16 {
        self.query(CommandCode::GetFlashTrack)
    }

    /// Number of tracks in a numbered folder (1..99). Stops playback.
    pub fn folder_track_count(&mut self, folder: u8) -> u8 {
        let folder = clamp::folder(folder, clamp::FOLDER_MAX);
        low_byte(self.query_with(CommandCode::GetFolderTrackCount, u16::from(folder)))
    }

    /// Number of folders on the current source. Unreliable on most firmware.
    pub fn folder_count(&mut self) -> u8 {
        low_byte(self.query(CommandCode::GetFolderCount))
    }
}

fn low_byte(value: u16) -> u8 {
    value.to_be_bytes()[1]
}

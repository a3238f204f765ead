use clap::{Args, Subcommand, ValueEnum};
use dfplayer_frame::{CommandCode, ModuleVariant};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod control;
pub mod device;
pub mod ports;
pub mod query;
pub mod state;
pub mod version;

use control::Action;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List serial ports on this host.
    Ports,
    /// Play a root track by upload order (1-9999).
    Play(TrackArgs),
    /// Play a track (1-255) from a numbered folder (1-99).
    Folder(FolderArgs),
    /// Play a track from the mp3 folder.
    Mp3(TrackArgs),
    /// Interrupt playback with a track from the advert folder.
    Advert(TrackArgs),
    /// Play the next track.
    Next,
    /// Play the previous track.
    Previous,
    /// Pause playback.
    Pause,
    /// Resume playback.
    Resume,
    /// Stop playback.
    Stop,
    /// Set the volume (0-30).
    Volume(LevelArgs),
    /// Set the equalizer preset (0=off 1=pop 2=rock 3=jazz 4=classic 5=bass).
    Eq(LevelArgs),
    /// Select the playback source (1=USB 2=SD 3=aux 5=flash 6=sleep).
    Source(SourceArgs),
    /// Put the module to sleep.
    Sleep,
    /// Wake the module up on a playback source.
    Wakeup(SourceArgs),
    /// Restore factory settings and wait for the module to reboot.
    Reset,
    /// Read one value from the module.
    Query(QueryArgs),
    /// Print the decoded playback state.
    State,
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, device: &DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let action = match command {
        Command::Ports => return ports::run(format),
        Command::Query(args) => return query::run(args, device, format),
        Command::State => return state::run(device, format),
        Command::Version(args) => return version::run(args),
        Command::Play(args) => Action::Play(args.track),
        Command::Folder(args) => Action::Folder(args.folder, args.track),
        Command::Mp3(args) => Action::Mp3(args.track),
        Command::Advert(args) => Action::Advert(args.track),
        Command::Next => Action::Next,
        Command::Previous => Action::Previous,
        Command::Pause => Action::Pause,
        Command::Resume => Action::Resume,
        Command::Stop => Action::Stop,
        Command::Volume(args) => Action::Volume(args.level),
        Command::Eq(args) => Action::Eq(args.level),
        Command::Source(args) => Action::Source(args.source),
        Command::Sleep => Action::Sleep,
        Command::Wakeup(args) => Action::Wakeup(args.source),
        Command::Reset => Action::Reset,
    };
    control::run(action, device, format)
}

/// Serial port and driver settings shared by every device command.
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Serial device the module is wired to (e.g. /dev/ttyUSB0, COM3).
    #[arg(long, short = 'p', env = "DFPLAYER_PORT", global = true)]
    pub port: Option<String>,

    /// Line rate.
    #[arg(long, env = "DFPLAYER_BAUD", default_value_t = dfplayer_transport::DEFAULT_BAUD_RATE, global = true)]
    pub baud: u32,

    /// Module variant (checksum policy and firmware quirks).
    #[arg(long, value_enum, env = "DFPLAYER_VARIANT", default_value = "mini", global = true)]
    pub variant: VariantArg,

    /// Time to wait for a reply (e.g. 100ms, 1s).
    #[arg(long, env = "DFPLAYER_TIMEOUT", default_value = "100ms", global = true)]
    pub timeout: String,

    /// Ask the module to acknowledge commands and report the result.
    #[arg(long, env = "DFPLAYER_ACK", global = true)]
    pub ack: bool,

    /// Skip the power-up wait before the first command.
    #[arg(long, env = "DFPLAYER_NO_BOOT_WAIT", global = true)]
    pub no_boot_wait: bool,

    /// Reject replies whose checksum does not verify.
    #[arg(long, env = "DFPLAYER_STRICT_CHECKSUM", global = true)]
    pub strict_checksum: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// DFPlayer Mini and clones with the zero-based checksum.
    Mini,
    /// FN-X10P style chips with the offset checksum.
    #[value(name = "fn-x10p")]
    FnX10p,
    /// HW-247A and other slow chips.
    #[value(name = "hw247a")]
    Hw247a,
    /// Clones that send 8-byte frames without a checksum.
    #[value(name = "no-checksum")]
    NoChecksum,
}

impl From<VariantArg> for ModuleVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Mini => ModuleVariant::Mini,
            VariantArg::FnX10p => ModuleVariant::FnX10p,
            VariantArg::Hw247a => ModuleVariant::Hw247a,
            VariantArg::NoChecksum => ModuleVariant::NoChecksum,
        }
    }
}

#[derive(Args, Debug)]
pub struct TrackArgs {
    /// Track number.
    pub track: u16,
}

#[derive(Args, Debug)]
pub struct FolderArgs {
    /// Folder number.
    pub folder: u8,
    /// Track number within the folder.
    pub track: u16,
}

#[derive(Args, Debug)]
pub struct LevelArgs {
    /// Level; out-of-range values are clamped.
    pub level: u8,
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Source number.
    #[arg(default_value = "2")]
    pub source: u8,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Value to read.
    #[arg(value_enum)]
    pub what: QueryArg,
    /// Folder for `folder-tracks`.
    #[arg(long, default_value = "1")]
    pub folder: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum QueryArg {
    /// Raw transport status word.
    Status,
    Volume,
    Eq,
    /// Loop mode (0=all 1=folder 2=track 3=random 4=off).
    PlayMode,
    /// Firmware version.
    Version,
    TracksUsb,
    TracksSd,
    TracksFlash,
    /// Track currently playing from USB.
    TrackUsb,
    /// Track currently playing from SD.
    TrackSd,
    /// Track currently playing from flash.
    TrackFlash,
    /// Number of tracks in --folder.
    FolderTracks,
    /// Number of folders on the current source.
    Folders,
}

impl QueryArg {
    pub fn command(self) -> CommandCode {
        match self {
            QueryArg::Status => CommandCode::GetStatus,
            QueryArg::Volume => CommandCode::GetVolume,
            QueryArg::Eq => CommandCode::GetEq,
            QueryArg::PlayMode => CommandCode::GetPlayMode,
            QueryArg::Version => CommandCode::GetVersion,
            QueryArg::TracksUsb => CommandCode::GetUsbTrackCount,
            QueryArg::TracksSd => CommandCode::GetSdTrackCount,
            QueryArg::TracksFlash => CommandCode::GetFlashTrackCount,
            QueryArg::TrackUsb => CommandCode::GetUsbTrack,
            QueryArg::TrackSd => CommandCode::GetSdTrack,
            QueryArg::TrackFlash => CommandCode::GetFlashTrack,
            QueryArg::FolderTracks => CommandCode::GetFolderTrackCount,
            QueryArg::Folders => CommandCode::GetFolderCount,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QueryArg::Status => "status",
            QueryArg::Volume => "volume",
            QueryArg::Eq => "eq",
            QueryArg::PlayMode => "play-mode",
            QueryArg::Version => "version",
            QueryArg::TracksUsb => "tracks-usb",
            QueryArg::TracksSd => "tracks-sd",
            QueryArg::TracksFlash => "tracks-flash",
            QueryArg::TrackUsb => "track-usb",
            QueryArg::TrackSd => "track-sd",
            QueryArg::TrackFlash => "track-flash",
            QueryArg::FolderTracks => "folder-tracks",
            QueryArg::Folders => "folders",
        }
    }
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

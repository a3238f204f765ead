use dfplayer_frame::Frame;
use dfplayer_player::{Player, StatusCode};
use dfplayer_transport::SerialLink;
use serde::Serialize;

use crate::cmd::{device, DeviceArgs};
use crate::exit::{player_error, CliError, CliResult, FAILURE, SUCCESS, TIMEOUT};
use crate::output::{OutputFormat, Record};

/// A command that changes module state and returns no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play(u16),
    Folder(u8, u16),
    Mp3(u16),
    Advert(u16),
    Next,
    Previous,
    Pause,
    Resume,
    Stop,
    Volume(u8),
    Eq(u8),
    Source(u8),
    Sleep,
    Wakeup(u8),
    Reset,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Play(_) => "play",
            Action::Folder(..) => "folder",
            Action::Mp3(_) => "mp3",
            Action::Advert(_) => "advert",
            Action::Next => "next",
            Action::Previous => "previous",
            Action::Pause => "pause",
            Action::Resume => "resume",
            Action::Stop => "stop",
            Action::Volume(_) => "volume",
            Action::Eq(_) => "eq",
            Action::Source(_) => "source",
            Action::Sleep => "sleep",
            Action::Wakeup(_) => "wakeup",
            Action::Reset => "reset",
        }
    }

    pub fn apply<L: SerialLink>(self, player: &mut Player<L>) -> dfplayer_player::Result<()> {
        match self {
            Action::Play(track) => player.play_track(track),
            Action::Folder(folder, track) => player.play_folder(folder, track),
            Action::Mp3(track) => player.play_mp3_folder(track),
            Action::Advert(track) => player.play_advert_folder(track),
            Action::Next => player.next(),
            Action::Previous => player.previous(),
            Action::Pause => player.pause(),
            Action::Resume => player.resume(),
            Action::Stop => player.stop(),
            Action::Volume(level) => player.set_volume(level),
            Action::Eq(preset) => player.set_eq(preset),
            Action::Source(source) => player.set_source(source),
            Action::Sleep => player.sleep(),
            Action::Wakeup(source) => player.wakeup(source),
            Action::Reset => player.reset(),
        }
    }
}

#[derive(Serialize)]
struct ControlOutput {
    command: &'static str,
    acknowledged: bool,
    status: &'static str,
    status_code: u8,
}

pub fn run(action: Action, args: &DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let mut player = device::open(args)?;
    action
        .apply(&mut player)
        .map_err(|err| player_error(&format!("{} failed", action.name()), err))?;

    let acknowledged = player.config().acknowledge;
    let status = outcome(action, acknowledged, player.last_frame())?;

    let out = ControlOutput {
        command: action.name(),
        acknowledged,
        status: if acknowledged { status.name() } else { "sent" },
        status_code: status.code(),
    };
    Record {
        data: &out,
        fields: vec![
            ("command", out.command.to_string()),
            ("status", out.status.to_string()),
        ],
        raw: out.status.to_string(),
    }
    .print(format);

    Ok(if status.is_error() { FAILURE } else { SUCCESS })
}

/// Status to report for `action`. An acknowledged command that got no
/// valid reply is a timeout.
fn outcome(action: Action, acknowledged: bool, reply: Option<&Frame>) -> CliResult<StatusCode> {
    if !acknowledged {
        return Ok(StatusCode::Unknown);
    }
    match reply {
        Some(frame) => Ok(StatusCode::from_frame(Some(frame))),
        None => Err(CliError::new(
            TIMEOUT,
            format!("{}: no acknowledgement from module", action.name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use dfplayer_frame::{REPLY_ACCEPTED, REPLY_ERROR};

    use super::*;

    #[test]
    fn missing_acknowledgement_is_a_timeout() {
        let err = outcome(Action::Pause, true, None).unwrap_err();
        assert_eq!(err.code, TIMEOUT);
        assert_eq!(err.message, "pause: no acknowledgement from module");
    }

    #[test]
    fn unacknowledged_command_reports_nothing() {
        let status = outcome(Action::Next, false, None).unwrap();
        assert_eq!(status, StatusCode::Unknown);
        assert!(!status.is_error());
    }

    #[test]
    fn acknowledgement_is_interpreted() {
        let accepted = Frame::new(REPLY_ACCEPTED, 0, false);
        assert_eq!(
            outcome(Action::Volume(10), true, Some(&accepted)).unwrap(),
            StatusCode::Accepted
        );

        let not_found = Frame::new(REPLY_ERROR, 0x0006, false);
        let status = outcome(Action::Play(400), true, Some(&not_found)).unwrap();
        assert_eq!(status, StatusCode::NotFound);
        assert!(status.is_error());
    }
}

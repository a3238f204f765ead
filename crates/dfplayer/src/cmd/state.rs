use dfplayer_frame::CommandCode;
use dfplayer_player::PlaybackState;
use serde::Serialize;

use crate::cmd::{device, DeviceArgs};
use crate::exit::{CliError, CliResult, SUCCESS, TIMEOUT};
use crate::output::{OutputFormat, Record};

#[derive(Serialize)]
struct StateOutput {
    state: &'static str,
    status: u16,
}

pub fn run(args: &DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let mut player = device::open(args)?;
    let status = player.query(CommandCode::GetStatus);
    let state = PlaybackState::from_status(status, player.config().variant);
    if state == PlaybackState::CommunicationError {
        return Err(CliError::new(TIMEOUT, "state: no valid reply from module"));
    }

    let out = StateOutput {
        state: state.name(),
        status,
    };
    Record {
        data: &out,
        fields: vec![
            ("state", out.state.to_string()),
            ("status", format!("0x{:04X}", out.status)),
        ],
        raw: out.state.to_string(),
    }
    .print(format);

    Ok(SUCCESS)
}

use dfplayer_player::clamp;
use serde::Serialize;

use crate::cmd::{device, DeviceArgs, QueryArg, QueryArgs};
use crate::exit::{CliError, CliResult, FAILURE, SUCCESS, TIMEOUT};
use crate::output::{OutputFormat, Record};

#[derive(Serialize)]
struct QueryOutput {
    query: &'static str,
    command: &'static str,
    value: u16,
}

pub fn run(args: QueryArgs, device_args: &DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let mut player = device::open(device_args)?;
    let command = args.what.command();
    let data = match args.what {
        QueryArg::FolderTracks => u16::from(clamp::folder(args.folder, clamp::FOLDER_MAX)),
        _ => 0,
    };

    let value = player.query_with(command, data);
    let Some(reply) = player.last_frame().copied() else {
        return Err(CliError::new(
            TIMEOUT,
            format!("{}: no valid reply from module", args.what.name()),
        ));
    };
    if !reply.echoes(command) {
        return Err(CliError::new(
            FAILURE,
            format!(
                "{}: module answered {}",
                args.what.name(),
                player.interpret_last_frame()
            ),
        ));
    }

    let out = QueryOutput {
        query: args.what.name(),
        command: command.name(),
        value,
    };
    Record {
        data: &out,
        fields: vec![
            ("query", out.query.to_string()),
            ("value", out.value.to_string()),
            ("hex", format!("0x{:04X}", out.value)),
        ],
        raw: out.value.to_string(),
    }
    .print(format);

    Ok(SUCCESS)
}

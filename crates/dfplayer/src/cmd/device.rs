use std::time::Duration;

use dfplayer_player::{Player, PlayerConfig};
use dfplayer_transport::{SerialPortLink, SerialSettings};
use tracing::info;

use crate::cmd::DeviceArgs;
use crate::exit::{player_error, transport_error, CliError, CliResult, USAGE};

/// Open the configured port and bring up a player on it.
pub fn open(args: &DeviceArgs) -> CliResult<Player<SerialPortLink>> {
    let config = player_config(args)?;
    let path = args.port.as_deref().ok_or_else(|| {
        CliError::new(USAGE, "no serial port given (use --port or DFPLAYER_PORT)")
    })?;

    let settings = SerialSettings {
        baud_rate: args.baud,
        read_timeout: config.timeout,
    };
    let link = SerialPortLink::open(path, &settings)
        .map_err(|err| transport_error("open failed", err))?;

    info!(port = path, variant = %config.variant, "connected");
    Player::begin(link, config).map_err(|err| player_error("setup failed", err))
}

pub fn player_config(args: &DeviceArgs) -> CliResult<PlayerConfig> {
    Ok(PlayerConfig {
        timeout: parse_duration(&args.timeout)?,
        variant: args.variant.into(),
        acknowledge: args.ack,
        boot_wait: !args.no_boot_wait,
        strict_checksum: args.strict_checksum,
    })
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "ms")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}

mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::{Command, DeviceArgs};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "dfplayer", version, about = "Drive a DFPlayer-family MP3 module over serial")]
struct Cli {
    #[command(flatten)]
    device: DeviceArgs,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(
        long,
        value_name = "FORMAT",
        env = "DFPLAYER_LOG_FORMAT",
        default_value = "text",
        global = true
    )]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        env = "DFPLAYER_LOG_LEVEL",
        default_value = "warn",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, &cli.device, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::{QueryArg, VariantArg};

    #[test]
    fn parses_play_with_device_flags() {
        let cli = Cli::try_parse_from([
            "dfplayer",
            "--port",
            "/dev/ttyUSB0",
            "--variant",
            "fn-x10p",
            "--ack",
            "play",
            "12",
        ])
        .expect("play args should parse");

        assert!(matches!(cli.command, Command::Play(ref args) if args.track == 12));
        assert_eq!(cli.device.port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(cli.device.variant, VariantArg::FnX10p);
        assert!(cli.device.ack);
    }

    #[test]
    fn device_flags_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dfplayer",
            "query",
            "tracks-sd",
            "--variant",
            "no-checksum",
            "--timeout",
            "250ms",
        ])
        .expect("query args should parse");

        match cli.command {
            Command::Query(args) => assert_eq!(args.what, QueryArg::TracksSd),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.device.variant, VariantArg::NoChecksum);
        assert_eq!(cli.device.timeout, "250ms");
    }

    #[test]
    fn folder_requires_track() {
        let err = Cli::try_parse_from(["dfplayer", "folder", "3"])
            .expect_err("folder without track should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn rejects_unknown_variant() {
        let err = Cli::try_parse_from(["dfplayer", "--variant", "yx5200", "next"])
            .expect_err("unknown variant should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn log_flags_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dfplayer",
            "state",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])
        .expect("log flags should parse");
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn wakeup_defaults_to_sd() {
        let cli = Cli::try_parse_from(["dfplayer", "wakeup"]).expect("wakeup should parse");
        assert!(matches!(cli.command, Command::Wakeup(ref args) if args.source == 2));
    }
}

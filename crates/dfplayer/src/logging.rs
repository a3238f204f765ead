use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, registry};

/// Crates whose events reach stderr. serialport and the rest stay silent.
const DRIVER_TARGETS: [&str; 4] = [
    "dfplayer",
    "dfplayer_transport",
    "dfplayer_frame",
    "dfplayer_player",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }

    /// Frame dumps come from several crates; name the source once they show.
    fn shows_target(self) -> bool {
        matches!(self, LogLevel::Debug | LogLevel::Trace)
    }
}

pub fn log_filter(level: LogLevel) -> Targets {
    let level = level.as_filter();
    Targets::new().with_targets(DRIVER_TARGETS.iter().map(|target| (*target, level)))
}

/// Log to stderr so stdout stays machine-readable.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let filter = log_filter(level);
    let with_target = level.shows_target();

    let _ = match format {
        LogFormat::Text => registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(with_target),
            )
            .with(filter)
            .try_init(),
        LogFormat::Json => registry()
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(with_target),
            )
            .with(filter)
            .try_init(),
    };
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    #[test]
    fn driver_crates_follow_the_level() {
        let filter = log_filter(LogLevel::Info);
        for target in DRIVER_TARGETS {
            assert!(filter.would_enable(target, &Level::INFO));
            assert!(!filter.would_enable(target, &Level::DEBUG));
        }
        assert!(filter.would_enable("dfplayer_frame::reader", &Level::WARN));
    }

    #[test]
    fn other_crates_are_silent() {
        let filter = log_filter(LogLevel::Trace);
        assert!(!filter.would_enable("serialport", &Level::ERROR));
        assert!(!filter.would_enable("mio::poll", &Level::ERROR));
    }

    #[test]
    fn target_shown_from_debug() {
        assert!(!LogLevel::Warn.shows_target());
        assert!(LogLevel::Debug.shows_target());
        assert!(LogLevel::Trace.shows_target());
    }
}

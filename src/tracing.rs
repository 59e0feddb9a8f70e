//! Logging setup
//!
//! Two layers share one registry:
//! - console, filtered by `RUST_LOG` or the level the caller asks for
//! - a daily-rotated file in the config `logs/` directory, always at debug
//!
//! `RUST_LOG=levelbind::drag=trace` narrows console output to one module.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::{ensure_logs_dir, LOG_FILE_PREFIX};

/// Console level for a `-v` count: warn, info, debug, then trace
pub fn console_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over `default_level`. When the logs directory can't be
/// created only the console layer is installed.
pub fn init(default_level: &str) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let file_layer = match ensure_logs_dir() {
        Ok(dir) => Some(
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug")),
        ),
        Err(e) => {
            eprintln!("levelbind: file logging disabled: {}", e);
            None
        }
    };

    // A second init (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_level_steps() {
        assert_eq!(console_level(0), "warn");
        assert_eq!(console_level(1), "info");
        assert_eq!(console_level(2), "debug");
        assert_eq!(console_level(9), "trace");
    }
}

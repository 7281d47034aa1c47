// src/utils/logging.rs
//! Logging configuration
//!
//! Sets up `env_logger` with the switcher's line format. One line per
//! worker outcome at info level; candidate tables and skipped quotes at
//! debug level.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;

/// Initializes the logging subsystem
///
/// # Configuration
/// - Logs to stdout
/// - Default log level: Info, or Debug when `verbose` is set
/// - `RUST_LOG` takes precedence over both if set
pub fn init_logging(verbose: bool) {
    let mut builder = common_log_config();

    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    builder.filter_level(default_level);

    if env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    }

    // A second init (tests, embedding) keeps the first logger
    let _ = builder.try_init();
}

/// Creates a base logger builder with the common line format
///
/// Format: `[timestamp level module:line] message`
fn common_log_config() -> Builder {
    let mut builder = Builder::new();

    builder
        .format(|buf, record| {
            use std::io::Write;
            let ts = buf.timestamp_seconds();
            let level = record.level();
            let module = record.module_path().unwrap_or_default();
            let line = record.line().unwrap_or(0);

            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                ts,
                level,
                module,
                line,
                record.args()
            )
        })
        .target(Target::Stdout);

    builder
}

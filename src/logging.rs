//! Logging setup.

use tracing_subscriber::filter::LevelFilter;

/// Install a fmt subscriber writing to stderr; stdout carries responses.
pub fn set_up_logging(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

//! Logging Infrastructure
//!
//! fmt subscriber to stdout, or to a daily rolling file when a log
//! directory is configured and exists.

use std::path::Path;

/// Initialize the logger at `info`, stdout only
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&Path>) {
    let level = parse_level(log_level.unwrap_or("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir
        && dir.exists()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "workshop-edge");
        subscriber.with_writer(file_appender).init();
        return;
    }

    subscriber.init();
}

/// Unknown level names fall back to `info`
fn parse_level(raw: &str) -> tracing::Level {
    raw.trim().parse().unwrap_or(tracing::Level::INFO)
}

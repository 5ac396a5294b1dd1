use anyhow::{anyhow, Context};
use std::io;
use tracing::Level;
use tracing_subscriber::fmt::time::UtcTime;

const DEFAULT_TIME_PATTERN: &str =
    "[year]-[month]-[day]T[hour repr:24]:[minute]:[second].[subsecond digits:4]";

// Installs the global JSON log collector
//
// Logs go to stderr: stdout is reserved for the single result document.
pub fn init_logging(level: Level) -> Result<(), anyhow::Error> {
    let time_format = time::format_description::parse(DEFAULT_TIME_PATTERN)
        .with_context(|| "Invalid log time format")?;

    tracing_subscriber::fmt()
        .json()
        .with_target(false)
        .flatten_event(true)
        .with_timer(UtcTime::new(time_format))
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))
}

//! Logging setup using env_logger.
//!
//! Search results go to stdout, so every log record is written to stderr.
//! The filter level comes from the caller and can be overridden through
//! the `SNIFF_LOG` environment variable (env_logger filter syntax).

use anyhow::Result;
use log::{Level, LevelFilter, debug, error, info, trace, warn};
use std::sync::Once;

static INIT: Once = Once::new();

/// Environment variable that overrides the level chosen on the command line.
pub const LOG_ENV: &str = "SNIFF_LOG";

/// Log message with context
pub struct LogMessage {
    /// The message to log
    pub message: String,

    /// The module where the log originated
    pub module: &'static str,

    /// Optional key-value pairs of additional context
    pub context: Option<Vec<(&'static str, String)>>,
}

/// Initialize env_logger-based logging with stderr output.
///
/// Only the first call has any effect; later calls return `Ok(())`
/// without touching the installed logger.
pub fn init(level: LevelFilter) -> Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| {
        if let Err(e) = setup_logger(level) {
            // Cannot use logging yet since it failed to initialize
            eprintln!("Failed to initialize logging: {}", e);
            result = Err(e);
        } else {
            debug!(target: "telemetry", "Logging initialized at {}", level);
        }
    });

    result
}

/// Log a message with the given level and context
///
/// # Example
///
/// ```
/// use sniff::telemetry::{log_with_context, LogMessage};
/// use log::Level;
///
/// log_with_context(
///     Level::Debug,
///     LogMessage {
///         message: "Skipped file".to_string(),
///         module: "search",
///         context: Some(vec![
///             ("file_path", "/path/to/file.bin".to_string()),
///             ("reason", "binary".to_string()),
///         ]),
///     }
/// );
/// ```
pub fn log_with_context(level: Level, msg: LogMessage) {
    let text = format_context(&msg);
    match level {
        Level::Error => error!(target: msg.module, "{}", text),
        Level::Warn => warn!(target: msg.module, "{}", text),
        Level::Info => info!(target: msg.module, "{}", text),
        Level::Debug => debug!(target: msg.module, "{}", text),
        Level::Trace => trace!(target: msg.module, "{}", text),
    }
}

/// Format a log message with its context for display
pub(crate) fn format_context(msg: &LogMessage) -> String {
    match &msg.context {
        Some(context) if !context.is_empty() => {
            let context_str = context
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(", ");

            format!("{} [{}]", msg.message, context_str)
        }
        _ => msg.message.clone(),
    }
}

fn setup_logger(level: LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter(None, level)
        .parse_env(LOG_ENV)
        .format_timestamp(None)
        .format_target(true)
        .format_module_path(false)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_context_without_pairs() {
        let msg = LogMessage {
            message: "plain".to_string(),
            module: "test",
            context: None,
        };
        assert_eq!(format_context(&msg), "plain");

        let msg = LogMessage {
            message: "plain".to_string(),
            module: "test",
            context: Some(vec![]),
        };
        assert_eq!(format_context(&msg), "plain");
    }

    #[test]
    fn test_format_context_with_pairs() {
        let msg = LogMessage {
            message: "Skipped file".to_string(),
            module: "search",
            context: Some(vec![("path", "a.txt".to_string()), ("reason", "empty".to_string())]),
        };
        assert_eq!(format_context(&msg), "Skipped file [path=a.txt, reason=empty]");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        assert!(init(LevelFilter::Warn).is_ok());
        assert!(init(LevelFilter::Debug).is_ok());
    }
}

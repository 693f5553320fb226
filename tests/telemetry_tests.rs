use log::{Level, LevelFilter};
use sniff::telemetry::{LogMessage, init, log_with_context};

// Log output goes to stderr and is not captured here; these tests check
// that initialization is idempotent and logging never panics

#[test]
fn test_telemetry_init_is_idempotent() {
    assert!(init(LevelFilter::Debug).is_ok());
    assert!(init(LevelFilter::Warn).is_ok());
}

#[test]
fn test_log_with_context_at_every_level() {
    init(LevelFilter::Trace).ok();

    for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
        log_with_context(
            level,
            LogMessage {
                message: format!("{} message", level),
                module: "telemetry_test",
                context: Some(vec![("file_path", "/tmp/notes.txt".to_string())]),
            },
        );
    }

    log_with_context(
        Level::Info,
        LogMessage {
            message: "No context".to_string(),
            module: "telemetry_test",
            context: None,
        },
    );
}

//! Integration tests for logging initialization.
//!
//! The global subscriber can be installed once per process; later calls are
//! no-ops and must not panic.

use agent_cli_to_api::core::logging::{self, LogFormat, LogLevel, LogSettings};

#[test]
fn init_is_idempotent_across_formats() {
    for format in [LogFormat::Human, LogFormat::Json, LogFormat::Compact] {
        logging::init(&LogSettings {
            level: LogLevel::Debug,
            format,
            file: None,
        });
    }
}

#[test]
fn unwritable_log_file_falls_back_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    logging::init(&LogSettings {
        level: LogLevel::Info,
        format: LogFormat::Human,
        file: Some(dir.path().join("missing").join("gateway.log")),
    });
}

#[test]
fn cli_flags_beat_environment() {
    let lookup = |key: &str| match key {
        "CODEX_LOG_LEVEL" => Some("error".to_string()),
        "CODEX_LOG_FORMAT" => Some("compact".to_string()),
        _ => None,
    };

    let from_env = LogSettings::resolve(None, false, false, lookup);
    assert_eq!(from_env.level, LogLevel::Error);
    assert_eq!(from_env.format, LogFormat::Compact);

    let from_flags = LogSettings::resolve(Some("trace"), true, false, lookup);
    assert_eq!(from_flags.level, LogLevel::Trace);
    assert_eq!(from_flags.format, LogFormat::Json);
}
